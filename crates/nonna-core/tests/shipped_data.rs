//! The sample configuration and bundled lists load and behave

use nonna_core::{BotContext, ChannelAllowList, NonnaConfig, PASTA_SET};
use nonna_names::load_name_list;
use nonna_test_utils::StubLookup;
use std::path::PathBuf;
use std::sync::Arc;

fn repo_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../..")
}

fn shipped_config() -> NonnaConfig {
    let root = repo_root();
    let mut config = NonnaConfig::load(root.join("nonna.toml")).unwrap();
    config.lists.pastas = root.join(&config.lists.pastas);
    config.lists.memes = config.lists.memes.map(|p| root.join(p));
    config.lists.food = root.join(&config.lists.food);
    config
}

#[test]
fn sample_config_builds_context() {
    let context = BotContext::build(
        shipped_config(),
        Arc::new(StubLookup::new()),
        ChannelAllowList::from_ids(["console"]),
    )
    .unwrap();

    assert!(context.config.acknowledge.includes("Mercer_Less"));
    assert!(!context.filter.is_empty());
    assert!(context.matcher.set(PASTA_SET).is_some());
}

#[test]
fn every_bundled_pasta_is_an_exact_match() {
    let config = shipped_config();
    let context = BotContext::build(
        config.clone(),
        Arc::new(StubLookup::new()),
        ChannelAllowList::default(),
    )
    .unwrap();
    let policy = context.policy();

    for name in load_name_list(&config.lists.pastas).unwrap() {
        let suggestions = context
            .matcher
            .suggestions(&name.to_lowercase(), &[PASTA_SET], &policy)
            .unwrap();
        assert_eq!(suggestions[PASTA_SET], "", "{name} should need no correction");
    }
}

#[test]
fn bundled_pastas_pass_the_content_filter() {
    let config = shipped_config();
    let filter = nonna_core::ContentFilter::new(load_name_list(&config.lists.food).unwrap());

    for name in load_name_list(&config.lists.pastas).unwrap() {
        assert_eq!(filter.score(&name), 0, "{name} trips the filter");
    }
}
