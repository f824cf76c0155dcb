//! Subcommand implementations

use crate::console::{self, ConsoleMessenger, CONSOLE_CHANNEL};
use crate::webhook;
use anyhow::{Context, Result};
use nonna_core::{BotContext, ChannelAllowList, InteractionVerifier, NonnaConfig, Orchestrator};
use nonna_names::{fetch_entries, CanonicalName, normalize_entries, normalize_title, save_name_list};
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

/// Environment variable holding the hex webhook public key
pub const PUBLIC_KEY_ENV: &str = "DISCORD_PUBLIC_KEY";

/// Load configuration, falling back to defaults when no file is given
///
/// # Errors
/// Fails if the file cannot be read, parsed or validated
pub fn load_config(path: Option<&Path>) -> Result<NonnaConfig> {
    match path {
        Some(path) => NonnaConfig::load(path)
            .with_context(|| format!("failed to load config from {}", path.display())),
        None => Ok(NonnaConfig::default()),
    }
}

/// Build the orchestrator for a console or one-shot session
///
/// # Errors
/// Fails if the name lists or the HTTP client cannot be set up
pub fn orchestrator(config: NonnaConfig) -> Result<Arc<Orchestrator>> {
    let mut allowed = config.channels.allowed.clone();
    if !allowed.iter().any(|c| c == CONSOLE_CHANNEL) {
        allowed.push(CONSOLE_CHANNEL.to_string());
    }
    let context = BotContext::with_http_lookup(config, ChannelAllowList::from_ids(allowed))
        .context("failed to build bot context")?;
    Ok(Arc::new(Orchestrator::new(Arc::new(context))))
}

/// Scrape `url`, normalize every row and write the list to `out`
///
/// # Errors
/// Fails if the page cannot be fetched or parsed, or the file written
pub async fn build_lists(url: &str, out: &Path) -> Result<usize> {
    let client = reqwest::Client::new();
    let entries = fetch_entries(&client, url)
        .await
        .with_context(|| format!("failed to scrape {url}"))?;
    let names = normalize_entries(&entries);

    save_name_list(out, &names)
        .with_context(|| format!("failed to write {}", out.display()))?;
    tracing::info!(rows = entries.len(), names = names.len(), out = %out.display(), "name list written");
    Ok(names.len())
}

/// Canonical names of each title, one line per title
#[must_use]
pub fn normalize(titles: &[String]) -> Vec<String> {
    titles
        .iter()
        .map(|title| {
            normalize_title(title)
                .iter()
                .map(CanonicalName::as_str)
                .collect::<Vec<_>>()
                .join(" | ")
        })
        .collect()
}

/// Resolve one message and return the reply text
///
/// # Errors
/// Fails if the orchestrator cannot be built
pub async fn ask(config: NonnaConfig, text: &str, identity: &str) -> Result<String> {
    let orchestrator = orchestrator(config)?;
    let outcome = orchestrator.resolve_text(identity, text).await;
    tracing::info!(outcome = outcome.label(), "query resolved");
    Ok(outcome
        .reply_text()
        .unwrap_or_else(|| "(Nonna has nothing to say)".to_string()))
}

/// Interactive stdin session
///
/// # Errors
/// Fails if setup fails or stdin cannot be read
pub async fn console(config: NonnaConfig, identity: &str) -> Result<()> {
    let orchestrator = orchestrator(config)?;
    let messenger = Arc::new(ConsoleMessenger::new(std::io::stdout()));
    let stdin = tokio::io::BufReader::new(tokio::io::stdin());

    let handled = console::run(orchestrator, messenger, identity, stdin)
        .await
        .context("failed to read stdin")?;
    tracing::info!(handled, "console session finished");
    Ok(())
}

/// Serve the interaction webhook
///
/// # Errors
/// Fails if the public key is missing or invalid
pub async fn serve(addr: SocketAddr) -> Result<()> {
    let key = std::env::var(PUBLIC_KEY_ENV)
        .with_context(|| format!("{PUBLIC_KEY_ENV} environment variable not set"))?;
    let verifier = InteractionVerifier::from_hex(&key)
        .with_context(|| format!("{PUBLIC_KEY_ENV} is not a valid Ed25519 public key"))?;

    webhook::serve(verifier, addr).await;
    Ok(())
}
