//! Console session over in-memory input

use nonna_bot::console::{run, ConsoleMessenger};
use async_trait::async_trait;
use nonna_core::{KnowledgeLookup, LookupOutcome, Orchestrator};
use nonna_test_utils::{setup_test_orchestrator, summary, StubLookup};
use std::sync::Arc;

/// Panics on `penne`, answers every other term
struct PanicOnPenne;

#[async_trait]
impl KnowledgeLookup for PanicOnPenne {
    async fn lookup(&self, term: &str) -> LookupOutcome {
        assert_ne!(term, "penne", "lookup exploded");
        LookupOutcome::Found(summary(term))
    }
}

fn orchestrator(lookup: StubLookup) -> Arc<Orchestrator> {
    Arc::new(setup_test_orchestrator(Arc::new(lookup)))
}

#[tokio::test]
async fn each_line_is_answered_in_order() {
    let lookup = StubLookup::new().with("penne", LookupOutcome::Found(summary("Tubes of pasta.")));
    let messenger = Arc::new(ConsoleMessenger::new(Vec::new()));
    let input: &[u8] = b"((penne))\n\nhello there\n((spagetti))\n((orzo))\n";

    let handled = run(orchestrator(lookup), Arc::clone(&messenger), "tester", input)
        .await
        .unwrap();

    assert_eq!(handled, 4);
    let messenger = Arc::try_unwrap(messenger).unwrap();
    let printed = String::from_utf8(messenger.into_inner()).unwrap();
    assert_eq!(
        printed,
        "[console] Tubes of pasta.\n\
         [console] Nonna asks if you meant any of the following: Spaghetti?\n\
         [console] Mama mia, Nonna cannot find that!\n"
    );
}

#[tokio::test]
async fn empty_input_handles_nothing() {
    let messenger = Arc::new(ConsoleMessenger::new(Vec::new()));
    let input: &[u8] = b"";
    let handled = run(orchestrator(StubLookup::new()), messenger, "tester", input)
        .await
        .unwrap();
    assert_eq!(handled, 0);
}

#[tokio::test]
async fn panicking_line_does_not_end_session() {
    let messenger = Arc::new(ConsoleMessenger::new(Vec::new()));
    let input: &[u8] = b"((rigatoni))\n((penne))\n((bucatini))\n";

    let handled = run(
        Arc::new(setup_test_orchestrator(Arc::new(PanicOnPenne))),
        Arc::clone(&messenger),
        "tester",
        input,
    )
    .await
    .unwrap();

    assert_eq!(handled, 3);
    let messenger = Arc::try_unwrap(messenger).unwrap();
    let printed = String::from_utf8(messenger.into_inner()).unwrap();
    assert_eq!(printed, "[console] rigatoni\n[console] bucatini\n");
}
