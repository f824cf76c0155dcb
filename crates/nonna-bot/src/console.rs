//! Console session
//!
//! Every stdin line becomes a message in the `console` channel. Replies are
//! written to the given sink instead of a chat platform.

use async_trait::async_trait;
use nonna_core::{ChannelId, MessageId, Messenger, MessengerError, Orchestrator, QueryEvent};
use parking_lot::Mutex;
use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

/// Channel id of the console session
pub const CONSOLE_CHANNEL: &str = "console";

/// Messenger printing to a writer
#[derive(Debug)]
pub struct ConsoleMessenger<W> {
    out: Mutex<W>,
}

impl<W: Write + Send> ConsoleMessenger<W> {
    /// Create messenger over a writer
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    /// Recover the writer
    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }

    fn print(&self, line: &str) -> Result<(), MessengerError> {
        writeln!(self.out.lock(), "{line}")
            .map_err(|e| MessengerError::DeliveryFailed(e.to_string()))
    }
}

#[async_trait]
impl<W: Write + Send> Messenger for ConsoleMessenger<W> {
    async fn send_text(&self, channel: &ChannelId, text: &str) -> Result<(), MessengerError> {
        self.print(&format!("[{channel}] {text}"))
    }

    async fn react(&self, message: &MessageId, emoji: &str) -> Result<(), MessengerError> {
        self.print(&format!("({message} +{emoji})"))
    }

    async fn reply(&self, message: &MessageId, text: &str) -> Result<(), MessengerError> {
        self.print(&format!("[reply to {message}] {text}"))
    }
}

/// Run a session until `input` is exhausted
///
/// Each line is handled in its own task, and that task is awaited before the
/// next line is read, so lines are answered in input order. A panicking or
/// failing line is logged and the session carries on. Returns the number of
/// lines handled.
///
/// # Errors
/// Returns an I/O error if reading `input` fails
pub async fn run<R, W>(
    orchestrator: Arc<Orchestrator>,
    messenger: Arc<ConsoleMessenger<W>>,
    identity: &str,
    input: R,
) -> std::io::Result<usize>
where
    R: AsyncBufRead + Unpin,
    W: Write + Send + 'static,
{
    let mut lines = input.lines();
    let mut handled = 0;

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        handled += 1;
        let event = QueryEvent::new(
            format!("console-{handled}"),
            identity,
            CONSOLE_CHANNEL,
            line,
        );

        let orchestrator = Arc::clone(&orchestrator);
        let messenger = Arc::clone(&messenger);
        let task =
            tokio::spawn(async move { orchestrator.handle(&event, messenger.as_ref()).await });

        match task.await {
            Ok(Ok(outcome)) => tracing::debug!(outcome = outcome.label(), "line handled"),
            Ok(Err(e)) => tracing::warn!(error = %e, "reply not delivered"),
            Err(e) => tracing::error!(error = %e, "query task failed"),
        }
    }

    Ok(handled)
}
