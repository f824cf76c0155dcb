//! Tracing subscriber setup

use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter from `RUST_LOG`, defaulting to `info`
pub(crate) fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber
pub fn init(json: bool) {
    let registry = tracing_subscriber::registry().with(env_filter());

    let result = if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init()
    };

    if result.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}

/// Load `.env`, then install the global subscriber
///
/// `.env` may set `RUST_LOG`, so it is read before the filter is built.
pub fn init_with_dotenv(json: bool) {
    let dotenv = dotenvy::dotenv();
    init(json);
    report_dotenv(dotenv);
}

fn report_dotenv(result: Result<PathBuf, dotenvy::Error>) {
    match result {
        Ok(path) => tracing::debug!(path = %path.display(), "loaded .env"),
        Err(e) if e.not_found() => {}
        Err(e) => tracing::warn!(error = %e, "ignoring unreadable .env"),
    }
}
