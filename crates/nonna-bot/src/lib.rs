//! Nonna Bot
//!
//! Entry points around the resolution core:
//! - `build-lists`: scrape and normalize name lists
//! - `ask` and `console`: resolve messages locally
//! - `serve`: the signed interaction webhook

#![warn(unreachable_pub)]
#![warn(missing_docs)]

pub mod cli;
pub mod commands;
pub mod console;
pub mod logging;
pub mod webhook;

pub use cli::{Action, Cli};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
