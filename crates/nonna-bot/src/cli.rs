//! Command-line interface

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::net::SocketAddr;
use std::path::PathBuf;

/// Identity used when none is given
pub const DEFAULT_IDENTITY: &str = "console-user";

/// Parsed invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cli {
    /// Configuration file
    pub config: Option<PathBuf>,
    /// Emit JSON logs
    pub json: bool,
    /// Subcommand
    pub action: Action,
}

/// Subcommands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Scrape a page and write a normalized name list
    BuildLists {
        /// Page with captioned tables
        url: String,
        /// Output JSON file
        out: PathBuf,
    },
    /// Print canonical names for titles
    Normalize {
        /// Raw titles
        titles: Vec<String>,
    },
    /// Resolve a single message
    Ask {
        /// Message text
        text: String,
        /// Author identity
        identity: String,
    },
    /// Interactive stdin session
    Console {
        /// Author identity
        identity: String,
    },
    /// Interaction webhook server
    Serve {
        /// Listen address
        addr: SocketAddr,
    },
}

fn identity_arg() -> Arg {
    Arg::new("identity")
        .long("identity")
        .default_value(DEFAULT_IDENTITY)
        .help("Identity the messages are sent as")
}

/// Build the command tree
#[must_use]
pub fn command() -> Command {
    Command::new("nonna-bot")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Nonna answers ((pasta)) questions")
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Configuration file (toml, yaml or json)"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Emit logs as JSON"),
        )
        .subcommand(
            Command::new("build-lists")
                .about("Scrape a page and write the normalized name list")
                .arg(Arg::new("url").long("url").required(true).help("Page to scrape"))
                .arg(
                    Arg::new("out")
                        .long("out")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("Output JSON file"),
                ),
        )
        .subcommand(
            Command::new("normalize")
                .about("Print the canonical names of raw titles")
                .arg(Arg::new("titles").required(true).num_args(1..)),
        )
        .subcommand(
            Command::new("ask")
                .about("Resolve one message and print the reply")
                .arg(Arg::new("text").required(true))
                .arg(identity_arg()),
        )
        .subcommand(
            Command::new("console")
                .about("Read messages from stdin, one per line")
                .arg(identity_arg()),
        )
        .subcommand(
            Command::new("serve")
                .about("Serve the interaction webhook")
                .arg(
                    Arg::new("addr")
                        .long("addr")
                        .default_value("127.0.0.1:8787")
                        .value_parser(value_parser!(SocketAddr))
                        .help("Listen address"),
                ),
        )
}

fn string(args: &ArgMatches, id: &str) -> String {
    args.get_one::<String>(id).cloned().unwrap_or_default()
}

impl Cli {
    /// Parse process arguments
    #[must_use]
    pub fn parse() -> Self {
        Self::from_matches(&command().get_matches())
    }

    /// Parse an explicit argument list
    ///
    /// # Errors
    /// Returns the clap error for invalid arguments
    pub fn try_parse_from<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Ok(Self::from_matches(&command().try_get_matches_from(args)?))
    }

    fn from_matches(matches: &ArgMatches) -> Self {
        let action = match matches.subcommand() {
            Some(("build-lists", args)) => Action::BuildLists {
                url: string(args, "url"),
                out: args.get_one::<PathBuf>("out").cloned().unwrap_or_default(),
            },
            Some(("normalize", args)) => Action::Normalize {
                titles: args
                    .get_many::<String>("titles")
                    .map(|t| t.cloned().collect())
                    .unwrap_or_default(),
            },
            Some(("ask", args)) => Action::Ask {
                text: string(args, "text"),
                identity: string(args, "identity"),
            },
            Some(("console", args)) => Action::Console {
                identity: string(args, "identity"),
            },
            Some(("serve", args)) => Action::Serve {
                addr: args
                    .get_one::<SocketAddr>("addr")
                    .copied()
                    .unwrap_or_else(|| SocketAddr::from(([127, 0, 0, 1], 8787))),
            },
            _ => unreachable!("subcommand is required"),
        };

        Self {
            config: matches.get_one::<PathBuf>("config").cloned(),
            json: matches.get_flag("json"),
            action,
        }
    }
}
