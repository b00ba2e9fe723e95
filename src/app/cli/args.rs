//! Command line arguments
//!
//! Every option can also be set in the configuration file; values given on
//! the command line win.

use crate::core::version::long_version;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "appcmd")]
#[command(about = "Parse, autocomplete and submit app slash commands")]
#[command(version, long_version = long_version())]
pub struct Args {
    /// Configuration file path
    #[arg(short = 'c', long = "config-file", value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Workspace fixture describing bindings, users and channels
    #[arg(short = 'w', long = "workspace", value_name = "FILE")]
    pub workspace: Option<PathBuf>,

    /// Server URL; calls go to its apps proxy instead of the fixture
    #[arg(short = 's', long = "server", value_name = "URL")]
    pub server: Option<String>,

    /// Access token sent with server calls
    #[arg(long = "token", value_name = "TOKEN")]
    pub token: Option<String>,

    /// Channel the command is typed in
    #[arg(long = "channel", value_name = "ID")]
    pub channel_id: Option<String>,

    /// Current team
    #[arg(long = "team", value_name = "ID")]
    pub team_id: Option<String>,

    /// Root post when replying in a thread
    #[arg(long = "root", value_name = "ID")]
    pub root_id: Option<String>,

    /// Message catalogue (JSON) for a non-English locale
    #[arg(long = "catalog", value_name = "FILE")]
    pub catalog: Option<PathBuf>,

    /// Maximum field lookups in flight while composing a call
    #[arg(long = "max-concurrent-expansions", value_name = "COUNT")]
    pub max_concurrent_expansions: Option<usize>,

    /// Disable coloured output
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Log level
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL", value_parser = ["trace", "debug", "info", "warn", "error", "off"])]
    pub log_level: Option<String>,

    /// Log file path (use 'none' to disable file logging)
    #[arg(short = 'f', long = "log-file", value_name = "FILE")]
    pub log_file: Option<String>,

    /// Log output format
    #[arg(short = 'o', long = "log-format", value_name = "FORMAT", value_parser = ["text", "ext", "json"])]
    pub log_format: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print autocomplete suggestions for the text typed so far
    Suggest {
        #[arg(required = true, num_args = 1.., allow_hyphen_values = true, trailing_var_arg = true)]
        text: Vec<String>,
    },
    /// Print the call request a command line composes to
    Compose {
        #[arg(required = true, num_args = 1.., allow_hyphen_values = true, trailing_var_arg = true)]
        text: Vec<String>,
    },
    /// Compose a command line and submit it
    Execute {
        #[arg(required = true, num_args = 1.., allow_hyphen_values = true, trailing_var_arg = true)]
        text: Vec<String>,
    },
}

impl Command {
    /// The command line, words re-joined with single spaces
    pub fn text(&self) -> String {
        match self {
            Command::Suggest { text } | Command::Compose { text } | Command::Execute { text } => {
                text.join(" ")
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Command::Suggest { .. } => "suggest",
            Command::Compose { .. } => "compose",
            Command::Execute { .. } => "execute",
        }
    }
}
