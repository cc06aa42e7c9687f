//! CLI argument definitions using clap derive macros.

use clap::{Parser, Subcommand, ValueEnum};

/// Terminal chat client for a generative-AI backend proxy
#[derive(Parser, Debug)]
#[command(name = "gemi", about, version, propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format: text (human-readable) or json (machine-readable)
    #[arg(short, long, global = true, default_value = "text")]
    pub output: OutputFormat,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Colored terminal output for humans
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Open the interactive chat
    Tui {
        /// Backend base URL. Uses GEMI_API_BASE_URL if not set.
        #[arg(long)]
        base_url: Option<String>,
        /// Use the light palette. Uses GEMI_APPEARANCE if not set.
        #[arg(long)]
        light: bool,
    },
    /// Send one message and print the reply
    Ask {
        /// Message text; prefix with "search:" to force a web search
        #[arg(required = true, trailing_var_arg = true)]
        text: Vec<String>,
        /// Backend base URL. Uses GEMI_API_BASE_URL if not set.
        #[arg(long)]
        base_url: Option<String>,
        /// Print the final reply only, without the reveal
        #[arg(long)]
        no_stream: bool,
    },
    /// Check that the backend is reachable
    Health {
        /// Backend base URL. Uses GEMI_API_BASE_URL if not set.
        #[arg(long)]
        base_url: Option<String>,
    },
    /// Inspect or discard the persisted session id
    Session {
        #[command(subcommand)]
        action: SessionAction,
    },
    /// Manage settings stored in ~/.gemi/gemi.db
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum SessionAction {
    /// Print the current session id
    Show,
    /// Forget the session id; the next exchange starts a new one
    Reset,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum ConfigAction {
    /// Store a setting (e.g. GEMI_API_BASE_URL)
    Set { key: String, value: String },
    /// Show stored settings and their effective values
    List,
}
