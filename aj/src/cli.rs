//! CLI command definitions and subcommands

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;

/// Aided Journal - prompted daily journaling in the terminal
#[derive(Parser)]
#[command(
    name = "aj",
    about = "Answer three random prompts, keep a draft, export markdown",
    version,
    after_help = generate_after_help(),
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(
        short = 'l',
        long = "log-level",
        global = true,
        help = "Log level (TRACE, DEBUG, INFO, WARN, ERROR)"
    )]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// CLI subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Open the journal editor (default)
    Write {
        /// Seed the prompt draw for a reproducible session
        #[arg(short, long)]
        seed: Option<u64>,
    },

    /// Export the saved draft as markdown
    Export {
        /// Directory to write into (overrides config)
        #[arg(short, long)]
        out_dir: Option<PathBuf>,

        /// Write the file instead of printing a preview
        #[arg(short, long)]
        yes: bool,
    },

    /// Inspect or discard the saved draft
    Draft {
        #[command(subcommand)]
        command: DraftCommand,
    },

    /// List the prompt catalog
    Prompts {
        /// Draw an initial set of three instead of listing
        #[arg(short, long)]
        draw: bool,

        /// Seed for --draw
        #[arg(short, long, requires = "draw")]
        seed: Option<u64>,
    },
}

/// Draft subcommands
#[derive(Debug, Subcommand)]
pub enum DraftCommand {
    /// Print the saved draft record
    Show,

    /// Delete the saved draft
    Discard,
}

/// Get the log file path
pub fn get_log_path() -> PathBuf {
    let path = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("aidedjournal")
        .join("logs")
        .join("aidedjournal.log");
    debug!(?path, "get_log_path: returning path");
    path
}

/// Generate the after_help text with storage locations
pub fn generate_after_help() -> String {
    let mut help = String::new();
    help.push_str("Keys (editor):\n");
    help.push_str("  Tab/Shift+Tab  move between fields    Ctrl+R  new prompt\n");
    help.push_str("  Ctrl+L         lock prompt            Ctrl+S  export\n");
    help.push_str("  Ctrl+N         new entry              F1      help\n");
    help.push('\n');
    help.push_str(&format!("Logs are written to: {}\n", get_log_path().display()));
    help
}
