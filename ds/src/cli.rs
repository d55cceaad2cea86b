//! CLI argument parsing for draftstore

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "ds")]
#[command(author, version, about = "Inspect and edit the local draft store", long_about = None)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Store directory (overrides config)
    #[arg(short, long, global = true)]
    pub store: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the value stored under a key
    Get {
        /// Record key
        #[arg(required = true)]
        key: String,
    },

    /// Store a value under a key, replacing any previous value
    Set {
        /// Record key
        #[arg(required = true)]
        key: String,

        /// Value to store
        #[arg(required = true)]
        value: String,
    },

    /// Remove a key
    Remove {
        /// Record key
        #[arg(required = true)]
        key: String,
    },

    /// List all keys
    List,

    /// Print the store directory
    Path,
}
