use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::info;

use draftstore::cli::{Cli, Command};
use draftstore::config::Config;
use draftstore::{FileStore, KvStore};

fn setup_logging() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Warn)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    setup_logging().context("Failed to setup logging")?;

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    let store_path = cli.store.unwrap_or(config.store_path);

    info!("draftstore starting at {}", store_path.display());

    let mut store = FileStore::open(&store_path).context("Failed to open draft store")?;

    match cli.command {
        Command::Get { key } => match store.get(&key)? {
            Some(value) => println!("{}", value),
            None => {
                eprintln!("{} No value for key: {}", "✗".red(), key.cyan());
                std::process::exit(1);
            }
        },
        Command::Set { key, value } => {
            store.set(&key, &value)?;
            println!("{} Stored: {}", "✓".green(), key.cyan());
        }
        Command::Remove { key } => {
            store.remove(&key)?;
            println!("{} Removed: {}", "✓".green(), key.cyan());
        }
        Command::List => {
            let keys = store.keys()?;
            if keys.is_empty() {
                println!("No drafts found");
            } else {
                for key in keys {
                    println!("{}", key);
                }
            }
        }
        Command::Path => {
            println!("{}", store.path().display());
        }
    }

    Ok(())
}
