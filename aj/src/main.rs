//! Aided Journal - prompted daily journaling in the terminal
//!
//! CLI entry point: opens the editor by default, and offers non-interactive
//! export, draft inspection and catalog listing.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use tracing::{debug, info};

use aidedjournal::cli::{Cli, Command, DraftCommand, get_log_path};
use aidedjournal::config::Config;
use aidedjournal::tui::{self, App, Theme};
use aidedjournal::{
    Catalog, CatalogLoader, Clock, DirectorySink, DraftStore, JournalForm, RandomSource, RngSource, SystemClock,
    draw_initial,
};
use draftstore::FileStore;

fn setup_logging(cli_log_level: Option<&str>, config_log_level: Option<&str>) -> Result<()> {
    let log_path = get_log_path();
    if let Some(log_dir) = log_path.parent() {
        fs::create_dir_all(log_dir).context("Failed to create log directory")?;
    }

    // Determine log level with priority: CLI --log-level > config file > default (INFO)
    let level = match cli_log_level.or(config_log_level).map(str::to_uppercase).as_deref() {
        Some("TRACE") => tracing::Level::TRACE,
        Some("DEBUG") => tracing::Level::DEBUG,
        Some("INFO") | None => tracing::Level::INFO,
        Some("WARN") | Some("WARNING") => tracing::Level::WARN,
        Some("ERROR") => tracing::Level::ERROR,
        Some(other) => {
            eprintln!("Warning: Unknown log-level '{}', defaulting to INFO", other);
            tracing::Level::INFO
        }
    };

    let log_file = fs::File::create(&log_path).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (level: {:?})", level);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load log level from config file early (before full config load)
    let config_log_level = Config::load_log_level(cli.config.as_ref());
    setup_logging(cli.log_level.as_deref(), config_log_level.as_deref()).context("Failed to setup logging")?;

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    debug!(command = ?cli.command, "main: dispatching command");
    match cli.command {
        None => cmd_write(&config, None).await,
        Some(Command::Write { seed }) => cmd_write(&config, seed).await,
        Some(Command::Export { out_dir, yes }) => cmd_export(&config, out_dir, yes),
        Some(Command::Draft { command }) => cmd_draft(&config, command),
        Some(Command::Prompts { draw, seed }) => cmd_prompts(&config, draw, seed),
    }
}

fn open_drafts(config: &Config) -> Result<DraftStore> {
    let store = FileStore::open(&config.store.path).context("Failed to open draft store")?;
    Ok(DraftStore::new(Box::new(store)))
}

fn load_catalog(config: &Config) -> Result<Catalog> {
    let worktree = std::env::current_dir().context("Failed to get current directory")?;
    let catalog = CatalogLoader::new(worktree)
        .load(config.prompts.file.as_deref())
        .context("Failed to load prompt catalog")?;
    Ok(catalog)
}

fn random_source(seed: Option<u64>) -> Box<dyn RandomSource> {
    match seed {
        Some(seed) => Box::new(RngSource::seeded(seed)),
        None => Box::new(RngSource::thread()),
    }
}

/// Open the editor on the saved draft or a fresh entry
async fn cmd_write(config: &Config, seed: Option<u64>) -> Result<()> {
    debug!(?seed, "cmd_write: called");
    let catalog = load_catalog(config)?;
    let drafts = open_drafts(config)?;
    let form = JournalForm::load(catalog, drafts, random_source(seed)).context("Failed to start journal")?;

    let sink = DirectorySink::new(&config.export.dir);
    let theme = Theme::detect(config.ui.theme);
    let app = App::new(form, Box::new(sink), Box::new(SystemClock), theme);

    tui::run(app, Duration::from_millis(config.ui.tick_ms)).await
}

/// Export the saved draft without opening the editor
fn cmd_export(config: &Config, out_dir: Option<PathBuf>, yes: bool) -> Result<()> {
    debug!(?out_dir, yes, "cmd_export: called");
    let mut form = JournalForm::load(load_catalog(config)?, open_drafts(config)?, random_source(None))
        .context("Failed to open draft")?;
    if !form.was_restored() {
        return Err(eyre::eyre!("No saved draft to export"));
    }
    form.request_export()?;

    let today = SystemClock.today();
    if !yes {
        let doc = form.preview(today);
        println!("{}", doc.body);
        println!("{} would be saved as {} (use --yes to write it)", "→".cyan(), doc.filename.bold());
        return Ok(());
    }

    let mut sink = DirectorySink::new(out_dir.unwrap_or_else(|| config.export.dir.clone()));
    let exported = form.confirm_export(&mut sink, today).context("Failed to export entry")?;
    println!("{} Saved: {}", "✓".green(), exported.path.display());
    if let Some(e) = exported.draft_error {
        eprintln!("{} Draft was kept: {}", "!".yellow(), e);
    }
    Ok(())
}

fn cmd_draft(config: &Config, command: DraftCommand) -> Result<()> {
    debug!(?command, "cmd_draft: called");
    let mut drafts = open_drafts(config)?;
    match command {
        DraftCommand::Show => match drafts.raw()? {
            Some(raw) => {
                let pretty = serde_json::from_str::<serde_json::Value>(&raw)
                    .and_then(|v| serde_json::to_string_pretty(&v))
                    .unwrap_or(raw);
                println!("{}", pretty);
            }
            None => println!("No saved draft"),
        },
        DraftCommand::Discard => {
            drafts.clear()?;
            println!("{} Draft discarded", "✓".green());
        }
    }
    Ok(())
}

fn cmd_prompts(config: &Config, draw: bool, seed: Option<u64>) -> Result<()> {
    debug!(draw, ?seed, "cmd_prompts: called");
    let catalog = load_catalog(config)?;
    if draw {
        let mut rng = random_source(seed);
        for (i, prompt) in draw_initial(&catalog, rng.as_mut())?.iter().enumerate() {
            println!("{}. {}", i + 1, prompt);
        }
    } else {
        for prompt in catalog.prompts() {
            println!("{}", prompt);
        }
        println!("{}", format!("{} prompts", catalog.len()).dimmed());
    }
    Ok(())
}
