//! showwatch CLI
//!
//! One invocation performs one check. Schedule it with cron, a systemd timer,
//! or a CI workflow.

use std::path::PathBuf;

use chrono::{TimeDelta, Utc};
use clap::{Parser, Subcommand};
use showwatch::{
    error::Result,
    models::{Config, Status},
    pipeline::{self, TransitionEngine},
    services::{HttpFetcher, NtfyNotifier},
    storage::{LocalStateStore, StateStore},
};

/// showwatch - Showtimes availability watcher
#[derive(Parser, Debug)]
#[command(
    name = "showwatch",
    version,
    about = "Watches a cinema page for showtimes and pushes ntfy notifications"
)]
struct Cli {
    /// Path to the optional TOML config file
    #[arg(short, long, global = true, default_value = "showwatch.toml")]
    config: PathBuf,

    /// Path to the state file (default: monitor.state_file from config)
    #[arg(long, global = true)]
    state_file: Option<PathBuf>,

    /// Page to watch
    #[arg(long, global = true, env = "SHOWTIMES_URL")]
    url: Option<String>,

    /// ntfy topic to publish to
    #[arg(long, global = true, env = "NTFY_TOPIC")]
    topic: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch the page once and notify on changes (default)
    Check,

    /// Validate configuration without touching the network
    Validate,

    /// Show the persisted state
    Info,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Load `.env` if present. A missing file is fine; a malformed one is
/// reported on stderr since logging is not set up yet.
fn load_dotenv() {
    match dotenvy::dotenv() {
        Ok(_) => {}
        Err(e) if e.not_found() => {}
        Err(e) => eprintln!("Warning: could not load .env: {}", e),
    }
}

/// Render a duration as `<h>h <m>m`.
fn format_remaining(remaining: TimeDelta) -> String {
    let minutes = remaining.num_minutes().max(0);
    format!("{}h {:02}m", minutes / 60, minutes % 60)
}

/// Main entry point for the CLI application.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Values from .env must be visible before clap reads the environment.
    load_dotenv();

    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = Config::load_or_default(&cli.config).with_overrides(cli.url, cli.topic);
    if let Some(path) = cli.state_file {
        config.monitor.state_file = path;
    }
    let store = LocalStateStore::new(&config.monitor.state_file);

    match cli.command.unwrap_or(Command::Check) {
        Command::Check => {
            if let Err(e) = config.validate() {
                log::error!("❌ {}", e);
                return Err(e);
            }

            let fetcher = HttpFetcher::new(&config.fetch)?;
            let notifier = NtfyNotifier::new(&config.notifier)?;

            let now = Utc::now();
            let result = pipeline::run_check(&config, &store, &fetcher, &notifier, now).await;
            let report = match result {
                Ok(report) => report,
                Err(e) => {
                    log::error!("Check failed: {}", e);
                    return Err(e);
                }
            };

            match (&report.notified, &report.delivery) {
                (Some(kind), Some(outcome)) => {
                    log::info!("Notification: {} ({:?})", kind, outcome)
                }
                _ => log::info!("Notification: none"),
            }
            let saved = if report.persisted { "" } else { " (not saved)" };
            log::info!(
                "Status: {} -> {}{}",
                report.previous.status.as_str(),
                report.state.status.as_str(),
                saved
            );
        }

        Command::Validate => {
            log::info!("Validating configuration...");

            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            log::info!("✓ Config OK");
            log::info!("URL: {}", config.monitor.url);
            log::info!("Marker: {}", config.monitor.marker);
            log::info!("Cooldown: {} minutes", config.monitor.cooldown_minutes);
            log::info!(
                "Notifications: {}{}",
                config.notifier.server_url()?,
                config.notifier.topic
            );
        }

        Command::Info => {
            log::info!("State file: {}", store.path().display());
            if !store.path().exists() {
                log::info!("No state saved yet.");
                return Ok(());
            }

            let state = store.load().await;
            let engine = TransitionEngine::from_config(&config);
            log::info!("Status: {}", state.status.as_str());
            log::info!("Last reminder: {}", state.last_not_found_at.to_rfc3339());
            if state.status == Status::NotFound {
                let remaining = engine.time_until_reminder(&state, Utc::now());
                log::info!("Next reminder in: {}", format_remaining(remaining));
            }
        }
    }

    Ok(())
}
