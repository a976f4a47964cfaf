//! selfhelp - command-line client for the selfhelp wellbeing tracker.
//!
//! Restores the saved session on every start, then runs one command
//! against the backend: sign in or out, or list diaries, habits, goals,
//! messages and the progress dashboard.

mod commands;

use std::io;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use selfhelp_core::{ApiClient, Config, SessionManager};

/// Log file name in the data directory
const LOG_FILE_NAME: &str = "selfhelp.log";

/// selfhelp - mood diary, habits, goals and messages from the terminal.
#[derive(Parser)]
#[command(name = "selfhelp")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,

    /// Also write logs to selfhelp.log in the data directory
    #[arg(long, global = true)]
    log_file: bool,

    /// Override the configured backend base URL
    #[arg(long, global = true)]
    base_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show who is signed in
    Status,

    /// Complete a sign-in with a token from the identity provider
    Login {
        /// Identity token issued by the provider
        #[arg(long)]
        id_token: String,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        image_url: Option<String>,
    },

    /// Sign out and forget the saved session
    Logout,

    /// List diary entries
    Diaries {
        /// Show everyone's public entries instead of your own
        #[arg(long)]
        public: bool,
        #[arg(long, default_value_t = 0)]
        page: u32,
        #[arg(long, default_value_t = selfhelp_core::services::DEFAULT_PAGE_SIZE)]
        size: u32,
    },

    /// List habits, or show one habit with its recent logs
    Habits {
        id: Option<i64>,
    },

    /// List goals, or show one goal with its recent progress
    Goals {
        id: Option<i64>,
    },

    /// List board messages, or show one message with its comments
    Messages {
        id: Option<i64>,
        #[arg(long, default_value_t = 0)]
        page: u32,
        #[arg(long, default_value_t = selfhelp_core::services::DEFAULT_PAGE_SIZE)]
        size: u32,
    },

    /// Print the habit and goal dashboards
    Dashboard,
}

/// Initialize the tracing subscriber for logging
fn init_tracing(level: &str, log_file: bool) -> Option<WorkerGuard> {
    // RUST_LOG wins over --log-level
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let (file_layer, guard) = match log_file.then(log_dir).flatten() {
        Some(dir) => {
            let appender = tracing_appender::rolling::never(dir, LOG_FILE_NAME);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (
                Some(fmt::layer().with_ansi(false).with_writer(writer)),
                Some(guard),
            )
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(file_layer)
        .with(filter)
        .init();

    guard
}

fn log_dir() -> Option<std::path::PathBuf> {
    selfhelp_core::store::FileStore::default_path()
        .ok()
        .and_then(|p| p.parent().map(|d| d.to_path_buf()))
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let _log_guard = init_tracing(&cli.log_level, cli.log_file);
    info!("selfhelp starting");

    let mut config = Config::load_or_default();
    if let Some(url) = cli.base_url {
        config.api_base_url = url;
    }
    debug!(base_url = %config.api_base_url, store = ?config.store, "Config loaded");

    let store = config.open_store()?;
    let api = ApiClient::from_config(&config, store.clone())?;
    let session = SessionManager::new(store, Arc::new(api.clone()));

    // Nothing below runs until the saved session has been read
    let state = session.restore().await;
    debug!(authenticated = state.is_authenticated(), "Session ready");

    commands::run(cli.command, &api, &session).await
}
