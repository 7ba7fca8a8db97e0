// postdesk - terminal client for a posts/comments API
//
// Architecture:
// - TUI (ratatui): post list + post details with comments
// - Network worker (reqwest): performs the remote calls off the render loop
// - Store: comment-loading state machine for the current selection
// - Event system: mpsc channels connect the TUI and the worker

mod api;
mod cli;
mod config;
mod events;
mod logging;
mod store;
mod theme;
mod tui;
mod worker;

use anyhow::Result;
use api::ApiClient;
use config::{Config, LogRotation};
use logging::{LogBuffer, TuiLogLayer};
use tokio::sync::mpsc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Handle CLI commands first (config --show, --reset, --edit, --path)
    // If a command was handled, exit early
    if cli::handle_cli() {
        return Ok(());
    }

    // Ensure config template exists (helps users discover options)
    Config::ensure_config_exists();

    let config = Config::from_env();

    // Logs go to an in-memory buffer the TUI renders; writing to stdout
    // would garble the alternate screen.
    let log_buffer = LogBuffer::new();

    // Precedence: RUST_LOG env var > config file > default "info"
    let default_filter = format!("postdesk={}", config.logging.level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    // Optional rotating JSON file logs. The guard must stay alive for the
    // duration of the program so buffered lines flush on exit.
    let mut _file_guard: Option<tracing_appender::non_blocking::WorkerGuard> = None;
    let file_layer = if config.logging.file_enabled {
        match std::fs::create_dir_all(&config.logging.file_dir) {
            Ok(()) => {
                let appender = match config.logging.file_rotation {
                    LogRotation::Hourly => tracing_appender::rolling::hourly(
                        &config.logging.file_dir,
                        &config.logging.file_prefix,
                    ),
                    LogRotation::Daily => tracing_appender::rolling::daily(
                        &config.logging.file_dir,
                        &config.logging.file_prefix,
                    ),
                    LogRotation::Never => tracing_appender::rolling::never(
                        &config.logging.file_dir,
                        &config.logging.file_prefix,
                    ),
                };
                let (non_blocking, guard) = tracing_appender::non_blocking(appender);
                _file_guard = Some(guard);
                Some(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(non_blocking)
                        .with_ansi(false),
                )
            }
            Err(e) => {
                eprintln!(
                    "Warning: Could not create log directory {:?}: {}",
                    config.logging.file_dir, e
                );
                None
            }
        }
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(TuiLogLayer::new(log_buffer.clone()))
        .with(file_layer)
        .init();

    tracing::info!("Using API at {}", config.api_url);

    // Channels between the TUI and the network worker
    let (command_tx, command_rx) = mpsc::channel(64);
    let (event_tx, event_rx) = mpsc::channel(256);

    // Spawn the network worker
    let client = ApiClient::new(&config.api_url, config.timeout_secs)?;
    let user_id = config.user_id;
    let worker_handle = tokio::spawn(async move {
        worker::run(client, command_rx, event_tx, user_id).await;
    });

    // Run the TUI in the main task; blocks until the user quits
    if let Err(e) = tui::run_tui(event_rx, command_tx, log_buffer, config).await {
        tracing::error!("TUI error: {:?}", e);
    }

    // The TUI dropped its command sender, so the worker's recv loop ends
    let _ = worker_handle.await;

    tracing::info!("Shutdown complete");
    Ok(())
}
