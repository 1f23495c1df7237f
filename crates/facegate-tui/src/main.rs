//! `facegate`: terminal front end for face registration and sign-in.
//!
//! Three pages (Home, Register, Sign In) navigable by number keys 1-3. The
//! pages render the element model from `facegate-core`; key presses are
//! turned into element interactions and dispatched to the bound handlers.
//!
//! Logs are written to a file (default `/tmp/facegate.log`) so they never
//! corrupt the terminal UI.

mod action;
mod app;
mod component;
mod event;
mod screen;
mod screens;
mod theme;
mod tui;

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use facegate_core::Frontend;

use crate::app::App;
use crate::event::Pacing;

/// Register a face, then sign in with a photo.
#[derive(Parser, Debug)]
#[command(name = "facegate", version, about)]
struct Cli {
    /// Backend base URL (e.g., http://127.0.0.1:8000)
    #[arg(short = 's', long, env = "FACEGATE_SERVER")]
    server: Option<String>,

    /// Config file (defaults to the platform config directory)
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Log file path
    #[arg(long, default_value = "/tmp/facegate.log")]
    log_file: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// File-based tracing; stdout belongs to the TUI. Hold the returned guard
/// for the lifetime of the app so buffered lines are flushed.
fn setup_tracing(cli: &Cli) -> WorkerGuard {
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "facegate_tui={log_level},facegate_core={log_level},facegate_api={log_level}"
        ))
    });

    let log_dir = cli
        .log_file
        .parent()
        .unwrap_or(std::path::Path::new("/tmp"));
    let log_filename = cli
        .log_file
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("facegate.log"));

    let file_appender = tracing_appender::rolling::never(log_dir, log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true),
        )
        .init();

    guard
}

/// Config file, then environment, then CLI flags.
fn build_frontend(cli: &Cli) -> Result<(Frontend, Pacing)> {
    let path = cli
        .config
        .clone()
        .unwrap_or_else(facegate_config::config_path);
    let mut cfg = facegate_config::load_config_at(&path)
        .wrap_err_with(|| format!("loading {}", path.display()))?;

    if let Some(server) = &cli.server {
        cfg.server.clone_from(server);
    }

    let frontend_config = cfg.to_frontend_config()?;
    let (tick, render) = cfg.terminal.intervals()?;
    let frontend = Frontend::new(frontend_config)?;
    frontend.bind_defaults();
    Ok((frontend, Pacing { tick, render }))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tui::install_hooks()?;

    let _log_guard = setup_tracing(&cli);

    let (frontend, pacing) = build_frontend(&cli)?;
    info!(
        server = %frontend.controller().client().base_url(),
        "starting facegate"
    );

    let mut app = App::new(frontend, pacing);
    app.run().await?;

    Ok(())
}
