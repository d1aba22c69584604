mod app;

use anyhow::{Context, Result};
use std::{
    fs::{self, OpenOptions},
    io,
    path::Path,
    sync::Mutex,
};

use backpack_core::{AppConfig, Backpack};
use tracing::info;
use tracing_subscriber::{prelude::*, EnvFilter};

fn main() -> Result<()> {
    let config = AppConfig::load()?;
    init_logging(&config.log_dir)?;
    info!(log_dir = %config.log_dir.display(), "Backpack started");

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut app = app::BackpackApp::new(
        stdin.lock(),
        stdout.lock(),
        Backpack::new(),
        config.field_limits(),
    );
    app.run()
}

fn init_logging(log_dir: &Path) -> Result<()> {
    fs::create_dir_all(log_dir)
        .with_context(|| format!("failed to create log directory {}", log_dir.display()))?;
    let log_path = log_dir.join("backpack.log");
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("failed to open log file {}", log_path.display()))?;

    let env_filter = EnvFilter::from_default_env();

    // stdout carries the menu, so console logging goes to stderr.
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .compact()
        .with_writer(io::stderr);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_ansi(false)
        .compact()
        .with_writer(Mutex::new(log_file));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    Ok(())
}
