//! launchdash: an interactive dashboard over historical launch records.
//!
//! Loads the launch table once at startup, then hands it to one of two
//! hosts: a keyboard-driven terminal dashboard (`show`) or a local web
//! server (`serve`). Both render the same success pie and payload scatter.

mod app;
mod cli;
mod dashboard;
mod data;
mod ui;
mod web;

use std::fs::File;
use std::path::Path;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use cli::{AppConfig, Cli, Commands};
use dashboard::Dashboard;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse_args();

    match cli.command {
        Commands::Show {
            data,
            color_palette,
            log_file,
        } => {
            let config = AppConfig::from_show_command(data, color_palette, log_file, cli.log_level);
            if let Some(path) = &config.log_file {
                init_file_logging(&config.app.log_level, path)?;
            }

            let dashboard = load_dashboard(&config.app)?;

            // Run the TUI application
            app::run(dashboard)?;
        }
        Commands::Serve {
            data,
            color_palette,
            host,
            port,
        } => {
            let config =
                AppConfig::from_serve_command(data, color_palette, host, port, cli.log_level);
            init_stderr_logging(&config.app.log_level);

            let dashboard = Arc::new(load_dashboard(&config.app)?);

            let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
            runtime.block_on(web::serve(dashboard, config.addr))?;
        }
    }

    Ok(())
}

/// Load the launch table and derive the dashboard state from it
fn load_dashboard(config: &AppConfig) -> Result<Dashboard> {
    let table = data::load_csv(&config.data_path)
        .with_context(|| format!("Failed to load launch records from {:?}", config.data_path))?;

    let bounds = table.bounds();
    info!(
        path = %config.data_path.display(),
        rows = table.len(),
        sites = table.sites().len(),
        min_payload = bounds.min,
        max_payload = bounds.max,
        "launch table loaded"
    );

    Ok(Dashboard::new(table, config.palette.clone()))
}

fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

fn init_stderr_logging(level: &str) {
    fmt()
        .with_env_filter(env_filter(level))
        .with_target(true)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

/// The terminal dashboard owns the screen, so its logs go to a file
fn init_file_logging(level: &str, path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("Failed to create log file {path:?}"))?;
    fmt()
        .with_env_filter(env_filter(level))
        .with_target(true)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}
