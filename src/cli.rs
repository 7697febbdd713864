//! Command-line interface argument parsing for launchdash.
//!
//! - `launchdash show --data launches.csv` opens the terminal dashboard
//! - `launchdash serve --port 8050` serves the web dashboard
//! - `launchdash serve --color-palette "#FF0000,#00FF00,#0000FF"`

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::dashboard::Palette;

/// Environment variable consulted when `--data` is not given
pub const DATA_ENV_VAR: &str = "LAUNCHDASH_DATA";
/// File name looked up in the working directory as a last resort
pub const DEFAULT_DATA_FILE: &str = "spacex_launch_dash.csv";

/// An interactive dashboard for exploring launch records by site and payload.
#[derive(Parser, Debug)]
#[command(name = "launchdash")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Log filter (e.g. "info", "launchdash=debug"); RUST_LOG takes precedence
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Open the dashboard in the terminal
    Show {
        /// Path to the launch records CSV
        #[arg(short, long)]
        data: Option<String>,

        /// Comma-separated hex color palette for sites and booster categories
        /// Example: "#FF0000,#00FF00,#0000FF"
        #[arg(short, long)]
        color_palette: Option<String>,

        /// Write logs to this file (the terminal is taken by the dashboard)
        #[arg(long)]
        log_file: Option<String>,
    },

    /// Serve the dashboard over HTTP
    Serve {
        /// Path to the launch records CSV
        #[arg(short, long)]
        data: Option<String>,

        /// Comma-separated hex color palette for sites and booster categories
        #[arg(short, long)]
        color_palette: Option<String>,

        /// Address to bind
        #[arg(long, default_value = "127.0.0.1")]
        host: IpAddr,

        /// Port to listen on
        #[arg(short, long, default_value = "8050")]
        port: u16,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data_path: PathBuf,
    pub palette: Palette,
    pub log_level: String,
}

/// Configuration for the terminal dashboard
#[derive(Debug, Clone)]
pub struct ShowConfig {
    pub app: AppConfig,
    pub log_file: Option<PathBuf>,
}

/// Configuration for the web dashboard
#[derive(Debug, Clone)]
pub struct ServeConfig {
    pub app: AppConfig,
    pub addr: SocketAddr,
}

impl AppConfig {
    fn new(data: Option<String>, color_palette: Option<String>, log_level: String) -> Self {
        // Parse color palette
        let palette = color_palette
            .map(|p| {
                Palette::new(
                    p.split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect(),
                )
            })
            .unwrap_or_default();

        // Determine data path
        let data_path = data.map(PathBuf::from).unwrap_or_else(|| {
            // Check LAUNCHDASH_DATA environment variable first
            std::env::var(DATA_ENV_VAR)
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATA_FILE))
        });

        AppConfig {
            data_path,
            palette,
            log_level,
        }
    }

    /// Create config for the `show` subcommand
    pub fn from_show_command(
        data: Option<String>,
        color_palette: Option<String>,
        log_file: Option<String>,
        log_level: String,
    ) -> ShowConfig {
        ShowConfig {
            app: AppConfig::new(data, color_palette, log_level),
            log_file: log_file.map(PathBuf::from),
        }
    }

    /// Create config for the `serve` subcommand
    pub fn from_serve_command(
        data: Option<String>,
        color_palette: Option<String>,
        host: IpAddr,
        port: u16,
        log_level: String,
    ) -> ServeConfig {
        ServeConfig {
            app: AppConfig::new(data, color_palette, log_level),
            addr: SocketAddr::new(host, port),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_show_config() {
        let config = AppConfig::from_show_command(
            Some("launches.csv".to_string()),
            None,
            None,
            "info".to_string(),
        );
        assert_eq!(config.app.data_path, PathBuf::from("launches.csv"));
        assert_eq!(config.app.palette, Palette::default());
        assert!(config.log_file.is_none());
    }

    #[test]
    fn test_custom_colors() {
        let config = AppConfig::from_show_command(
            Some("launches.csv".to_string()),
            Some("#FF0000, #00FF00".to_string()),
            None,
            "info".to_string(),
        );
        assert_eq!(config.app.palette.len(), 2);
        assert_eq!(config.app.palette.color(0), "#FF0000");
        assert_eq!(config.app.palette.color(1), "#00FF00");
    }

    #[test]
    fn test_serve_address() {
        let config = AppConfig::from_serve_command(
            Some("launches.csv".to_string()),
            None,
            "0.0.0.0".parse().unwrap(),
            9000,
            "debug".to_string(),
        );
        assert_eq!(config.addr.to_string(), "0.0.0.0:9000");
        assert_eq!(config.app.log_level, "debug");
    }

    #[test]
    fn test_parse_serve_defaults() {
        let cli = Cli::try_parse_from(["launchdash", "serve"]).unwrap();
        assert_eq!(cli.log_level, "info");
        match cli.command {
            Commands::Serve { host, port, data, .. } => {
                assert_eq!(host.to_string(), "127.0.0.1");
                assert_eq!(port, 8050);
                assert!(data.is_none());
            }
            other => panic!("expected serve, got {other:?}"),
        }
    }
}
