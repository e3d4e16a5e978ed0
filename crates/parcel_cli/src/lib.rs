//! # parcel_cli
//!
//! Command-line driver for the parcel store.
//!
//! ## Configuration
//!
//! Every setting can be given as a flag or through the environment:
//!
//! - `PARCELS_DB_PATH` - SQLite file (default: `parcels.db`)
//! - `PARCELS_LOG_LEVEL` - `trace|debug|info|warn|error`
//! - `PARCELS_LOG_DIR` - absolute directory for rolling log files; file
//!   logging stays off when unset

pub mod commands;

use clap::{Args, Parser, Subcommand};
use parcel_core::{ClientId, ParcelNumber};
use std::path::PathBuf;

/// Parcel tracker command-line interface.
#[derive(Debug, Parser)]
#[command(name = "parcels")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// SQLite database file.
    #[arg(long, env = "PARCELS_DB_PATH", default_value = "parcels.db")]
    pub db: PathBuf,

    /// Log level for file logging.
    #[arg(long, env = "PARCELS_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Absolute directory for rolling log files.
    #[arg(long, env = "PARCELS_LOG_DIR")]
    pub log_dir: Option<String>,

    /// Output format.
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Get the effective configuration.
    pub fn config(&self) -> Config {
        Config {
            db_path: self.db.clone(),
            log_level: self
                .log_level
                .clone()
                .unwrap_or_else(|| parcel_core::default_log_level().to_string()),
            log_dir: self.log_dir.clone(),
            format: self.format,
        }
    }
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the register / change / advance / delete walkthrough.
    Demo(DemoArgs),
    /// Register a new parcel.
    Register(RegisterArgs),
    /// List parcels of one client.
    List(ClientArgs),
    /// Show one parcel.
    Show(NumberArgs),
    /// Move a parcel to its next status.
    Advance(NumberArgs),
    /// Change the address of a registered parcel.
    ChangeAddress(ChangeAddressArgs),
    /// Delete a registered parcel.
    Delete(NumberArgs),
}

/// Arguments for `demo`.
#[derive(Debug, Args)]
pub struct DemoArgs {
    /// Client owning the demo parcels.
    #[arg(long, default_value_t = 1)]
    pub client: ClientId,
    /// Initial delivery address.
    #[arg(long, default_value = "Pskov, Pushkin St 5")]
    pub address: String,
    /// Address used for the change step.
    #[arg(long, default_value = "Saratov, Kozlov St 25")]
    pub new_address: String,
}

/// Arguments for `register`.
#[derive(Debug, Args)]
pub struct RegisterArgs {
    /// Owning client id.
    #[arg(long)]
    pub client: ClientId,
    /// Delivery address.
    #[arg(long)]
    pub address: String,
}

/// Arguments selecting one client.
#[derive(Debug, Args)]
pub struct ClientArgs {
    /// Client id.
    #[arg(long)]
    pub client: ClientId,
}

/// Arguments selecting one parcel.
#[derive(Debug, Args)]
pub struct NumberArgs {
    /// Parcel number.
    #[arg(long)]
    pub number: ParcelNumber,
}

/// Arguments for `change-address`.
#[derive(Debug, Args)]
pub struct ChangeAddressArgs {
    /// Parcel number.
    #[arg(long)]
    pub number: ParcelNumber,
    /// New delivery address.
    #[arg(long)]
    pub address: String,
}

/// Output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output.
    Json,
}

/// CLI configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite database file.
    pub db_path: PathBuf,
    /// Effective log level.
    pub log_level: String,
    /// Log directory; `None` keeps file logging off.
    pub log_dir: Option<String>,
    /// Output format.
    pub format: OutputFormat,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_uses_defaults() {
        let cli = Cli::parse_from(["parcels", "list", "--client", "3"]);
        let config = cli.config();

        assert_eq!(config.db_path, PathBuf::from("parcels.db"));
        assert_eq!(config.log_level, parcel_core::default_log_level());
        assert!(config.log_dir.is_none());
        assert_eq!(config.format, OutputFormat::Text);
        assert!(matches!(cli.command, Commands::List(ClientArgs { client: 3 })));
    }

    #[test]
    fn config_from_flags() {
        let cli = Cli::parse_from([
            "parcels",
            "--db",
            "/tmp/other.db",
            "--log-level",
            "warn",
            "--log-dir",
            "/var/log/parcels",
            "--format",
            "json",
            "change-address",
            "--number",
            "12",
            "--address",
            "Dock 4",
        ]);
        let config = cli.config();

        assert_eq!(config.db_path, PathBuf::from("/tmp/other.db"));
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.log_dir.as_deref(), Some("/var/log/parcels"));
        assert_eq!(config.format, OutputFormat::Json);
        match cli.command {
            Commands::ChangeAddress(args) => {
                assert_eq!(args.number, 12);
                assert_eq!(args.address, "Dock 4");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn demo_has_default_arguments() {
        let cli = Cli::parse_from(["parcels", "demo"]);
        match cli.command {
            Commands::Demo(args) => {
                assert_eq!(args.client, 1);
                assert_ne!(args.address, args.new_address);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
