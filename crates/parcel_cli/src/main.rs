//! `parcels` binary entry point.

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use parcel_cli::{commands, Cli};
use parcel_core::db::open_db;
use parcel_core::{init_logging, ParcelService, SqliteParcelRepository};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.config();

    if let Some(log_dir) = config.log_dir.as_deref() {
        init_logging(&config.log_level, log_dir).map_err(|err| anyhow!(err))?;
    }

    let conn = open_db(&config.db_path)
        .with_context(|| format!("open parcel database `{}`", config.db_path.display()))?;
    let repo = SqliteParcelRepository::try_new(&conn)?;
    let service = ParcelService::new(repo);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    commands::execute(cli.command, &service, config.format, &mut out)
}
