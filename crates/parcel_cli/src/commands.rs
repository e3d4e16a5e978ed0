//! Subcommand implementations.
//!
//! Commands write to a caller-provided sink so the same code backs stdout
//! and tests.

use crate::{Commands, DemoArgs, OutputFormat};
use anyhow::{Context, Result};
use parcel_core::{
    ClientId, Parcel, ParcelNumber, ParcelRepository, ParcelService, ParcelStatus, RepoError,
};
use serde_json::json;
use std::io::Write;

/// Runs one subcommand against `service`.
pub fn execute<R: ParcelRepository>(
    command: Commands,
    service: &ParcelService<R>,
    format: OutputFormat,
    out: &mut impl Write,
) -> Result<()> {
    match command {
        Commands::Demo(args) => demo(&args, service, format, out),
        Commands::Register(args) => {
            let parcel = service.register(args.client, args.address)?;
            print_parcel(&parcel, format, out)
        }
        Commands::List(args) => print_client_parcels(service, args.client, format, out),
        Commands::Show(args) => {
            let parcel = service.get(args.number)?;
            print_parcel(&parcel, format, out)
        }
        Commands::Advance(args) => {
            let status = service.advance_status(args.number)?;
            print_status(args.number, status, format, out)
        }
        Commands::ChangeAddress(args) => {
            service.change_address(args.number, &args.address)?;
            let parcel = service.get(args.number)?;
            print_parcel(&parcel, format, out)
        }
        Commands::Delete(args) => {
            service.delete(args.number)?;
            match format {
                OutputFormat::Text => writeln!(out, "parcel #{} deleted", args.number)?,
                OutputFormat::Json => {
                    writeln!(out, "{}", json!({ "number": args.number, "deleted": true }))?
                }
            }
            Ok(())
        }
    }
}

/// Walkthrough of the whole lifecycle, including the rejected delete of a
/// parcel that was already sent.
fn demo<R: ParcelRepository>(
    args: &DemoArgs,
    service: &ParcelService<R>,
    format: OutputFormat,
    out: &mut impl Write,
) -> Result<()> {
    let parcel = service
        .register(args.client, args.address.as_str())
        .context("register demo parcel")?;
    print_parcel(&parcel, format, out)?;

    service
        .change_address(parcel.number, &args.new_address)
        .context("change demo parcel address")?;

    let status = service
        .advance_status(parcel.number)
        .context("advance demo parcel")?;
    print_status(parcel.number, status, format, out)?;

    print_client_parcels(service, args.client, format, out)?;

    // The sent parcel must survive this attempt.
    report_rejection(service.delete(parcel.number), parcel.number, out)?;
    print_client_parcels(service, args.client, format, out)?;

    let second = service
        .register(args.client, args.address.as_str())
        .context("register second demo parcel")?;
    print_parcel(&second, format, out)?;
    service
        .delete(second.number)
        .context("delete second demo parcel")?;

    print_client_parcels(service, args.client, format, out)
}

fn report_rejection(
    result: Result<(), RepoError>,
    number: ParcelNumber,
    out: &mut impl Write,
) -> Result<()> {
    match result {
        Ok(()) => Ok(()),
        Err(err @ RepoError::PreconditionFailed { .. }) => {
            writeln!(out, "parcel #{number} kept: {err}")?;
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}

fn print_client_parcels<R: ParcelRepository>(
    service: &ParcelService<R>,
    client: ClientId,
    format: OutputFormat,
    out: &mut impl Write,
) -> Result<()> {
    let parcels = service.list_by_client(client)?;
    match format {
        OutputFormat::Text => {
            writeln!(out, "parcels of client {client}:")?;
            for parcel in &parcels {
                writeln!(out, "  {parcel}")?;
            }
            writeln!(out)?;
        }
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string(&parcels)?)?,
    }
    Ok(())
}

fn print_parcel(parcel: &Parcel, format: OutputFormat, out: &mut impl Write) -> Result<()> {
    match format {
        OutputFormat::Text => writeln!(out, "{parcel}")?,
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string(parcel)?)?,
    }
    Ok(())
}

fn print_status(
    number: ParcelNumber,
    status: ParcelStatus,
    format: OutputFormat,
    out: &mut impl Write,
) -> Result<()> {
    match format {
        OutputFormat::Text => writeln!(out, "parcel #{number} status: {status}")?,
        OutputFormat::Json => writeln!(out, "{}", json!({ "number": number, "status": status }))?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::execute;
    use crate::{ClientArgs, Commands, DemoArgs, NumberArgs, OutputFormat, RegisterArgs};
    use parcel_core::db::open_db_in_memory;
    use parcel_core::{Parcel, ParcelService, ParcelStatus, SqliteParcelRepository};

    fn run(
        service: &ParcelService<SqliteParcelRepository<'_>>,
        command: Commands,
        format: OutputFormat,
    ) -> String {
        let mut out = Vec::new();
        execute(command, service, format, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn demo_keeps_sent_parcel_and_removes_registered_one() {
        let conn = open_db_in_memory().unwrap();
        let service = ParcelService::new(SqliteParcelRepository::try_new(&conn).unwrap());

        let output = run(
            &service,
            Commands::Demo(DemoArgs {
                client: 7,
                address: "Old Rd 1".to_string(),
                new_address: "New Rd 2".to_string(),
            }),
            OutputFormat::Text,
        );
        assert!(output.contains("kept"), "missing rejection line:\n{output}");

        let remaining = service.list_by_client(7).unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].status, ParcelStatus::Sent);
        assert_eq!(remaining[0].address, "New Rd 2");
    }

    #[test]
    fn register_and_list_emit_json() {
        let conn = open_db_in_memory().unwrap();
        let service = ParcelService::new(SqliteParcelRepository::try_new(&conn).unwrap());

        let output = run(
            &service,
            Commands::Register(RegisterArgs {
                client: 4,
                address: "Quay 8".to_string(),
            }),
            OutputFormat::Json,
        );
        let registered: Parcel = serde_json::from_str(output.trim()).unwrap();
        assert_eq!(registered.address, "Quay 8");

        let output = run(
            &service,
            Commands::List(ClientArgs { client: 4 }),
            OutputFormat::Json,
        );
        let listed: Vec<Parcel> = serde_json::from_str(output.trim()).unwrap();
        assert_eq!(listed, vec![registered]);
    }

    #[test]
    fn advance_reports_new_status() {
        let conn = open_db_in_memory().unwrap();
        let service = ParcelService::new(SqliteParcelRepository::try_new(&conn).unwrap());
        let number = service.register(1, "A").unwrap().number;

        let output = run(
            &service,
            Commands::Advance(NumberArgs { number }),
            OutputFormat::Text,
        );
        assert_eq!(output, format!("parcel #{number} status: sent\n"));
    }

    #[test]
    fn delete_of_sent_parcel_fails() {
        let conn = open_db_in_memory().unwrap();
        let service = ParcelService::new(SqliteParcelRepository::try_new(&conn).unwrap());
        let number = service.register(1, "A").unwrap().number;
        service.advance_status(number).unwrap();

        let mut out = Vec::new();
        let err = execute(
            Commands::Delete(NumberArgs { number }),
            &service,
            OutputFormat::Text,
            &mut out,
        )
        .unwrap_err();
        assert!(err.to_string().contains("only `registered`"));
        assert!(out.is_empty());
    }
}
