//! Parcel repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD APIs over the `parcels` table.
//! - Enforce the two state-dependent write guards (address change, delete).
//!
//! # Invariants
//! - Guarded writes are a single statement filtered by both `number` and
//!   `status = 'registered'`; a follow-up read only classifies a rejection.
//! - `set_status` performs no ordering check; that policy lives in the
//!   service layer.
//! - Read paths reject unknown persisted status values instead of masking
//!   them.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::parcel::{ClientId, NewParcel, Parcel, ParcelNumber, ParcelStatus};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const PARCEL_SELECT_SQL: &str = "SELECT
    number,
    client,
    status,
    address,
    created_at
FROM parcels";

const PARCEL_COLUMNS: [&str; 5] = ["number", "client", "status", "address", "created_at"];

pub type RepoResult<T> = Result<T, RepoError>;

/// Errors from parcel store operations.
#[derive(Debug)]
pub enum RepoError {
    /// Underlying SQLite/bootstrap failure.
    Db(DbError),
    /// No parcel with this number exists.
    NotFound(ParcelNumber),
    /// Address change or delete attempted outside the `registered` state.
    PreconditionFailed {
        number: ParcelNumber,
        status: ParcelStatus,
    },
    /// Connection schema is not at the expected migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Required table is missing.
    MissingRequiredTable(&'static str),
    /// Required column is missing from expected table.
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
    /// Persisted row cannot be converted into a valid parcel.
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(number) => write!(f, "parcel not found: {number}"),
            Self::PreconditionFailed { number, status } => write!(
                f,
                "parcel {number} is `{status}`; only `registered` parcels can be changed or deleted"
            ),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "parcel repository requires schema version {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "parcel repository requires table `{table}`")
            }
            Self::MissingRequiredColumn { table, column } => write!(
                f,
                "parcel repository requires column `{column}` in table `{table}`"
            ),
            Self::InvalidData(message) => write!(f, "invalid persisted parcel data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for parcel persistence.
pub trait ParcelRepository {
    /// Stores a new parcel and returns its assigned number.
    fn add(&self, parcel: &NewParcel) -> RepoResult<ParcelNumber>;
    /// Loads one parcel, `NotFound` when absent.
    fn get(&self, number: ParcelNumber) -> RepoResult<Parcel>;
    /// Lists all parcels of one client; empty when there are none.
    fn list_by_client(&self, client: ClientId) -> RepoResult<Vec<Parcel>>;
    /// Overwrites status without checking transition order.
    fn set_status(&self, number: ParcelNumber, status: ParcelStatus) -> RepoResult<()>;
    /// Changes address of a `registered` parcel.
    fn set_address(&self, number: ParcelNumber, address: &str) -> RepoResult<()>;
    /// Removes a `registered` parcel.
    fn delete(&self, number: ParcelNumber) -> RepoResult<()>;
}

impl<R: ParcelRepository + ?Sized> ParcelRepository for &R {
    fn add(&self, parcel: &NewParcel) -> RepoResult<ParcelNumber> {
        (**self).add(parcel)
    }

    fn get(&self, number: ParcelNumber) -> RepoResult<Parcel> {
        (**self).get(number)
    }

    fn list_by_client(&self, client: ClientId) -> RepoResult<Vec<Parcel>> {
        (**self).list_by_client(client)
    }

    fn set_status(&self, number: ParcelNumber, status: ParcelStatus) -> RepoResult<()> {
        (**self).set_status(number, status)
    }

    fn set_address(&self, number: ParcelNumber, address: &str) -> RepoResult<()> {
        (**self).set_address(number, address)
    }

    fn delete(&self, number: ParcelNumber) -> RepoResult<()> {
        (**self).delete(number)
    }
}

/// SQLite-backed parcel repository.
pub struct SqliteParcelRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteParcelRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    ///
    /// # Errors
    /// - `UninitializedConnection` when migrations were not applied.
    /// - `MissingRequiredTable` / `MissingRequiredColumn` when the schema does
    ///   not have the expected `parcels` shape.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_parcel_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl ParcelRepository for SqliteParcelRepository<'_> {
    fn add(&self, parcel: &NewParcel) -> RepoResult<ParcelNumber> {
        self.conn.execute(
            "INSERT INTO parcels (
                client,
                status,
                address,
                created_at
            ) VALUES (?1, ?2, ?3, ?4);",
            params![
                parcel.client,
                parcel.status.as_str(),
                parcel.address.as_str(),
                parcel.created_at.as_str(),
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn get(&self, number: ParcelNumber) -> RepoResult<Parcel> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PARCEL_SELECT_SQL} WHERE number = ?1;"))?;

        let mut rows = stmt.query([number])?;
        match rows.next()? {
            Some(row) => parse_parcel_row(row),
            None => Err(RepoError::NotFound(number)),
        }
    }

    fn list_by_client(&self, client: ClientId) -> RepoResult<Vec<Parcel>> {
        let mut stmt = self.conn.prepare(&format!(
            "{PARCEL_SELECT_SQL}
             WHERE client = ?1
             ORDER BY number ASC;"
        ))?;

        let mut rows = stmt.query([client])?;
        let mut parcels = Vec::new();
        while let Some(row) = rows.next()? {
            parcels.push(parse_parcel_row(row)?);
        }

        Ok(parcels)
    }

    fn set_status(&self, number: ParcelNumber, status: ParcelStatus) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE parcels
             SET status = ?2
             WHERE number = ?1;",
            params![number, status.as_str()],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(number));
        }

        Ok(())
    }

    fn set_address(&self, number: ParcelNumber, address: &str) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE parcels
             SET address = ?2
             WHERE number = ?1
               AND status = 'registered';",
            params![number, address],
        )?;

        if changed == 0 {
            return Err(classify_guard_rejection(self.conn, number)?);
        }

        Ok(())
    }

    fn delete(&self, number: ParcelNumber) -> RepoResult<()> {
        let changed = self.conn.execute(
            "DELETE FROM parcels
             WHERE number = ?1
               AND status = 'registered';",
            [number],
        )?;

        if changed == 0 {
            return Err(classify_guard_rejection(self.conn, number)?);
        }

        Ok(())
    }
}

/// Explains why a guarded write touched no row.
///
/// Runs after the write, so it only picks the error kind; it never decides
/// whether the write happens.
fn classify_guard_rejection(conn: &Connection, number: ParcelNumber) -> RepoResult<RepoError> {
    let status: Option<String> = conn
        .query_row(
            "SELECT status FROM parcels WHERE number = ?1;",
            [number],
            |row| row.get(0),
        )
        .optional()?;

    match status {
        None => Ok(RepoError::NotFound(number)),
        Some(value) => {
            let status = parse_status(&value)?;
            Ok(RepoError::PreconditionFailed { number, status })
        }
    }
}

fn parse_parcel_row(row: &Row<'_>) -> RepoResult<Parcel> {
    let status_text: String = row.get("status")?;
    Ok(Parcel {
        number: row.get("number")?,
        client: row.get("client")?,
        status: parse_status(&status_text)?,
        address: row.get("address")?,
        created_at: row.get("created_at")?,
    })
}

fn parse_status(value: &str) -> RepoResult<ParcelStatus> {
    ParcelStatus::parse(value).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid parcel status `{value}` in parcels.status"))
    })
}

fn ensure_parcel_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    if !table_exists(conn, "parcels")? {
        return Err(RepoError::MissingRequiredTable("parcels"));
    }

    for column in PARCEL_COLUMNS {
        if !table_has_column(conn, "parcels", column)? {
            return Err(RepoError::MissingRequiredColumn {
                table: "parcels",
                column,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
