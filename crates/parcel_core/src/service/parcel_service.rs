//! Parcel lifecycle service.
//!
//! # Responsibility
//! - Register parcels in the initial `registered` state.
//! - Own the status progression policy (`registered -> sent -> delivered`).
//! - Emit confirmation log events for lifecycle changes.
//!
//! # Invariants
//! - `advance_status` is the only caller of `set_status`.
//! - Advancing a `delivered` parcel is a successful no-op without a write.
//! - Repository errors are returned unchanged.

use crate::model::parcel::{ClientId, NewParcel, Parcel, ParcelNumber, ParcelStatus};
use crate::repo::parcel_repo::{ParcelRepository, RepoResult};
use chrono::{SecondsFormat, Utc};
use log::{info, warn};

/// Use-case service for the parcel lifecycle.
pub struct ParcelService<R: ParcelRepository> {
    repo: R,
}

impl<R: ParcelRepository> ParcelService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Registers a new parcel stamped with the current UTC time.
    ///
    /// # Contract
    /// - Status starts at `ParcelStatus::Registered`.
    /// - Returns the stored parcel including its assigned number.
    pub fn register(&self, client: ClientId, address: impl Into<String>) -> RepoResult<Parcel> {
        self.register_at(client, address, current_timestamp())
    }

    /// Registers a new parcel with a caller-supplied creation timestamp.
    ///
    /// The timestamp is stored verbatim.
    pub fn register_at(
        &self,
        client: ClientId,
        address: impl Into<String>,
        created_at: impl Into<String>,
    ) -> RepoResult<Parcel> {
        let draft = NewParcel::registered(client, address, created_at);
        let number = self.repo.add(&draft)?;
        let parcel = draft.into_parcel(number);

        info!(
            "event=parcel_register module=service status=ok number={} client={} created_at={}",
            parcel.number, parcel.client, parcel.created_at
        );
        Ok(parcel)
    }

    /// Loads one parcel by number.
    pub fn get(&self, number: ParcelNumber) -> RepoResult<Parcel> {
        self.repo.get(number)
    }

    /// Lists every parcel owned by `client`.
    pub fn list_by_client(&self, client: ClientId) -> RepoResult<Vec<Parcel>> {
        let parcels = self.repo.list_by_client(client)?;

        info!(
            "event=parcel_list module=service status=ok client={} count={}",
            client,
            parcels.len()
        );
        for parcel in &parcels {
            info!(
                "event=parcel_list_item module=service number={} parcel_status={}",
                parcel.number, parcel.status
            );
        }
        Ok(parcels)
    }

    /// Moves a parcel to the next lifecycle state.
    ///
    /// Returns the status the parcel has after the call. A `delivered`
    /// parcel stays `delivered` and nothing is written.
    pub fn advance_status(&self, number: ParcelNumber) -> RepoResult<ParcelStatus> {
        let parcel = self.repo.get(number)?;
        let Some(next) = parcel.status.next() else {
            info!(
                "event=parcel_status_advance module=service status=skipped number={} parcel_status={}",
                number, parcel.status
            );
            return Ok(parcel.status);
        };

        self.repo.set_status(number, next)?;
        info!(
            "event=parcel_status_advance module=service status=ok number={} from={} to={}",
            number, parcel.status, next
        );
        Ok(next)
    }

    /// Changes the delivery address of a `registered` parcel.
    pub fn change_address(&self, number: ParcelNumber, address: &str) -> RepoResult<()> {
        match self.repo.set_address(number, address) {
            Ok(()) => {
                info!("event=parcel_address_change module=service status=ok number={number}");
                Ok(())
            }
            Err(err) => {
                warn!(
                    "event=parcel_address_change module=service status=error number={number} error={err}"
                );
                Err(err)
            }
        }
    }

    /// Deletes a `registered` parcel.
    pub fn delete(&self, number: ParcelNumber) -> RepoResult<()> {
        match self.repo.delete(number) {
            Ok(()) => {
                info!("event=parcel_delete module=service status=ok number={number}");
                Ok(())
            }
            Err(err) => {
                warn!("event=parcel_delete module=service status=error number={number} error={err}");
                Err(err)
            }
        }
    }
}

fn current_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[cfg(test)]
mod tests {
    use super::current_timestamp;
    use chrono::DateTime;

    #[test]
    fn current_timestamp_is_rfc3339_utc_seconds() {
        let stamp = current_timestamp();
        assert!(stamp.ends_with('Z'), "unexpected timestamp `{stamp}`");
        assert!(!stamp.contains('.'), "unexpected fraction in `{stamp}`");
        DateTime::parse_from_rfc3339(&stamp).unwrap();
    }
}
