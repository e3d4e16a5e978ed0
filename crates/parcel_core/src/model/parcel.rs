//! Parcel domain model.
//!
//! # Responsibility
//! - Define the stored parcel record and its unsaved draft form.
//! - Own the status progression table.
//!
//! # Invariants
//! - `number` exists only on stored parcels (`Parcel`), never on drafts.
//! - `Delivered` is terminal; `ParcelStatus::next` returns `None` for it.
//! - `created_at` is opaque text, stored and returned verbatim.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Storage-assigned parcel identifier.
pub type ParcelNumber = i64;

/// Owning client reference. Not validated against any registry.
pub type ClientId = i64;

/// Parcel lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParcelStatus {
    /// Accepted but not yet handed to the carrier.
    Registered,
    /// In transit.
    Sent,
    /// Handed to the recipient.
    Delivered,
}

impl ParcelStatus {
    /// Returns the status that follows this one, or `None` at the terminal
    /// state.
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Registered => Some(Self::Sent),
            Self::Sent => Some(Self::Delivered),
            Self::Delivered => None,
        }
    }

    /// Whether address changes and deletion are still allowed.
    pub fn is_mutable(self) -> bool {
        self == Self::Registered
    }

    /// Stable lowercase name, identical to the persisted value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Registered => "registered",
            Self::Sent => "sent",
            Self::Delivered => "delivered",
        }
    }

    /// Parses the persisted lowercase name.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "registered" => Some(Self::Registered),
            "sent" => Some(Self::Sent),
            "delivered" => Some(Self::Delivered),
            _ => None,
        }
    }
}

impl Display for ParcelStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parcel that has not been stored yet and therefore has no number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewParcel {
    pub client: ClientId,
    pub status: ParcelStatus,
    pub address: String,
    pub created_at: String,
}

impl NewParcel {
    /// Creates a draft in the initial `Registered` state.
    pub fn registered(
        client: ClientId,
        address: impl Into<String>,
        created_at: impl Into<String>,
    ) -> Self {
        Self {
            client,
            status: ParcelStatus::Registered,
            address: address.into(),
            created_at: created_at.into(),
        }
    }

    /// Attaches the storage-assigned number.
    pub fn into_parcel(self, number: ParcelNumber) -> Parcel {
        Parcel {
            number,
            client: self.client,
            status: self.status,
            address: self.address,
            created_at: self.created_at,
        }
    }
}

/// Stored parcel record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parcel {
    pub number: ParcelNumber,
    pub client: ClientId,
    pub status: ParcelStatus,
    pub address: String,
    /// Registration timestamp as written at creation time.
    pub created_at: String,
}

impl Display for Parcel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "parcel #{} to `{}` from client {} registered at {}, status {}",
            self.number, self.address, self.client, self.created_at, self.status
        )
    }
}
