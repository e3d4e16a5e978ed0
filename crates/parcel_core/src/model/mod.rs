//! Domain model for tracked parcels.
//!
//! # Invariants
//! - Parcel numbers are assigned by storage, never by callers.
//! - Status only moves forward: `registered -> sent -> delivered`.

pub mod parcel;
