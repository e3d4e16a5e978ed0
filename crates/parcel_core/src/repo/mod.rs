//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the parcel store contract used by services.
//! - Isolate SQLite query details from lifecycle orchestration.
//!
//! # Invariants
//! - Repository APIs return semantic errors (`NotFound`,
//!   `PreconditionFailed`) in addition to DB transport errors.
//! - State-guarded writes bind their precondition into the write statement.

pub mod parcel_repo;
