//! # Crease Core Types
//!
//! Layer 0 of the workspace. Holds the plain record shapes every other crate
//! agrees on, and the read-only query surface over a loaded dataset.
//!
//! Nothing in here performs I/O.

pub mod enums;
pub mod error;
pub mod query;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use enums::Role;
pub use error::CoreError;
pub use query::DeliveryQuery;
pub use structs::{DeliveryRecord, MatchAwardRecord, PlayerId};
