//! # Crease Database Crate
//!
//! This crate owns the loaded dataset. It is the system's read-only "scorebook."
//!
//! ## Architectural Principles
//!
//! - **Layer 2 Adapter:** All knowledge of where records come from (CSV exports, PostgreSQL)
//!   lives here, behind the `DataSource` trait. The rest of the application only sees the
//!   `DeliveryQuery` surface implemented by `DeliveryStore`.
//! - **Immutable Snapshots:** A load produces a `DatasetSnapshot` that is never mutated.
//!   Reloading builds a new snapshot with the next version number.
//! - **Scoped Connections:** `PgSource` opens one connection per fetch and closes it when the
//!   fetch ends. No connection or credential is held as global state.
//!
//! ## Public API
//!
//! - `DeliveryStore`: Indexed, read-only lookups over a snapshot.
//! - `DatasetSnapshot`: The versioned, immutable record collections.
//! - `DataSource`, `CsvSource`, `PgSource`: Injectable record providers.
//! - `DbError`: The specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod connection;
pub mod csv_source;
pub mod error;
pub mod snapshot;
pub mod source;
pub mod store;

// Re-export the key components to create a clean, public-facing API.
pub use connection::{run_migrations, PgSource};
pub use csv_source::CsvSource;
pub use error::DbError;
pub use snapshot::{DatasetSnapshot, SnapshotInfo};
pub use source::DataSource;
pub use store::DeliveryStore;
