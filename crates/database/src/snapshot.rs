use chrono::{DateTime, Utc};
use core_types::{DeliveryRecord, MatchAwardRecord};
use serde::Serialize;

/// One immutable, versioned load of both datasets.
#[derive(Debug, Clone)]
pub struct DatasetSnapshot {
    version: u64,
    loaded_at: DateTime<Utc>,
    source: String,
    deliveries: Vec<DeliveryRecord>,
    awards: Vec<MatchAwardRecord>,
}

/// Summary of a snapshot, suitable for status output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SnapshotInfo {
    pub version: u64,
    pub loaded_at: DateTime<Utc>,
    pub source: String,
    pub deliveries: usize,
    pub awards: usize,
    pub players: usize,
}

impl DatasetSnapshot {
    /// Creates a first-generation snapshot. Tests use this to build small
    /// synthetic datasets directly.
    pub fn new(deliveries: Vec<DeliveryRecord>, awards: Vec<MatchAwardRecord>) -> Self {
        Self::with_version(1, "in-memory", deliveries, awards)
    }

    pub fn with_version(
        version: u64,
        source: impl Into<String>,
        deliveries: Vec<DeliveryRecord>,
        awards: Vec<MatchAwardRecord>,
    ) -> Self {
        Self {
            version,
            loaded_at: Utc::now(),
            source: source.into(),
            deliveries,
            awards,
        }
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn deliveries(&self) -> &[DeliveryRecord] {
        &self.deliveries
    }

    pub fn awards(&self) -> &[MatchAwardRecord] {
        &self.awards
    }
}
