use crate::error::DbError;
use async_trait::async_trait;
use core_types::{DeliveryRecord, MatchAwardRecord};

/// A provider of the two record streams a snapshot is built from.
///
/// Implementations validate rows before returning them: the store assumes
/// every record it receives is well formed.
#[async_trait]
pub trait DataSource: Send + Sync {
    async fn fetch_deliveries(&self) -> Result<Vec<DeliveryRecord>, DbError>;

    async fn fetch_awards(&self) -> Result<Vec<MatchAwardRecord>, DbError>;

    /// A short human-readable label, recorded on the snapshot.
    fn describe(&self) -> String;
}
