use crate::error::DbError;
use crate::snapshot::{DatasetSnapshot, SnapshotInfo};
use crate::source::DataSource;
use core_types::{DeliveryQuery, DeliveryRecord, PlayerId};
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

/// Read-only, indexed access to one dataset snapshot.
///
/// Indexes are built once on construction; every lookup afterwards is a pure
/// read. Cloning a store shares the underlying snapshot.
#[derive(Debug, Clone)]
pub struct DeliveryStore {
    snapshot: Arc<DatasetSnapshot>,
    as_striker: HashMap<PlayerId, Vec<usize>>,
    as_bowler: HashMap<PlayerId, Vec<usize>>,
    awards: HashMap<PlayerId, u32>,
    roster: BTreeSet<PlayerId>,
}

impl DeliveryStore {
    /// Builds the striker/bowler indexes, award counts and roster for a snapshot.
    pub fn from_snapshot(snapshot: DatasetSnapshot) -> Self {
        let mut as_striker: HashMap<PlayerId, Vec<usize>> = HashMap::new();
        let mut as_bowler: HashMap<PlayerId, Vec<usize>> = HashMap::new();
        let mut roster = BTreeSet::new();

        for (idx, delivery) in snapshot.deliveries().iter().enumerate() {
            as_striker.entry(delivery.striker.clone()).or_default().push(idx);
            as_bowler.entry(delivery.bowler.clone()).or_default().push(idx);
            roster.insert(delivery.striker.clone());
            roster.insert(delivery.bowler.clone());
        }

        let mut awards: HashMap<PlayerId, u32> = HashMap::new();
        for award in snapshot.awards() {
            *awards.entry(award.player_of_match.clone()).or_insert(0) += 1;
        }

        tracing::debug!(
            version = snapshot.version(),
            deliveries = snapshot.deliveries().len(),
            awards = snapshot.awards().len(),
            players = roster.len(),
            "Indexed dataset snapshot."
        );

        Self {
            snapshot: Arc::new(snapshot),
            as_striker,
            as_bowler,
            awards,
            roster,
        }
    }

    /// Fetches both datasets from `source` and builds the first snapshot.
    #[tracing::instrument(name = "store_load", skip(source), fields(source = %source.describe()))]
    pub async fn load(source: &dyn DataSource) -> Result<Self, DbError> {
        Self::load_version(source, 1).await
    }

    /// Builds a fresh store from `source` with the next snapshot version.
    ///
    /// `self` is left untouched; callers swap the returned store in.
    #[tracing::instrument(name = "store_reload", skip(self, source), fields(source = %source.describe()))]
    pub async fn reload(&self, source: &dyn DataSource) -> Result<Self, DbError> {
        Self::load_version(source, self.version() + 1).await
    }

    async fn load_version(source: &dyn DataSource, version: u64) -> Result<Self, DbError> {
        let (deliveries, awards) =
            tokio::try_join!(source.fetch_deliveries(), source.fetch_awards())?;

        let snapshot = DatasetSnapshot::with_version(version, source.describe(), deliveries, awards);
        let store = Self::from_snapshot(snapshot);

        tracing::info!(
            version,
            deliveries = store.snapshot.deliveries().len(),
            awards = store.snapshot.awards().len(),
            players = store.roster.len(),
            "Dataset snapshot loaded."
        );
        Ok(store)
    }

    pub fn version(&self) -> u64 {
        self.snapshot.version()
    }

    pub fn snapshot(&self) -> &DatasetSnapshot {
        &self.snapshot
    }

    pub fn info(&self) -> SnapshotInfo {
        SnapshotInfo {
            version: self.snapshot.version(),
            loaded_at: self.snapshot.loaded_at(),
            source: self.snapshot.source().to_string(),
            deliveries: self.snapshot.deliveries().len(),
            awards: self.snapshot.awards().len(),
            players: self.roster.len(),
        }
    }

    fn resolve(&self, index: &HashMap<PlayerId, Vec<usize>>, player: &PlayerId) -> Vec<&DeliveryRecord> {
        let deliveries = self.snapshot.deliveries();
        index
            .get(player)
            .map(|rows| rows.iter().filter_map(|&i| deliveries.get(i)).collect())
            .unwrap_or_default()
    }
}

impl DeliveryQuery for DeliveryStore {
    fn deliveries_as_striker(&self, player: &PlayerId) -> Vec<&DeliveryRecord> {
        self.resolve(&self.as_striker, player)
    }

    fn deliveries_as_bowler(&self, player: &PlayerId) -> Vec<&DeliveryRecord> {
        self.resolve(&self.as_bowler, player)
    }

    fn award_count(&self, player: &PlayerId) -> u32 {
        self.awards.get(player).copied().unwrap_or(0)
    }

    fn roster(&self) -> Vec<&PlayerId> {
        self.roster.iter().collect()
    }

    fn contains_player(&self, player: &PlayerId) -> bool {
        self.roster.contains(player)
    }
}
