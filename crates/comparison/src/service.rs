use crate::error::RejectionReason;
use crate::result::ComparisonResult;
use analytics::{MetricEngine, MetricUndefined, MetricValue};
use core_types::{DeliveryQuery, PlayerId, Role};

/// Orchestrates two-player comparisons over a read-only dataset.
///
/// Holds nothing but a borrowed query surface, so a service is cheap to
/// build per request and any number can run concurrently over one store.
pub struct ComparisonService<'a, Q: DeliveryQuery + ?Sized> {
    query: &'a Q,
    engine: MetricEngine,
}

impl<'a, Q: DeliveryQuery + ?Sized> ComparisonService<'a, Q> {
    pub fn new(query: &'a Q) -> Self {
        Self {
            query,
            engine: MetricEngine::new(),
        }
    }

    /// Every selectable player, ascending.
    pub fn list_players(&self) -> Vec<PlayerId> {
        self.query.roster().into_iter().cloned().collect()
    }

    /// Players who have at least one delivery in `role`, ascending.
    pub fn list_players_in_role(&self, role: Role) -> Vec<PlayerId> {
        self.query
            .roster()
            .into_iter()
            .filter(|p| !self.query.deliveries_as(p, role).is_empty())
            .cloned()
            .collect()
    }

    /// Compares two players.
    ///
    /// The same-player check runs before anything else. Metric-level gaps
    /// (no balls faced, never dismissed, not a bowler) never reject; they
    /// show up as `MetricValue::Undefined` in the result.
    #[tracing::instrument(name = "compare", skip(self, first, second), fields(first = %first, second = %second))]
    pub fn compare(
        &self,
        first: &PlayerId,
        second: &PlayerId,
    ) -> Result<ComparisonResult, RejectionReason> {
        if first == second {
            tracing::warn!("Rejected comparison of a player with themselves.");
            return Err(RejectionReason::SamePlayerSelected);
        }
        for player in [first, second] {
            if !self.query.contains_player(player) {
                tracing::warn!(player = %player, "Rejected comparison with unknown player.");
                return Err(RejectionReason::UnknownPlayer(player.clone()));
            }
        }

        let mut first_metrics = self.engine.player_metrics(self.query, first);
        let mut second_metrics = self.engine.player_metrics(self.query, second);

        let economy_rate_applicable = first_metrics.has_bowled() && second_metrics.has_bowled();
        if !economy_rate_applicable {
            first_metrics.economy_rate = MetricValue::Undefined(MetricUndefined::RoleMismatch);
            second_metrics.economy_rate = MetricValue::Undefined(MetricUndefined::RoleMismatch);
        }

        tracing::debug!(economy_rate_applicable, "Comparison assembled.");

        Ok(ComparisonResult {
            first: first_metrics,
            second: second_metrics,
            economy_rate_applicable,
        })
    }
}
