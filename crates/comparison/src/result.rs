use analytics::{MetricKind, MetricValue, PlayerMetrics};
use serde::{Deserialize, Serialize};

const ROLE_MISMATCH_NOTICE: &str = "Select two bowlers to compare economy rates.";

/// Side-by-side metrics for two distinct players.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub first: PlayerMetrics,
    pub second: PlayerMetrics,
    /// False unless both players have bowled at least one delivery. When
    /// false, both economy rates are marked as a role mismatch.
    pub economy_rate_applicable: bool,
}

impl ComparisonResult {
    /// Notice to show in place of an economy comparison, if any.
    pub fn role_notice(&self) -> Option<&'static str> {
        (!self.economy_rate_applicable).then_some(ROLE_MISMATCH_NOTICE)
    }

    /// The same comparison with the two sides exchanged.
    pub fn swapped(&self) -> Self {
        Self {
            first: self.second.clone(),
            second: self.first.clone(),
            economy_rate_applicable: self.economy_rate_applicable,
        }
    }

    /// Both players' values for one metric, first player first.
    pub fn pair(&self, kind: MetricKind) -> (MetricValue, MetricValue) {
        (self.first.metric(kind), self.second.metric(kind))
    }
}
