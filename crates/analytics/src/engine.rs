use crate::report::{MetricUndefined, MetricValue, PlayerMetrics};
use core_types::{DeliveryQuery, DeliveryRecord, PlayerId};
use rust_decimal::Decimal;

const BALLS_PER_OVER: u32 = 6;

/// A stateless calculator for deriving player metrics from deliveries.
///
/// Every function takes an already filtered subset (a player's striker or
/// bowler deliveries) and is total: an empty subset never fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct MetricEngine {}

impl MetricEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sum of runs off the given deliveries. Zero for an empty subset.
    pub fn runs_scored(&self, deliveries: &[&DeliveryRecord]) -> u64 {
        deliveries.iter().map(|d| u64::from(d.runs_scored)).sum()
    }

    /// Deliveries on which the striker was dismissed.
    pub fn dismissals(&self, deliveries: &[&DeliveryRecord]) -> usize {
        deliveries.iter().filter(|d| d.wicket_confirmed).count()
    }

    /// Runs per 100 balls faced, over striker deliveries.
    pub fn strike_rate(&self, deliveries: &[&DeliveryRecord]) -> MetricValue {
        let runs = Decimal::from(self.runs_scored(deliveries));
        let balls = Decimal::from(deliveries.len());
        match MetricValue::ratio(runs, balls, MetricUndefined::NoBallsFaced) {
            MetricValue::Defined(per_ball) => MetricValue::Defined(per_ball * Decimal::ONE_HUNDRED),
            undefined => undefined,
        }
    }

    /// Runs per dismissal, over striker deliveries.
    ///
    /// Every delivery with a confirmed wicket counts as one dismissal,
    /// whatever the mode of dismissal.
    pub fn batting_average(&self, deliveries: &[&DeliveryRecord]) -> MetricValue {
        let runs = Decimal::from(self.runs_scored(deliveries));
        let dismissals = Decimal::from(self.dismissals(deliveries));
        MetricValue::ratio(runs, dismissals, MetricUndefined::NoDismissals)
    }

    /// Runs conceded per over (6 balls), over bowler deliveries.
    pub fn economy_rate(&self, deliveries: &[&DeliveryRecord]) -> MetricValue {
        // runs / (balls / 6) == runs * 6 / balls, without the rounded intermediate.
        let runs = Decimal::from(self.runs_scored(deliveries)) * Decimal::from(BALLS_PER_OVER);
        let balls = Decimal::from(deliveries.len());
        MetricValue::ratio(runs, balls, MetricUndefined::NoBallsBowled)
    }

    /// Computes the complete metric bundle for one player.
    ///
    /// Economy rate here depends only on the player's own bowling; whether it
    /// is shown in a comparison is decided by the caller.
    pub fn player_metrics<Q>(&self, query: &Q, player: &PlayerId) -> PlayerMetrics
    where
        Q: DeliveryQuery + ?Sized,
    {
        let batting = query.deliveries_as_striker(player);
        let bowling = query.deliveries_as_bowler(player);

        let mut report = PlayerMetrics::new(player.clone());
        report.award_count = query.award_count(player);

        report.runs_scored = self.runs_scored(&batting);
        report.balls_faced = batting.len();
        report.dismissals = self.dismissals(&batting);
        report.strike_rate = self.strike_rate(&batting);
        report.batting_average = self.batting_average(&batting);

        report.runs_conceded = self.runs_scored(&bowling);
        report.balls_bowled = bowling.len();
        report.economy_rate = self.economy_rate(&bowling);

        tracing::debug!(
            player = %player,
            balls_faced = report.balls_faced,
            balls_bowled = report.balls_bowled,
            "Computed player metrics."
        );

        report
    }
}
