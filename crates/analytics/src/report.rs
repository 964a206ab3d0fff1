use crate::error::AnalyticsError;
use core_types::PlayerId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Why a metric has no value for a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricUndefined {
    /// The player never faced a delivery.
    NoBallsFaced,
    /// The player was never dismissed.
    NoDismissals,
    /// The player never bowled a delivery.
    NoBallsBowled,
    /// The metric only applies when both compared players hold the role.
    RoleMismatch,
}

impl fmt::Display for MetricUndefined {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            MetricUndefined::NoBallsFaced => "no balls faced",
            MetricUndefined::NoDismissals => "never dismissed",
            MetricUndefined::NoBallsBowled => "no balls bowled",
            MetricUndefined::RoleMismatch => "not both players have bowled",
        };
        f.write_str(text)
    }
}

/// A computed metric, or the reason it could not be computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum MetricValue {
    Defined(Decimal),
    Undefined(MetricUndefined),
}

impl MetricValue {
    /// Divides `numerator` by `denominator`, or marks the metric undefined
    /// with `reason` when the denominator is zero.
    pub fn ratio(numerator: Decimal, denominator: Decimal, reason: MetricUndefined) -> Self {
        if denominator.is_zero() {
            MetricValue::Undefined(reason)
        } else {
            MetricValue::Defined(numerator / denominator)
        }
    }

    pub fn value(&self) -> Option<Decimal> {
        match self {
            MetricValue::Defined(v) => Some(*v),
            MetricValue::Undefined(_) => None,
        }
    }

    pub fn is_defined(&self) -> bool {
        matches!(self, MetricValue::Defined(_))
    }
}

/// Two decimals for defined values, `N/A` otherwise.
impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Defined(v) => write!(f, "{:.2}", v.round_dp(2)),
            MetricValue::Undefined(_) => f.write_str("N/A"),
        }
    }
}

/// The metrics a comparison reports, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MetricKind {
    Awards,
    Runs,
    StrikeRate,
    BattingAverage,
    EconomyRate,
}

impl MetricKind {
    pub const ALL: [MetricKind; 5] = [
        MetricKind::Awards,
        MetricKind::Runs,
        MetricKind::StrikeRate,
        MetricKind::BattingAverage,
        MetricKind::EconomyRate,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MetricKind::Awards => "Player of the Match Awards",
            MetricKind::Runs => "Runs Scored",
            MetricKind::StrikeRate => "Strike Rate",
            MetricKind::BattingAverage => "Batting Average",
            MetricKind::EconomyRate => "Economy Rate",
        }
    }

    /// Counts render as integers, rates with two decimals.
    pub fn is_rate(&self) -> bool {
        !matches!(self, MetricKind::Awards | MetricKind::Runs)
    }

    pub fn format(&self, value: &MetricValue) -> String {
        match value {
            MetricValue::Defined(v) if !self.is_rate() => v.trunc().to_string(),
            other => other.to_string(),
        }
    }
}

impl FromStr for MetricKind {
    type Err = AnalyticsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "awards" | "player-of-match" | "pom" => Ok(MetricKind::Awards),
            "runs" | "runs-scored" => Ok(MetricKind::Runs),
            "strike-rate" | "sr" => Ok(MetricKind::StrikeRate),
            "batting-average" | "average" | "avg" => Ok(MetricKind::BattingAverage),
            "economy-rate" | "economy" | "er" => Ok(MetricKind::EconomyRate),
            _ => Err(AnalyticsError::UnknownMetric(s.to_string())),
        }
    }
}

/// Every metric for one player, plus the raw counts behind the rates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerMetrics {
    pub player: PlayerId,

    // I. Recognition
    pub award_count: u32,

    // II. Batting
    pub runs_scored: u64,
    pub balls_faced: usize,
    pub dismissals: usize,
    pub strike_rate: MetricValue,
    pub batting_average: MetricValue,

    // III. Bowling
    pub runs_conceded: u64,
    pub balls_bowled: usize,
    pub economy_rate: MetricValue,
}

impl PlayerMetrics {
    /// Creates an empty bundle for a player who has no deliveries and no awards.
    pub fn new(player: PlayerId) -> Self {
        Self {
            player,
            award_count: 0,
            runs_scored: 0,
            balls_faced: 0,
            dismissals: 0,
            strike_rate: MetricValue::Undefined(MetricUndefined::NoBallsFaced),
            batting_average: MetricValue::Undefined(MetricUndefined::NoDismissals),
            runs_conceded: 0,
            balls_bowled: 0,
            economy_rate: MetricValue::Undefined(MetricUndefined::NoBallsBowled),
        }
    }

    pub fn has_bowled(&self) -> bool {
        self.balls_bowled > 0
    }

    /// Looks a metric up by kind. Counts are returned as defined values.
    pub fn metric(&self, kind: MetricKind) -> MetricValue {
        match kind {
            MetricKind::Awards => MetricValue::Defined(Decimal::from(self.award_count)),
            MetricKind::Runs => MetricValue::Defined(Decimal::from(self.runs_scored)),
            MetricKind::StrikeRate => self.strike_rate,
            MetricKind::BattingAverage => self.batting_average,
            MetricKind::EconomyRate => self.economy_rate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_ratio_zero_denominator_is_undefined() {
        let v = MetricValue::ratio(dec!(10), Decimal::ZERO, MetricUndefined::NoDismissals);
        assert_eq!(v, MetricValue::Undefined(MetricUndefined::NoDismissals));
        assert_eq!(v.value(), None);
    }

    #[test]
    fn test_display_uses_two_decimals_and_na() {
        assert_eq!(MetricValue::Defined(dec!(133.3333)).to_string(), "133.33");
        assert_eq!(MetricValue::Defined(dec!(200)).to_string(), "200.00");
        assert_eq!(MetricValue::Defined(dec!(0.999)).to_string(), "1.00");
        assert_eq!(
            MetricValue::Undefined(MetricUndefined::NoBallsBowled).to_string(),
            "N/A"
        );
    }

    #[test]
    fn test_display_rounds_rather_than_truncates() {
        let v = MetricValue::ratio(dec!(200), dec!(3), MetricUndefined::NoBallsFaced);
        assert_eq!(v.to_string(), "66.67");
        assert_eq!(MetricValue::Defined(dec!(12.346)).to_string(), "12.35");
        assert_eq!(MetricValue::Defined(dec!(12.344)).to_string(), "12.34");
    }

    #[test]
    fn test_counts_format_as_integers() {
        let v = MetricValue::Defined(dec!(42));
        assert_eq!(MetricKind::Runs.format(&v), "42");
        assert_eq!(MetricKind::StrikeRate.format(&v), "42.00");
    }

    #[test]
    fn test_metric_kind_parsing() {
        assert_eq!("strike_rate".parse::<MetricKind>().unwrap(), MetricKind::StrikeRate);
        assert_eq!("Economy".parse::<MetricKind>().unwrap(), MetricKind::EconomyRate);
        assert_eq!(
            "wickets".parse::<MetricKind>().unwrap_err(),
            AnalyticsError::UnknownMetric("wickets".to_string())
        );
    }

    #[test]
    fn test_undefined_serializes_with_reason() {
        let json = serde_json::to_value(MetricValue::Undefined(MetricUndefined::RoleMismatch)).unwrap();
        assert_eq!(json["status"], "undefined");
        assert_eq!(json["value"], "role_mismatch");
    }

    #[test]
    fn test_new_report_is_empty() {
        let m = PlayerMetrics::new(PlayerId::from("C"));
        assert_eq!(m.award_count, 0);
        assert!(!m.has_bowled());
        assert_eq!(m.metric(MetricKind::Runs), MetricValue::Defined(Decimal::ZERO));
        assert!(!m.metric(MetricKind::StrikeRate).is_defined());
    }
}
