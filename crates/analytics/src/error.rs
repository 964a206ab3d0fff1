use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalyticsError {
    #[error("Unknown metric '{0}'. Expected one of: awards, runs, strike-rate, batting-average, economy-rate")]
    UnknownMetric(String),
}
