use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Identifier of a player as it appears in the source datasets.
///
/// Matching is exact: no trimming, no case folding.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for PlayerId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl Borrow<str> for PlayerId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// One ball bowled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryRecord {
    /// The batting player facing the delivery.
    pub striker: PlayerId,
    /// The player who bowled it.
    pub bowler: PlayerId,
    pub runs_scored: u32,
    /// True when the striker was dismissed on this delivery.
    pub wicket_confirmed: bool,
    /// Over.ball position. Only ever counted, never summed.
    pub ball_sequence: Decimal,
}

impl DeliveryRecord {
    pub fn new(
        striker: impl Into<PlayerId>,
        bowler: impl Into<PlayerId>,
        runs_scored: u32,
        wicket_confirmed: bool,
        ball_sequence: Decimal,
    ) -> Self {
        Self {
            striker: striker.into(),
            bowler: bowler.into(),
            runs_scored,
            wicket_confirmed,
            ball_sequence,
        }
    }
}

/// One completed match and the player honored for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchAwardRecord {
    pub player_of_match: PlayerId,
}

impl MatchAwardRecord {
    pub fn new(player_of_match: impl Into<PlayerId>) -> Self {
        Self {
            player_of_match: player_of_match.into(),
        }
    }
}
