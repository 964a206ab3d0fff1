use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The side of a delivery a player can appear on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Striker,
    Bowler,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Striker => write!(f, "striker"),
            Role::Bowler => write!(f, "bowler"),
        }
    }
}

impl FromStr for Role {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "striker" | "batter" | "batting" => Ok(Role::Striker),
            "bowler" | "bowling" => Ok(Role::Bowler),
            _ => Err(CoreError::UnknownRole(s.to_string())),
        }
    }
}
