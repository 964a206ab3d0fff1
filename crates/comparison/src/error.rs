use core_types::PlayerId;
use serde::Serialize;
use thiserror::Error;

/// Why a comparison was refused. Either reason stops the whole comparison.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", content = "player", rename_all = "snake_case")]
pub enum RejectionReason {
    #[error("Please select two different players for comparison.")]
    SamePlayerSelected,

    #[error("Unknown player '{0}'.")]
    UnknownPlayer(PlayerId),
}
