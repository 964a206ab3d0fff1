use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Unknown role '{0}', expected 'striker' or 'bowler'")]
    UnknownRole(String),
}
