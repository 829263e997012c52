//! Error types for the ranking crate.
//!
//! The store operations themselves never fail; these errors come from the
//! surfaces around them (identifier validation, configuration loading).

use thiserror::Error;

pub type Result<T> = std::result::Result<T, RankingError>;

#[derive(Error, Debug)]
pub enum RankingError {
    #[error("invalid {kind} id: {reason}")]
    InvalidId { kind: IdKind, reason: String },

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Which identifier failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdKind {
    Leaderboard,
    Player,
}

impl std::fmt::Display for IdKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IdKind::Leaderboard => write!(f, "leaderboard"),
            IdKind::Player => write!(f, "player"),
        }
    }
}

impl RankingError {
    pub fn invalid_id(kind: IdKind, reason: impl Into<String>) -> Self {
        Self::InvalidId {
            kind,
            reason: reason.into(),
        }
    }

    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig(reason.into())
    }
}
