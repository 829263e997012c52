//! Records stored per leaderboard and the read-only views handed to callers.

use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Submission instant, in nanoseconds since the Unix epoch.
///
/// Only ever compared; used to break ties between equal scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
    pub const fn from_nanos(nanos: i64) -> Self {
        Self(nanos)
    }

    pub const fn as_nanos(self) -> i64 {
        self.0
    }

    /// Wall-clock time. Clamps to zero if the system clock is before the epoch.
    pub fn now() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos().min(i64::MAX as u128) as i64)
            .unwrap_or(0);
        Self(nanos)
    }

    pub const fn saturating_add_nanos(self, nanos: i64) -> Self {
        Self(self.0.saturating_add(nanos))
    }
}

/// Stored state for one player on one leaderboard.
///
/// Never leaves the store: callers only see [`RankingEntry`] and [`PlayerRank`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PlayerRecord {
    pub player_id: String,
    pub score: i64,
    /// Time the current score was first reached.
    pub last_update_time: Timestamp,
    pub leaderboard_id: String,
}

impl PlayerRecord {
    pub fn new(leaderboard_id: &str, player_id: &str, score: i64, submitted_at: Timestamp) -> Self {
        Self {
            player_id: player_id.to_string(),
            score,
            last_update_time: submitted_at,
            leaderboard_id: leaderboard_id.to_string(),
        }
    }

    /// Applies a submission. Only a strictly higher score replaces the record,
    /// so an equal resubmission keeps the original tie-break timestamp.
    ///
    /// Returns true if the record changed.
    pub fn improve(&mut self, score: i64, submitted_at: Timestamp) -> bool {
        if score > self.score {
            self.score = score;
            self.last_update_time = submitted_at;
            true
        } else {
            false
        }
    }

    pub fn to_entry(&self, rank: usize) -> RankingEntry {
        RankingEntry {
            player_id: self.player_id.clone(),
            score: self.score,
            rank,
        }
    }
}

/// One row of a ranking, valid for the snapshot it was computed from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RankingEntry {
    pub player_id: String,
    pub score: i64,
    /// 1-indexed.
    pub rank: usize,
}

/// A player's standing, returned by rank lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerRank {
    /// 1-indexed.
    pub rank: usize,
    pub score: i64,
}
