//! Ranking stores.
//!
//! Two implementations of the same [`RankingStore`] contract:
//!
//! - [`MemoryStore`]: one lock over every leaderboard, order recomputed by a
//!   full sort on each read.
//! - [`IndexedStore`]: one lock per leaderboard, order kept in an index that
//!   is updated on writes.
//!
//! Both produce the same ranking for the same submissions.
//!
//! ## Ordering
//!
//! Score descending, then the time the score was first reached ascending,
//! then player id ascending. The last key only matters for submissions that
//! share both score and timestamp.
//!
//! ## Example
//!
//! ```rust
//! use ranking::store::{MemoryStore, RankingStore};
//! use ranking::Timestamp;
//!
//! let store = MemoryStore::new();
//! store.update_score("weekly", "alice", 120, Timestamp::from_nanos(1));
//! store.update_score("weekly", "bob", 120, Timestamp::from_nanos(2));
//!
//! let top = store.top_players("weekly", 10);
//! assert_eq!(top[0].player_id, "alice");
//! assert_eq!(store.player_rank("weekly", "bob").unwrap().rank, 2);
//! ```

mod indexed;
mod memory;
mod order;

pub use indexed::IndexedStore;
pub use memory::MemoryStore;

use crate::model::{PlayerRank, RankingEntry, Timestamp};

/// Leaderboard storage contract.
///
/// Unknown leaderboards and players are never errors: reads return an empty
/// result or `None`, writes provision whatever is missing.
pub trait RankingStore: Send + Sync {
    /// Submit a score. Only a strictly higher score replaces the stored one;
    /// equal or lower submissions are ignored without a signal.
    fn update_score(&self, leaderboard_id: &str, player_id: &str, score: i64, submitted_at: Timestamp);

    /// Current 1-indexed rank and score, or `None` if the player has no record.
    fn player_rank(&self, leaderboard_id: &str, player_id: &str) -> Option<PlayerRank>;

    /// First `limit` entries. A `limit` of 0, or one above the population,
    /// returns the whole leaderboard.
    fn top_players(&self, leaderboard_id: &str, limit: usize) -> Vec<RankingEntry>;

    /// Window of up to `count` entries centered on the player. An odd count
    /// puts the extra slot after the player; the window is cut short at
    /// either end of the leaderboard.
    fn players_around(&self, leaderboard_id: &str, player_id: &str, count: usize) -> Vec<RankingEntry>;

    /// Number of players on a leaderboard.
    fn player_count(&self, leaderboard_id: &str) -> usize;

    /// Every leaderboard that has received a submission, sorted.
    fn leaderboard_ids(&self) -> Vec<String>;
}
