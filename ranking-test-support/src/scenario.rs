//! Reference walkthrough: ten players joining one leaderboard in order.
//!
//! Expected standings after seeding:
//!
//! | rank | player    | score |
//! |------|-----------|-------|
//! | 1    | player_04 | 1050  |
//! | 2    | player_08 | 1020  |
//! | 3    | player_02 | 1000  |
//! | 4    | player_10 | 990   |
//! | 5    | player_06 | 980   |
//! | 6    | player_09 | 970   |
//! | 7    | player_01 | 950   |
//! | 8    | player_05 | 950   |
//! | 9    | player_07 | 920   |
//! | 10   | player_03 | 900   |

use ranking::{RankingStore, Timestamp};

pub const WALKTHROUGH_BOARD: &str = "game_ranking_001";

/// (player, score) in arrival order.
pub const WALKTHROUGH: [(&str, i64); 10] = [
    ("player_01", 950),
    ("player_02", 1000),
    ("player_03", 900),
    ("player_04", 1050),
    ("player_05", 950),
    ("player_06", 980),
    ("player_07", 920),
    ("player_08", 1020),
    ("player_09", 970),
    ("player_10", 990),
];

/// Milliseconds between consecutive arrivals.
pub const ARRIVAL_GAP_MS: i64 = 10;

/// Submits the walkthrough to `store`, starting at `start` and spacing
/// arrivals [`ARRIVAL_GAP_MS`] apart. Returns the next free timestamp.
pub fn seed_walkthrough(store: &dyn RankingStore, leaderboard_id: &str, start: Timestamp) -> Timestamp {
    let mut at = start;
    for (player_id, score) in WALKTHROUGH {
        store.update_score(leaderboard_id, player_id, score, at);
        at = at.saturating_add_nanos(ARRIVAL_GAP_MS * 1_000_000);
    }
    at
}
