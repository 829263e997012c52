//! Ranking verification utilities for testing correctness.

use parking_lot::Mutex;
use ranking::{RankingEntry, RankingStore};
use std::collections::HashMap;
use std::fmt;

/// A broken ranking invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// Ranks are not 1, 2, 3, ... starting at `first_rank`.
    RankGap { position: usize, expected: usize, actual: usize },
    /// A later entry has a higher score than an earlier one.
    ScoreOrder { position: usize, previous: i64, actual: i64 },
    /// The same player appears twice.
    DuplicatePlayer { player_id: String },
    /// Stored score differs from the best submission.
    WrongScore { leaderboard_id: String, player_id: String, expected: i64, actual: Option<i64> },
    /// Leaderboard holds a different number of players than were submitted.
    WrongPopulation { leaderboard_id: String, expected: usize, actual: usize },
    /// Rank lookup disagrees with the player's position in the full ranking.
    RankMismatch { leaderboard_id: String, player_id: String, by_lookup: usize, by_position: usize },
    /// Window is not the expected slice of the full ranking.
    WrongWindow { player_id: String, expected: Vec<String>, actual: Vec<String> },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for Violation {}

/// Checks that a slice of a ranking is well formed: ranks consecutive from
/// the first entry's rank, scores non-increasing, no player twice.
pub fn check_ranking(entries: &[RankingEntry]) -> Result<(), Violation> {
    let first_rank = match entries.first() {
        Some(e) => e.rank,
        None => return Ok(()),
    };

    let mut seen = std::collections::HashSet::with_capacity(entries.len());
    for (i, entry) in entries.iter().enumerate() {
        let expected = first_rank + i;
        if entry.rank != expected {
            return Err(Violation::RankGap {
                position: i,
                expected,
                actual: entry.rank,
            });
        }
        if i > 0 && entry.score > entries[i - 1].score {
            return Err(Violation::ScoreOrder {
                position: i,
                previous: entries[i - 1].score,
                actual: entry.score,
            });
        }
        if !seen.insert(entry.player_id.as_str()) {
            return Err(Violation::DuplicatePlayer {
                player_id: entry.player_id.clone(),
            });
        }
    }
    Ok(())
}

/// Checks a window against the full ranking it was cut from.
pub fn check_window(
    full: &[RankingEntry],
    window: &[RankingEntry],
    player_id: &str,
    count: usize,
) -> Result<(), Violation> {
    let expected: Vec<String> = match full.iter().position(|e| e.player_id == player_id) {
        Some(p) => {
            let half = count / 2;
            let start = p.saturating_sub(half);
            let end = (p + half + count % 2).min(full.len());
            full[start..end].iter().map(|e| e.player_id.clone()).collect()
        }
        None => Vec::new(),
    };
    let actual: Vec<String> = window.iter().map(|e| e.player_id.clone()).collect();

    if expected != actual {
        return Err(Violation::WrongWindow {
            player_id: player_id.to_string(),
            expected,
            actual,
        });
    }
    check_ranking(window)
}

/// Tracks the best score submitted per (leaderboard, player) and checks a
/// store against it.
///
/// Safe to feed from many threads at once.
pub struct RankingVerifier {
    /// leaderboard_id -> player_id -> best submitted score
    expected: Mutex<HashMap<String, HashMap<String, i64>>>,
}

impl Default for RankingVerifier {
    fn default() -> Self {
        Self::new()
    }
}

impl RankingVerifier {
    pub fn new() -> Self {
        Self {
            expected: Mutex::new(HashMap::new()),
        }
    }

    /// Register a submission.
    pub fn expect(&self, leaderboard_id: &str, player_id: &str, score: i64) {
        let mut expected = self.expected.lock();
        let best = expected
            .entry(leaderboard_id.to_string())
            .or_default()
            .entry(player_id.to_string())
            .or_insert(score);
        if score > *best {
            *best = score;
        }
    }

    /// Best score submitted for a player.
    pub fn best(&self, leaderboard_id: &str, player_id: &str) -> Option<i64> {
        self.expected
            .lock()
            .get(leaderboard_id)
            .and_then(|players| players.get(player_id).copied())
    }

    /// Verify every registered leaderboard. The store must be quiescent.
    pub fn verify(&self, store: &dyn RankingStore) -> Result<(), Violation> {
        let expected = self.expected.lock();

        for (leaderboard_id, players) in expected.iter() {
            let full = store.top_players(leaderboard_id, 0);
            check_ranking(&full)?;

            if full.len() != players.len() {
                return Err(Violation::WrongPopulation {
                    leaderboard_id: leaderboard_id.clone(),
                    expected: players.len(),
                    actual: full.len(),
                });
            }

            let positions: HashMap<&str, &RankingEntry> =
                full.iter().map(|e| (e.player_id.as_str(), e)).collect();

            for (player_id, &best) in players {
                let actual = positions.get(player_id.as_str()).map(|e| e.score);
                if actual != Some(best) {
                    return Err(Violation::WrongScore {
                        leaderboard_id: leaderboard_id.clone(),
                        player_id: player_id.clone(),
                        expected: best,
                        actual,
                    });
                }

                let by_position = positions[player_id.as_str()].rank;
                let by_lookup = store
                    .player_rank(leaderboard_id, player_id)
                    .map(|r| r.rank)
                    .unwrap_or(0);
                if by_lookup != by_position {
                    return Err(Violation::RankMismatch {
                        leaderboard_id: leaderboard_id.clone(),
                        player_id: player_id.clone(),
                        by_lookup,
                        by_position,
                    });
                }
            }
        }
        Ok(())
    }

    /// Number of distinct players registered across all leaderboards.
    pub fn player_count(&self) -> usize {
        self.expected.lock().values().map(HashMap::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ranking::{MemoryStore, Timestamp};

    fn entry(player_id: &str, score: i64, rank: usize) -> RankingEntry {
        RankingEntry {
            player_id: player_id.to_string(),
            score,
            rank,
        }
    }

    #[test]
    fn test_check_ranking() {
        assert!(check_ranking(&[]).is_ok());
        assert!(check_ranking(&[entry("a", 10, 4), entry("b", 10, 5), entry("c", 3, 6)]).is_ok());

        assert!(matches!(
            check_ranking(&[entry("a", 10, 1), entry("b", 9, 3)]),
            Err(Violation::RankGap { position: 1, expected: 2, actual: 3 })
        ));
        assert!(matches!(
            check_ranking(&[entry("a", 10, 1), entry("b", 11, 2)]),
            Err(Violation::ScoreOrder { position: 1, .. })
        ));
        assert!(matches!(
            check_ranking(&[entry("a", 10, 1), entry("a", 9, 2)]),
            Err(Violation::DuplicatePlayer { .. })
        ));
    }

    #[test]
    fn test_check_window() {
        let full: Vec<_> = (0..6).map(|i| entry(&format!("p{i}"), 100 - i, i as usize + 1)).collect();

        assert!(check_window(&full, &full[1..4], "p2", 3).is_ok());
        assert!(check_window(&full, &full[0..2], "p0", 3).is_ok());
        assert!(check_window(&full, &[], "missing", 3).is_ok());
        assert!(matches!(
            check_window(&full, &full[0..3], "p2", 3),
            Err(Violation::WrongWindow { .. })
        ));
    }

    #[test]
    fn test_verifier_tracks_best() {
        let verifier = RankingVerifier::new();
        verifier.expect("board", "alice", 10);
        verifier.expect("board", "alice", 30);
        verifier.expect("board", "alice", 20);
        assert_eq!(verifier.best("board", "alice"), Some(30));
        assert_eq!(verifier.best("board", "bob"), None);
        assert_eq!(verifier.player_count(), 1);
    }

    #[test]
    fn test_verifier_detects_missing_update() {
        let store = MemoryStore::new();
        let verifier = RankingVerifier::new();

        store.update_score("board", "alice", 10, Timestamp::from_nanos(1));
        verifier.expect("board", "alice", 10);
        assert!(verifier.verify(&store).is_ok());

        verifier.expect("board", "alice", 50);
        assert!(matches!(
            verifier.verify(&store),
            Err(Violation::WrongScore { expected: 50, actual: Some(10), .. })
        ));

        verifier.expect("board", "bob", 5);
        assert!(matches!(verifier.verify(&store), Err(Violation::WrongPopulation { .. })));
    }
}
