//! Per-leaderboard locked store with an ordered index maintained on writes.

use super::order::{clamp_limit, window_bounds, SortKey};
use super::RankingStore;
use crate::model::{PlayerRank, PlayerRecord, RankingEntry, Timestamp};
use dashmap::DashMap;
use parking_lot::RwLock;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

/// In-memory store with one lock per leaderboard.
///
/// Each leaderboard keeps its records by player alongside a sorted index, so
/// reads walk the index instead of sorting. Top-N costs O(k); rank and window
/// lookups scan the index up to the player, O(n) worst case.
pub struct IndexedStore {
    boards: DashMap<String, Arc<RwLock<Board>>>,
}

#[derive(Default)]
struct Board {
    /// Records indexed by player_id.
    by_player: HashMap<String, PlayerRecord>,
    /// Same records in rank order.
    sorted: BTreeSet<SortKey>,
}

impl Board {
    fn submit(&mut self, leaderboard_id: &str, player_id: &str, score: i64, submitted_at: Timestamp) {
        match self.by_player.get_mut(player_id) {
            Some(existing) => {
                let old_key = SortKey::of(existing);
                let previous = existing.score;
                if existing.improve(score, submitted_at) {
                    self.sorted.remove(&old_key);
                    self.sorted.insert(SortKey::of(existing));
                    tracing::trace!(leaderboard_id = %existing.leaderboard_id, player_id, previous, score, "score improved");
                } else {
                    tracing::trace!(leaderboard_id, player_id, current = previous, score, "submission ignored");
                }
            }
            None => {
                let record = PlayerRecord::new(leaderboard_id, player_id, score, submitted_at);
                self.sorted.insert(SortKey::of(&record));
                self.by_player.insert(player_id.to_string(), record);
                tracing::trace!(leaderboard_id, player_id, score, "player added");
            }
        }
    }

    /// Zero-indexed position of a player in rank order.
    fn position(&self, player_id: &str) -> Option<usize> {
        let key = SortKey::of(self.by_player.get(player_id)?);
        Some(self.sorted.range(..key).count())
    }

    fn entries(&self, range: std::ops::Range<usize>) -> Vec<RankingEntry> {
        self.sorted
            .iter()
            .enumerate()
            .skip(range.start)
            .take(range.len())
            .map(|(i, key)| RankingEntry {
                player_id: key.player_id().to_string(),
                score: key.score(),
                rank: i + 1,
            })
            .collect()
    }
}

impl IndexedStore {
    pub fn new() -> Self {
        Self {
            boards: DashMap::new(),
        }
    }

    fn board(&self, leaderboard_id: &str) -> Option<Arc<RwLock<Board>>> {
        self.boards.get(leaderboard_id).map(|b| Arc::clone(&b))
    }

    fn board_or_create(&self, leaderboard_id: &str) -> Arc<RwLock<Board>> {
        if let Some(board) = self.board(leaderboard_id) {
            return board;
        }
        let board = self
            .boards
            .entry(leaderboard_id.to_string())
            .or_insert_with(|| {
                tracing::debug!(leaderboard_id, "leaderboard created");
                Arc::new(RwLock::new(Board::default()))
            });
        Arc::clone(&board)
    }
}

impl Default for IndexedStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RankingStore for IndexedStore {
    fn update_score(&self, leaderboard_id: &str, player_id: &str, score: i64, submitted_at: Timestamp) {
        // The map shard guard is released before the board lock is taken.
        let board = self.board_or_create(leaderboard_id);
        board.write().submit(leaderboard_id, player_id, score, submitted_at);
    }

    fn player_rank(&self, leaderboard_id: &str, player_id: &str) -> Option<PlayerRank> {
        let board = self.board(leaderboard_id)?;
        let board = board.read();

        let score = board.by_player.get(player_id)?.score;
        let position = board.position(player_id)?;
        Some(PlayerRank {
            rank: position + 1,
            score,
        })
    }

    fn top_players(&self, leaderboard_id: &str, limit: usize) -> Vec<RankingEntry> {
        let board = match self.board(leaderboard_id) {
            Some(b) => b,
            None => return Vec::new(),
        };
        let board = board.read();

        let limit = clamp_limit(limit, board.sorted.len());
        board.entries(0..limit)
    }

    fn players_around(&self, leaderboard_id: &str, player_id: &str, count: usize) -> Vec<RankingEntry> {
        let board = match self.board(leaderboard_id) {
            Some(b) => b,
            None => return Vec::new(),
        };
        let board = board.read();

        match board.position(player_id) {
            Some(position) => board.entries(window_bounds(position, count, board.sorted.len())),
            None => Vec::new(),
        }
    }

    fn player_count(&self, leaderboard_id: &str) -> usize {
        match self.board(leaderboard_id) {
            Some(board) => {
                let board = board.read();
                board.by_player.len()
            }
            None => 0,
        }
    }

    fn leaderboard_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.boards.iter().map(|b| b.key().clone()).collect();
        ids.sort();
        ids
    }
}
