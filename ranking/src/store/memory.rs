//! Single-lock store that recomputes the ranking on every read.

use super::order::{clamp_limit, compare_records, window_bounds};
use super::RankingStore;
use crate::model::{PlayerRank, PlayerRecord, RankingEntry, Timestamp};
use parking_lot::RwLock;
use std::collections::HashMap;

/// leaderboard_id -> player_id -> record
type Boards = HashMap<String, HashMap<String, PlayerRecord>>;

/// In-memory store guarded by one reader/writer lock.
///
/// Writes take the exclusive lock for provisioning, lookup and replace.
/// Reads take the shared lock for the whole snapshot-and-sort, so every
/// answer reflects a single point in time. Each read costs O(n log n) in the
/// leaderboard's population.
pub struct MemoryStore {
    boards: RwLock<Boards>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            boards: RwLock::new(HashMap::new()),
        }
    }

    /// Full ranking of one leaderboard. Caller must hold the lock.
    fn ranked(boards: &Boards, leaderboard_id: &str) -> Vec<RankingEntry> {
        let board = match boards.get(leaderboard_id) {
            Some(b) if !b.is_empty() => b,
            _ => return Vec::new(),
        };

        let mut records: Vec<&PlayerRecord> = board.values().collect();
        records.sort_by(|a, b| compare_records(a, b));

        records
            .into_iter()
            .enumerate()
            .map(|(i, record)| record.to_entry(i + 1))
            .collect()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RankingStore for MemoryStore {
    fn update_score(&self, leaderboard_id: &str, player_id: &str, score: i64, submitted_at: Timestamp) {
        let mut boards = self.boards.write();

        let board = boards.entry(leaderboard_id.to_string()).or_default();

        match board.get_mut(player_id) {
            Some(existing) => {
                let previous = existing.score;
                if existing.improve(score, submitted_at) {
                    tracing::trace!(leaderboard_id = %existing.leaderboard_id, player_id, previous, score, "score improved");
                } else {
                    tracing::trace!(leaderboard_id, player_id, current = previous, score, "submission ignored");
                }
            }
            None => {
                board.insert(
                    player_id.to_string(),
                    PlayerRecord::new(leaderboard_id, player_id, score, submitted_at),
                );
                tracing::trace!(leaderboard_id, player_id, score, "player added");
            }
        }
    }

    fn player_rank(&self, leaderboard_id: &str, player_id: &str) -> Option<PlayerRank> {
        let boards = self.boards.read();

        let record = boards.get(leaderboard_id)?.get(player_id)?;

        Self::ranked(&boards, leaderboard_id)
            .iter()
            .position(|entry| entry.player_id == player_id)
            .map(|i| PlayerRank {
                rank: i + 1,
                score: record.score,
            })
    }

    fn top_players(&self, leaderboard_id: &str, limit: usize) -> Vec<RankingEntry> {
        let boards = self.boards.read();

        let mut ranked = Self::ranked(&boards, leaderboard_id);
        ranked.truncate(clamp_limit(limit, ranked.len()));
        ranked
    }

    fn players_around(&self, leaderboard_id: &str, player_id: &str, count: usize) -> Vec<RankingEntry> {
        let boards = self.boards.read();

        let known = boards
            .get(leaderboard_id)
            .is_some_and(|board| board.contains_key(player_id));
        if !known {
            return Vec::new();
        }

        let ranked = Self::ranked(&boards, leaderboard_id);
        let position = match ranked.iter().position(|entry| entry.player_id == player_id) {
            Some(p) => p,
            None => return Vec::new(),
        };

        ranked[window_bounds(position, count, ranked.len())].to_vec()
    }

    fn player_count(&self, leaderboard_id: &str) -> usize {
        self.boards
            .read()
            .get(leaderboard_id)
            .map(HashMap::len)
            .unwrap_or(0)
    }

    fn leaderboard_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.boards.read().keys().cloned().collect();
        ids.sort();
        ids
    }
}
