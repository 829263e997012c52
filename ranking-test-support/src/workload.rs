//! Seeded random submission streams for stress tests and load runs.
//!
//! # Example
//!
//! ```
//! use ranking_test_support::workload::{Workload, WorkloadGenerator};
//!
//! let workload = Workload::new()
//!     .with_leaderboards(2)
//!     .with_players(50)
//!     .with_score_range(0, 1_000);
//!
//! let mut generator = WorkloadGenerator::new(workload, 42);
//! let submission = generator.next_submission();
//! assert!(submission.score < 1_000);
//! ```

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Shape of a generated workload.
#[derive(Debug, Clone)]
pub struct Workload {
    /// Number of distinct leaderboards.
    pub leaderboards: usize,
    /// Number of distinct players per leaderboard.
    pub players: usize,
    /// Lowest score generated (inclusive).
    pub min_score: i64,
    /// Highest score generated (exclusive).
    pub max_score: i64,
}

impl Default for Workload {
    fn default() -> Self {
        Self::new()
    }
}

impl Workload {
    pub fn new() -> Self {
        Self {
            leaderboards: 1,
            players: 100,
            min_score: 0,
            max_score: 10_000,
        }
    }

    pub fn with_leaderboards(mut self, leaderboards: usize) -> Self {
        self.leaderboards = leaderboards.max(1);
        self
    }

    pub fn with_players(mut self, players: usize) -> Self {
        self.players = players.max(1);
        self
    }

    /// A narrow range produces many ties.
    pub fn with_score_range(mut self, min_score: i64, max_score: i64) -> Self {
        self.min_score = min_score;
        self.max_score = max_score.max(min_score + 1);
        self
    }

    pub fn leaderboard_id(index: usize) -> String {
        format!("board_{:03}", index)
    }

    pub fn player_id(index: usize) -> String {
        format!("player_{:05}", index)
    }
}

/// One generated score submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub leaderboard_id: String,
    pub player_id: String,
    pub score: i64,
}

/// Deterministic submission generator.
pub struct WorkloadGenerator {
    workload: Workload,
    rng: StdRng,
    generated: usize,
}

impl WorkloadGenerator {
    pub fn new(workload: Workload, seed: u64) -> Self {
        Self {
            workload,
            rng: StdRng::seed_from_u64(seed),
            generated: 0,
        }
    }

    pub fn next_submission(&mut self) -> Submission {
        self.generated += 1;
        let board = self.rng.gen_range(0..self.workload.leaderboards);
        let player = self.rng.gen_range(0..self.workload.players);
        let score = self
            .rng
            .gen_range(self.workload.min_score..self.workload.max_score);

        Submission {
            leaderboard_id: Workload::leaderboard_id(board),
            player_id: Workload::player_id(player),
            score,
        }
    }

    /// Submissions produced so far.
    pub fn generated(&self) -> usize {
        self.generated
    }
}

impl Iterator for WorkloadGenerator {
    type Item = Submission;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.next_submission())
    }
}
