//! Total order over records and the slicing rules shared by both stores.

use crate::model::{PlayerRecord, Timestamp};
use std::cmp::{Ordering, Reverse};
use std::ops::Range;

/// Compares two records by rank: best first.
pub(crate) fn compare_records(a: &PlayerRecord, b: &PlayerRecord) -> Ordering {
    b.score
        .cmp(&a.score)
        .then(a.last_update_time.cmp(&b.last_update_time))
        .then_with(|| a.player_id.cmp(&b.player_id))
}

/// Index key whose derived `Ord` matches [`compare_records`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct SortKey {
    score: Reverse<i64>,
    reached_at: Timestamp,
    player_id: String,
}

impl SortKey {
    pub fn of(record: &PlayerRecord) -> Self {
        Self {
            score: Reverse(record.score),
            reached_at: record.last_update_time,
            player_id: record.player_id.clone(),
        }
    }

    pub fn player_id(&self) -> &str {
        &self.player_id
    }

    pub fn score(&self) -> i64 {
        self.score.0
    }
}

/// Number of entries a top-N query returns.
pub(crate) fn clamp_limit(limit: usize, population: usize) -> usize {
    if limit == 0 || limit > population {
        population
    } else {
        limit
    }
}

/// Positions covered by a window of `count` entries around `position`.
pub(crate) fn window_bounds(position: usize, count: usize, population: usize) -> Range<usize> {
    let half = count / 2;
    let start = position.saturating_sub(half);
    let end = position
        .saturating_add(half)
        .saturating_add(count % 2)
        .min(population);
    start..end
}
