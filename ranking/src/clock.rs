//! Time sources used to stamp submissions.

use crate::model::Timestamp;
use std::sync::atomic::{AtomicI64, Ordering};

/// Source of submission timestamps.
pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}

/// Wall clock that never hands out the same instant twice.
///
/// Two calls landing in the same nanosecond (or a clock stepping backwards)
/// get bumped past the last value returned, so submissions through one clock
/// are strictly ordered by arrival.
#[derive(Debug, Default)]
pub struct SystemClock {
    last: AtomicI64,
}

impl SystemClock {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        let wall = Timestamp::now().as_nanos();
        let mut last = self.last.load(Ordering::Relaxed);
        loop {
            let next = if wall > last { wall } else { last.saturating_add(1) };
            match self
                .last
                .compare_exchange_weak(last, next, Ordering::AcqRel, Ordering::Relaxed)
            {
                Ok(_) => return Timestamp::from_nanos(next),
                Err(actual) => last = actual,
            }
        }
    }
}

/// Deterministic clock for tests and replays.
///
/// Returns the current value, then advances it by `step`.
#[derive(Debug)]
pub struct ManualClock {
    next: AtomicI64,
    step: i64,
}

impl ManualClock {
    pub fn new(start: Timestamp, step: i64) -> Self {
        Self {
            next: AtomicI64::new(start.as_nanos()),
            step,
        }
    }

    /// Moves the clock so the next call returns `at`.
    pub fn set(&self, at: Timestamp) {
        self.next.store(at.as_nanos(), Ordering::Release);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new(Timestamp::from_nanos(0), 1)
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        Timestamp::from_nanos(self.next.fetch_add(self.step, Ordering::AcqRel))
    }
}
