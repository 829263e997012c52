//! Test support for the ranking crate.
//!
//! - [`scenario`]: the ten-player reference walkthrough
//! - [`verify`]: oracle that checks a store against the submissions it received
//! - [`workload`]: seeded random submission streams

pub mod scenario;
pub mod verify;
pub mod workload;

pub use scenario::{seed_walkthrough, WALKTHROUGH, WALKTHROUGH_BOARD};
pub use verify::{check_ranking, check_window, RankingVerifier, Violation};
pub use workload::{Submission, Workload, WorkloadGenerator};
