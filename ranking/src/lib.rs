//! # Ranking
//!
//! Concurrent in-memory leaderboards.
//!
//! ## Features
//!
//! - **Multiple leaderboards**: provisioned on first submission, ranked independently
//! - **Best score kept**: only a strictly higher score replaces a player's record
//! - **Deterministic ties**: equal scores rank by who reached them first
//! - **Queries**: rank lookup, top N, window around a player
//! - **Two backends**: full re-sort per read, or an index maintained on writes
//!
//! ## Example
//!
//! ```rust
//! use ranking::{RankingConfig, RankingService};
//!
//! let service = RankingService::new(RankingConfig::default())?;
//! service.update_player_score("season-1", "alice", 1200)?;
//! service.update_player_score("season-1", "bob", 1350)?;
//!
//! let top = service.top_players("season-1", 0);
//! assert_eq!(top[0].player_id, "bob");
//! assert_eq!(service.player_rank("season-1", "alice").unwrap().rank, 2);
//! # Ok::<(), ranking::RankingError>(())
//! ```

pub mod clock;
pub mod config;
pub mod error;
pub mod model;
pub mod service;
pub mod store;

#[cfg(feature = "metrics")]
pub mod metrics;

#[cfg(feature = "telemetry")]
pub mod telemetry;

// Re-exports
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{RankingConfig, StoreBackend};
pub use error::{IdKind, RankingError, Result};
pub use model::{PlayerRank, RankingEntry, Timestamp};
pub use service::RankingService;
pub use store::{IndexedStore, MemoryStore, RankingStore};

#[cfg(feature = "telemetry")]
pub use telemetry::{init_tracing, TracingConfig};
