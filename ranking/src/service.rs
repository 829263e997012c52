//! Service layer over a [`RankingStore`].
//!
//! Stamps submissions with the arrival time, validates identifiers before they
//! reach the store and fills in default sizes for top-N and window queries.

use crate::clock::{Clock, SystemClock};
use crate::config::RankingConfig;
use crate::error::{IdKind, RankingError, Result};
use crate::model::{PlayerRank, RankingEntry};
use crate::store::RankingStore;
use std::sync::Arc;

#[cfg(feature = "metrics")]
use crate::metrics::{Metrics, QueryOp};

/// Leaderboard service.
pub struct RankingService {
    store: Arc<dyn RankingStore>,
    clock: Arc<dyn Clock>,
    config: RankingConfig,
    #[cfg(feature = "metrics")]
    metrics: Metrics,
}

impl RankingService {
    /// Create a service backed by the store named in `config`.
    pub fn new(config: RankingConfig) -> Result<Self> {
        let store = config.backend.build();
        Self::with_store(store, config)
    }

    /// Create a service over an existing store.
    pub fn with_store(store: Arc<dyn RankingStore>, config: RankingConfig) -> Result<Self> {
        config.validate()?;
        tracing::debug!(backend = %config.backend, "ranking service created");
        Ok(Self {
            store,
            clock: Arc::new(SystemClock::new()),
            config,
            #[cfg(feature = "metrics")]
            metrics: Metrics::new(),
        })
    }

    /// Replace the time source used to stamp submissions.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn store(&self) -> &Arc<dyn RankingStore> {
        &self.store
    }

    pub fn config(&self) -> &RankingConfig {
        &self.config
    }

    #[cfg(feature = "metrics")]
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Submit a score stamped with the current time.
    ///
    /// Succeeds whether or not the score improved the player's standing.
    pub fn update_player_score(&self, leaderboard_id: &str, player_id: &str, score: i64) -> Result<()> {
        validate_id(IdKind::Leaderboard, leaderboard_id)?;
        validate_id(IdKind::Player, player_id)?;

        let submitted_at = self.clock.now();
        self.store
            .update_score(leaderboard_id, player_id, score, submitted_at);

        #[cfg(feature = "metrics")]
        self.metrics.submissions_total.inc();

        Ok(())
    }

    pub fn player_rank(&self, leaderboard_id: &str, player_id: &str) -> Option<PlayerRank> {
        #[cfg(feature = "metrics")]
        let started = std::time::Instant::now();

        let rank = self.store.player_rank(leaderboard_id, player_id);

        #[cfg(feature = "metrics")]
        self.metrics.observe_query(QueryOp::Rank, started);

        rank
    }

    /// Top `limit` players; 0 uses the configured default.
    pub fn top_players(&self, leaderboard_id: &str, limit: usize) -> Vec<RankingEntry> {
        let limit = if limit == 0 {
            self.config.default_top_limit
        } else {
            limit
        };

        #[cfg(feature = "metrics")]
        let started = std::time::Instant::now();

        let top = self.store.top_players(leaderboard_id, limit);

        #[cfg(feature = "metrics")]
        self.metrics.observe_query(QueryOp::Top, started);

        top
    }

    /// Window of `count` players around `player_id`; 0 uses the configured default.
    pub fn players_around(&self, leaderboard_id: &str, player_id: &str, count: usize) -> Vec<RankingEntry> {
        let count = if count == 0 {
            self.config.default_around_count
        } else {
            count
        };

        #[cfg(feature = "metrics")]
        let started = std::time::Instant::now();

        let around = self.store.players_around(leaderboard_id, player_id, count);

        #[cfg(feature = "metrics")]
        self.metrics.observe_query(QueryOp::Around, started);

        around
    }
}

fn validate_id(kind: IdKind, id: &str) -> Result<()> {
    if id.trim().is_empty() {
        return Err(RankingError::invalid_id(kind, "cannot be empty"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::config::StoreBackend;
    use crate::model::Timestamp;

    fn service(backend: StoreBackend) -> RankingService {
        let config = RankingConfig::default().with_backend(backend);
        RankingService::new(config)
            .unwrap()
            .with_clock(Arc::new(ManualClock::new(Timestamp::from_nanos(1_000), 1_000)))
    }

    #[test]
    fn test_update_and_query() {
        for backend in [StoreBackend::Memory, StoreBackend::Indexed] {
            let svc = service(backend);
            svc.update_player_score("arena", "alice", 100).unwrap();
            svc.update_player_score("arena", "bob", 100).unwrap();
            svc.update_player_score("arena", "carol", 50).unwrap();

            // Same score: the earlier arrival ranks first.
            assert_eq!(svc.player_rank("arena", "alice").unwrap().rank, 1);
            assert_eq!(svc.player_rank("arena", "bob").unwrap().rank, 2);
            assert_eq!(svc.player_rank("arena", "carol").unwrap(), PlayerRank { rank: 3, score: 50 });
        }
    }

    #[test]
    fn test_rejects_empty_ids() {
        let svc = service(StoreBackend::Memory);

        let err = svc.update_player_score("", "alice", 1).unwrap_err();
        assert!(matches!(err, RankingError::InvalidId { kind: IdKind::Leaderboard, .. }));

        let err = svc.update_player_score("arena", "  ", 1).unwrap_err();
        assert!(matches!(err, RankingError::InvalidId { kind: IdKind::Player, .. }));

        assert!(svc.store().leaderboard_ids().is_empty());
    }

    #[test]
    fn test_default_top_limit() {
        let svc = service(StoreBackend::Memory);
        for i in 0..15 {
            svc.update_player_score("arena", &format!("p{i:02}"), i).unwrap();
        }

        assert_eq!(svc.top_players("arena", 0).len(), 10);
        assert_eq!(svc.top_players("arena", 3).len(), 3);
        assert_eq!(svc.top_players("arena", 100).len(), 15);
    }

    #[test]
    fn test_default_around_count() {
        let svc = service(StoreBackend::Indexed);
        for i in 0..15 {
            svc.update_player_score("arena", &format!("p{i:02}"), i).unwrap();
        }

        // p07 sits at rank 8: two above, two below.
        let around = svc.players_around("arena", "p07", 0);
        let ranks: Vec<_> = around.iter().map(|e| e.rank).collect();
        assert_eq!(ranks, vec![6, 7, 8, 9, 10]);

        assert_eq!(svc.players_around("arena", "p07", 3).len(), 3);
    }

    #[test]
    fn test_custom_defaults() {
        let config = RankingConfig::default()
            .with_top_limit(2)
            .with_around_count(1);
        let svc = RankingService::new(config).unwrap();
        for i in 0..5 {
            svc.update_player_score("arena", &format!("p{i}"), i).unwrap();
        }

        assert_eq!(svc.top_players("arena", 0).len(), 2);
        let around = svc.players_around("arena", "p2", 0);
        assert_eq!(around.len(), 1);
        assert_eq!(around[0].player_id, "p2");
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = RankingConfig::default().with_around_count(0);
        assert!(RankingService::new(config).is_err());
    }

    #[cfg(feature = "metrics")]
    #[test]
    fn test_metrics_recorded() {
        let svc = service(StoreBackend::Memory);
        svc.update_player_score("arena", "alice", 1).unwrap();
        svc.top_players("arena", 0);
        svc.player_rank("arena", "alice");

        let output = svc.metrics().gather();
        assert!(output.contains("ranking_submissions_total 1"));
        assert!(output.contains("ranking_queries_total{op=\"rank\"} 1"));
    }
}
