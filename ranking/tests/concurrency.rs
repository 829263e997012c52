//! Multi-threaded stress tests.
//!
//! Writers and readers hammer the same leaderboards; afterwards every stored
//! score must equal the best submission, and every read taken during the run
//! must have been a well-formed ranking.

use ranking::clock::{Clock, SystemClock};
use ranking::{RankingService, RankingConfig, RankingStore, StoreBackend, Timestamp};
use ranking_test_support::{check_ranking, RankingVerifier, Workload, WorkloadGenerator};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;

const WRITERS: usize = 4;
const READERS: usize = 3;
const UPDATES_PER_WRITER: usize = 5_000;

fn stress(backend: StoreBackend) {
    let store = backend.build();
    let clock = Arc::new(SystemClock::new());
    let verifier = Arc::new(RankingVerifier::new());
    let barrier = Arc::new(Barrier::new(WRITERS + READERS));
    let done = Arc::new(AtomicBool::new(false));
    let reads = Arc::new(AtomicUsize::new(0));

    let workload = Workload::new()
        .with_leaderboards(3)
        .with_players(200)
        .with_score_range(0, 500);

    let writers: Vec<_> = (0..WRITERS)
        .map(|w| {
            let store = store.clone();
            let clock = clock.clone();
            let verifier = verifier.clone();
            let barrier = barrier.clone();
            let workload = workload.clone();
            thread::spawn(move || {
                let generator = WorkloadGenerator::new(workload, w as u64);
                barrier.wait();
                for s in generator.take(UPDATES_PER_WRITER) {
                    verifier.expect(&s.leaderboard_id, &s.player_id, s.score);
                    store.update_score(&s.leaderboard_id, &s.player_id, s.score, clock.now());
                }
            })
        })
        .collect();

    let readers: Vec<_> = (0..READERS)
        .map(|r| {
            let store = store.clone();
            let barrier = barrier.clone();
            let done = done.clone();
            let reads = reads.clone();
            thread::spawn(move || {
                barrier.wait();
                let board = Workload::leaderboard_id(r % 3);
                let player = Workload::player_id(r * 7);
                while !done.load(Ordering::Acquire) {
                    let top = store.top_players(&board, 25);
                    check_ranking(&top).unwrap();
                    if let Some(first) = top.first() {
                        assert_eq!(first.rank, 1);
                    }

                    let around = store.players_around(&board, &player, 9);
                    check_ranking(&around).unwrap();

                    if let Some(rank) = store.player_rank(&board, &player) {
                        assert!(rank.rank >= 1);
                        assert!(rank.rank <= store.player_count(&board));
                    }
                    reads.fetch_add(1, Ordering::Relaxed);
                }
            })
        })
        .collect();

    for w in writers {
        w.join().unwrap();
    }
    done.store(true, Ordering::Release);
    for r in readers {
        r.join().unwrap();
    }

    assert!(reads.load(Ordering::Relaxed) > 0);
    verifier.verify(store.as_ref()).unwrap();
}

#[test]
fn test_memory_store_under_contention() {
    stress(StoreBackend::Memory);
}

#[test]
fn test_indexed_store_under_contention() {
    stress(StoreBackend::Indexed);
}

/// Many threads racing to improve the same player: the max always wins.
#[test]
fn test_no_lost_improvements() {
    for backend in [StoreBackend::Memory, StoreBackend::Indexed] {
        let store = backend.build();
        let barrier = Arc::new(Barrier::new(8));

        let handles: Vec<_> = (0..8i64)
            .map(|t| {
                let store = store.clone();
                let barrier = barrier.clone();
                thread::spawn(move || {
                    barrier.wait();
                    for i in 0..1_000i64 {
                        let score = i * 8 + t;
                        store.update_score("race", "hero", score, Timestamp::from_nanos(score));
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        let rank = store.player_rank("race", "hero").unwrap();
        assert_eq!(rank.score, 999 * 8 + 7, "{backend}");
        assert_eq!(store.player_count("race"), 1);
    }
}

/// Concurrent first submissions provision each leaderboard exactly once.
#[test]
fn test_concurrent_provisioning() {
    for backend in [StoreBackend::Memory, StoreBackend::Indexed] {
        let service = Arc::new(
            RankingService::with_store(backend.build(), RankingConfig::default()).unwrap(),
        );
        let barrier = Arc::new(Barrier::new(6));

        let handles: Vec<_> = (0..6)
            .map(|t| {
                let service = service.clone();
                let barrier = barrier.clone();
                thread::spawn(move || {
                    barrier.wait();
                    for b in 0..20 {
                        service
                            .update_player_score(&format!("board_{b}"), &format!("player_{t}"), t)
                            .unwrap();
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        let store: &Arc<dyn RankingStore> = service.store();
        assert_eq!(store.leaderboard_ids().len(), 20, "{backend}");
        for b in 0..20 {
            let board = format!("board_{b}");
            assert_eq!(store.player_count(&board), 6);
            assert_eq!(store.top_players(&board, 1)[0].player_id, "player_5");
        }
    }
}
