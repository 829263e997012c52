//! Concurrent load run: writers submit random scores, readers query while
//! they do, then the final state is checked against every submission.

use clap::Args;
use ranking::RankingService;
use ranking_test_support::{check_ranking, RankingVerifier, Workload, WorkloadGenerator};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::thread;
use std::time::Instant;

#[derive(Debug, Args)]
pub struct LoadArgs {
    /// Writer threads (the same number of reader threads run alongside)
    #[arg(long, default_value_t = 4)]
    pub threads: usize,

    /// Distinct players per leaderboard
    #[arg(long, default_value_t = 1_000)]
    pub players: usize,

    /// Total submissions across all writers
    #[arg(long, default_value_t = 100_000)]
    pub updates: usize,

    /// Distinct leaderboards
    #[arg(long, default_value_t = 4)]
    pub leaderboards: usize,

    /// Exclusive upper bound for generated scores; small values force ties
    #[arg(long, default_value_t = 10_000)]
    pub max_score: i64,

    /// Base RNG seed; writer `n` uses `seed + n`
    #[arg(long, default_value_t = 42)]
    pub seed: u64,
}

pub fn run(service: &RankingService, args: &LoadArgs) -> Result<(), Box<dyn std::error::Error>> {
    let threads = args.threads.max(1);
    let per_writer = args.updates / threads;
    let workload = Workload::new()
        .with_leaderboards(args.leaderboards)
        .with_players(args.players)
        .with_score_range(0, args.max_score);

    println!(
        "load: {} writers x {} updates, {} leaderboards x {} players, backend={}",
        threads,
        per_writer,
        workload.leaderboards,
        workload.players,
        service.config().backend
    );

    let verifier = RankingVerifier::new();
    let done = AtomicBool::new(false);
    let reads = AtomicU64::new(0);
    let start = Instant::now();

    let write_elapsed = thread::scope(|s| -> Result<_, ranking::RankingError> {
        for r in 0..threads {
            let (done, reads) = (&done, &reads);
            let board = Workload::leaderboard_id(r % workload.leaderboards);
            let player = Workload::player_id(r % workload.players);
            s.spawn(move || {
                while !done.load(Ordering::Acquire) {
                    let top = service.top_players(&board, 0);
                    if let Err(violation) = check_ranking(&top) {
                        tracing::error!(%violation, board = %board, "inconsistent read");
                    }
                    service.players_around(&board, &player, 0);
                    service.player_rank(&board, &player);
                    reads.fetch_add(3, Ordering::Relaxed);
                }
            });
        }

        let writers: Vec<_> = (0..threads)
            .map(|w| {
                let verifier = &verifier;
                let generator = WorkloadGenerator::new(workload.clone(), args.seed + w as u64);
                s.spawn(move || -> Result<(), ranking::RankingError> {
                    for sub in generator.take(per_writer) {
                        verifier.expect(&sub.leaderboard_id, &sub.player_id, sub.score);
                        service.update_player_score(&sub.leaderboard_id, &sub.player_id, sub.score)?;
                    }
                    Ok(())
                })
            })
            .collect();

        let mut outcome = Ok(());
        for writer in writers {
            match writer.join() {
                Ok(Ok(())) => {}
                Ok(Err(e)) => outcome = Err(e),
                Err(_) => tracing::error!("writer thread panicked"),
            }
        }
        let elapsed = start.elapsed();
        // Readers stop even when a writer failed.
        done.store(true, Ordering::Release);
        outcome.map(|_| elapsed)
    })?;

    let total_updates = (per_writer * threads) as f64;
    let total_reads = reads.load(Ordering::Relaxed) as f64;
    let secs = write_elapsed.as_secs_f64().max(f64::EPSILON);
    println!(
        "writes: {:.0} in {:.2?} ({:.2} M/s)",
        total_updates,
        write_elapsed,
        total_updates / secs / 1e6
    );
    println!("reads:  {:.0} concurrent ({:.2} K/s)", total_reads, total_reads / secs / 1e3);

    let verify_start = Instant::now();
    verifier.verify(service.store().as_ref())?;
    println!(
        "verify: {} players OK in {:.2?}",
        verifier.player_count(),
        verify_start.elapsed()
    );
    tracing::info!(players = verifier.player_count(), "load run verified");

    Ok(())
}
