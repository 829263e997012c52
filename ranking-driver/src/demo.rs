//! Walkthrough replay: ten players, one tie, one improvement.

use ranking::{RankingEntry, RankingService, Result};
use ranking_test_support::{WALKTHROUGH, WALKTHROUGH_BOARD};

const FOCUS_PLAYER: &str = "player_01";
const IMPROVED_SCORE: i64 = 1010;

pub fn run(service: &RankingService) -> Result<()> {
    println!("=== Submitting scores ===");
    for (player_id, score) in WALKTHROUGH {
        service.update_player_score(WALKTHROUGH_BOARD, player_id, score)?;
        println!("{} submitted {}", player_id, score);
    }

    println!("\n=== Top 3 ===");
    print_entries(&service.top_players(WALKTHROUGH_BOARD, 3));

    println!("\n=== Rank lookup ===");
    print_rank(service, FOCUS_PLAYER);

    println!("\n=== Around {} ===", FOCUS_PLAYER);
    print_entries(&service.players_around(WALKTHROUGH_BOARD, FOCUS_PLAYER, 5));

    println!("\n=== After improvement ===");
    service.update_player_score(WALKTHROUGH_BOARD, FOCUS_PLAYER, IMPROVED_SCORE)?;
    println!("{} submitted {}", FOCUS_PLAYER, IMPROVED_SCORE);
    print_rank(service, FOCUS_PLAYER);

    println!("\n=== Top 3 after improvement ===");
    print_entries(&service.top_players(WALKTHROUGH_BOARD, 3));

    Ok(())
}

fn print_rank(service: &RankingService, player_id: &str) {
    match service.player_rank(WALKTHROUGH_BOARD, player_id) {
        Some(rank) => println!("{}: #{} with {}", player_id, rank.rank, rank.score),
        None => println!("{}: not ranked", player_id),
    }
}

fn print_entries(entries: &[RankingEntry]) {
    for entry in entries {
        println!("#{:<3} {:<12} {}", entry.rank, entry.player_id, entry.score);
    }
}
