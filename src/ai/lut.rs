use crate::ai::eval::evaluate_matchup;
use crate::data::species::{Pokemon, Roster};
use crate::data::tables::{MatchupTables, ScoreTable};
use rayon::prelude::*;
use std::collections::BTreeMap;

fn score_rows(attackers: &Roster, defenders: &Roster, team: &[&Pokemon]) -> ScoreTable {
    let total = attackers.len();
    attackers
        .par_iter()
        .map(|(name, attacker)| {
            let row: BTreeMap<String, f64> = defenders
                .iter()
                .map(|(other, defender)| (other.clone(), evaluate_matchup(attacker, defender, team)))
                .collect();
            log::debug!("Finished computing matchups for {} ({} attackers)", name, total);
            (name.clone(), row)
        })
        .collect()
}

/// rental -> boss -> score, with every rental as a teammate.
pub fn build_boss_matchups(rentals: &Roster, bosses: &Roster) -> ScoreTable {
    log::info!(
        "Computing {} boss matchups ({} rentals x {} bosses)",
        rentals.len() * bosses.len(),
        rentals.len(),
        bosses.len()
    );
    let team: Vec<&Pokemon> = rentals.values().collect();
    score_rows(rentals, bosses, &team)
}

/// rental -> rental -> score, plus each rental's row sum normalized so the
/// scores average to 1.0.
pub fn build_rental_matchups(rentals: &Roster) -> (ScoreTable, BTreeMap<String, f64>) {
    log::info!("Computing rental matchups for {} rentals", rentals.len());
    let team: Vec<&Pokemon> = rentals.values().collect();
    let table = score_rows(rentals, rentals, &team);

    let mut scores: BTreeMap<String, f64> = table
        .iter()
        .map(|(name, row)| (name.clone(), row.values().sum()))
        .collect();
    let total: f64 = scores.values().sum();
    let mean = total / scores.len().max(1) as f64;
    if mean != 0.0 {
        for score in scores.values_mut() {
            *score /= mean;
        }
    }
    (table, scores)
}

pub fn build_tables(rentals: &Roster, bosses: &Roster) -> MatchupTables {
    let boss_matchups = build_boss_matchups(rentals, bosses);
    let (rental_matchups, rental_scores) = build_rental_matchups(rentals);
    log::info!("Computed matchup tables");
    MatchupTables {
        boss_matchups,
        rental_matchups,
        rental_scores,
    }
}
