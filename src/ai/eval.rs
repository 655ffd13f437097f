use crate::ai::damage::{average_team_damage, expected_damage, Combatant};
use crate::data::species::Pokemon;
use serde::Serialize;
use std::fmt;

/// Teammates pick better than random moves and some status moves help, so
/// their average output is scaled up.
const TEAMMATE_FUDGE: f64 = 1.5;
/// Received damage never drops below this, keeping the score ratio finite.
const MIN_RECEIVED_DAMAGE: f64 = 1e-6;

/// Ratio of damage dealt by the team to damage received when `attacker` uses
/// the move in slot `move_index` against `defender`.
///
/// `teammates` is the whole roster. The attacker and defender are filtered out
/// of the dealt estimate only; the received estimate covers everyone.
pub fn move_score(attacker: Combatant<'_>, move_index: usize, defender: &Pokemon, teammates: &[&Pokemon]) -> f64 {
    let mut dealt = expected_damage(attacker, move_index, defender, false) / 2.0;
    let others: Vec<&Pokemon> = teammates
        .iter()
        .copied()
        .filter(|p| p.name != attacker.pokemon.name && p.name != defender.name)
        .collect();
    dealt += 3.0 * average_team_damage(&others, &[defender], false) / 2.0 * TEAMMATE_FUDGE;

    let blocks_spread = !attacker.dynamax
        && attacker
            .pokemon
            .moves
            .get(move_index)
            .map_or(false, |m| m.name == "Wide Guard");
    let boss = Combatant::new(defender);
    let mut received = 0.0;
    for (i, incoming) in defender.moves.iter().enumerate() {
        if incoming.is_spread {
            if !blocks_spread {
                received += expected_damage(boss, i, attacker.pokemon, true);
                received += 3.0 * average_team_damage(&[defender], teammates, true);
            }
        } else {
            let halved = if attacker.dynamax { 2.0 } else { 1.0 };
            received += 0.25 * expected_damage(boss, i, attacker.pokemon, true) / halved;
            received += 0.75 * average_team_damage(&[defender], teammates, false);
        }
    }
    let average_received = if defender.moves.is_empty() {
        0.0
    } else {
        received / defender.moves.len() as f64
    };
    dealt / average_received.max(MIN_RECEIVED_DAMAGE)
}

/// Index of the highest scoring move that still has PP.
///
/// Ties go to the lower index. When no move has PP left this returns 0, which
/// lets the game fall back to Struggle.
pub fn select_best_move(attacker: Combatant<'_>, defender: &Pokemon, teammates: &[&Pokemon]) -> usize {
    let mut best: Option<(usize, f64)> = None;
    for i in 0..attacker.pokemon.moves.len() {
        if attacker.pokemon.remaining_pp(i) == 0 {
            continue;
        }
        let score = move_score(attacker, i, defender, teammates);
        if best.map_or(true, |(_, s)| score > s) {
            best = Some((i, score));
        }
    }
    best.map_or(0, |(i, _)| i)
}

pub fn combine_matchup_scores(base: f64, dmax: f64) -> f64 {
    base.max((base + dmax) / 2.0)
}

/// Overall score of `attacker` against `boss`, taking the better of fighting
/// normally and spending the dynamax on this matchup.
pub fn evaluate_matchup(attacker: &Pokemon, boss: &Pokemon, teammates: &[&Pokemon]) -> f64 {
    // Ditto transforms into its opponent.
    let attacker = if attacker.name == "Ditto" { boss } else { attacker };

    let normal = Combatant::new(attacker);
    let best = select_best_move(normal, boss, teammates);
    let base = move_score(normal, best, boss, teammates);

    let dmax = Combatant::dynamaxed(attacker);
    let best_dmax = select_best_move(dmax, boss, teammates);
    let dmax_score = move_score(dmax, best_dmax, boss, teammates);

    combine_matchup_scores(base, dmax_score)
}

#[derive(Clone, Debug, Serialize)]
pub struct MoveReport {
    pub name: String,
    pub power: f64,
    pub accuracy: f64,
    pub score: f64,
}

#[derive(Clone, Debug, Serialize)]
pub struct MatchupSummary {
    pub attacker: String,
    pub defender: String,
    pub overall: f64,
    pub moves: Vec<MoveReport>,
    pub max_moves: Vec<MoveReport>,
}

pub fn matchup_summary(attacker: &Pokemon, defender: &Pokemon, teammates: &[&Pokemon]) -> MatchupSummary {
    let report = |combatant: Combatant<'_>| -> Vec<MoveReport> {
        (0..combatant.pokemon.moves.len())
            .filter_map(|i| {
                let used = combatant.move_at(i)?;
                Some(MoveReport {
                    name: used.name.clone(),
                    power: used.power,
                    accuracy: used.accuracy,
                    score: move_score(combatant, i, defender, teammates),
                })
            })
            .collect()
    };
    MatchupSummary {
        attacker: attacker.name.clone(),
        defender: defender.name.clone(),
        overall: evaluate_matchup(attacker, defender, teammates),
        moves: report(Combatant::new(attacker)),
        max_moves: report(Combatant::dynamaxed(attacker)),
    }
}

impl fmt::Display for MatchupSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Matchup between {} and {}: {:.2}", self.attacker, self.defender, self.overall)?;
        for m in self.moves.iter().chain(self.max_moves.iter()) {
            writeln!(
                f,
                "Score for {} (Effective BP {:.0}, accuracy {:.2}): {:.2}",
                m.name, m.power, m.accuracy, m.score
            )?;
        }
        Ok(())
    }
}
