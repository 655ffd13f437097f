use crate::data::moves::{Move, MoveCategory};
use crate::data::species::{Pokemon, StatusCondition};
use crate::data::type_chart::PokemonType;

/// Mean of the 0.85..1.0 damage roll.
const AVERAGE_ROLL: f64 = 0.925;
const SPREAD_PENALTY: f64 = 0.75;

/// A creature together with whether it is currently dynamaxed.
///
/// Dynamax only changes which move list is used, so it travels with the
/// reference instead of being written onto the shared record.
#[derive(Clone, Copy, Debug)]
pub struct Combatant<'a> {
    pub pokemon: &'a Pokemon,
    pub dynamax: bool,
}

impl<'a> Combatant<'a> {
    pub fn new(pokemon: &'a Pokemon) -> Self {
        Self {
            pokemon,
            dynamax: false,
        }
    }

    pub fn dynamaxed(pokemon: &'a Pokemon) -> Self {
        Self {
            pokemon,
            dynamax: true,
        }
    }

    pub fn with_dynamax(pokemon: &'a Pokemon, dynamax: bool) -> Self {
        Self { pokemon, dynamax }
    }

    /// The move that would be used from slot `move_index` in the current stance.
    pub fn move_at(&self, move_index: usize) -> Option<&'a Move> {
        if self.dynamax {
            self.pokemon.max_moves.get(move_index)
        } else {
            self.pokemon.moves.get(move_index)
        }
    }
}

pub fn type_effectiveness(attack: PokemonType, defend: Option<PokemonType>) -> f64 {
    match defend {
        Some(defend) => attack.against(defend),
        None => 1.0,
    }
}

pub fn ability_modifier(attacker: &Pokemon, move_index: usize, defender: &Pokemon) -> f64 {
    if matches!(attacker.ability.as_str(), "Mold Breaker" | "Turboblaze" | "Teravolt") {
        return 1.0;
    }
    let Some(used) = attacker.moves.get(move_index) else {
        return 1.0;
    };
    let ability = defender.ability.as_str();
    match used.move_type {
        PokemonType::Ground if ability == "Levitate" => {
            if used.name == "Thousand Arrows" {
                1.0
            } else {
                0.0
            }
        }
        PokemonType::Water if matches!(ability, "Water Absorb" | "Storm Drain" | "Dry Skin") => 0.0,
        PokemonType::Fire => match ability {
            "Flash Fire" => 0.0,
            "Fluffy" | "Dry Skin" => 2.0,
            "Thick Fat" | "Heatproof" => 0.5,
            _ => 1.0,
        },
        PokemonType::Grass if ability == "Sap Sipper" => 0.0,
        PokemonType::Electric if matches!(ability, "Lightning Rod" | "Motor Drive" | "Volt Absorb") => 0.0,
        PokemonType::Ice if ability == "Thick Fat" => 0.5,
        _ => 1.0,
    }
}

pub fn max_move_power(regular: &Move) -> u32 {
    let bp = regular.base_power;
    let steps: [u32; 7] = match regular.move_type {
        PokemonType::Fighting | PokemonType::Poison => [70, 75, 80, 85, 90, 95, 100],
        _ => [90, 100, 110, 120, 130, 140, 150],
    };
    if bp < 10 {
        0
    } else if bp <= 40 {
        steps[0]
    } else if bp <= 50 {
        steps[1]
    } else if bp <= 60 {
        steps[2]
    } else if bp <= 70 {
        steps[3]
    } else if bp <= 100 {
        steps[4]
    } else if bp <= 140 {
        steps[5]
    } else {
        steps[6]
    }
}

/// Expected damage of one move as a fraction of the defender's max HP.
pub fn expected_damage(
    attacker: Combatant<'_>,
    move_index: usize,
    defender: &Pokemon,
    multiple_targets: bool,
) -> f64 {
    let Some(used) = attacker.move_at(move_index) else {
        return 0.0;
    };
    let user = attacker.pokemon;

    let mut modifier = AVERAGE_ROLL * used.accuracy;
    if multiple_targets && used.is_spread {
        modifier *= SPREAD_PENALTY;
    }
    if user.has_type(used.move_type) {
        modifier *= if user.ability == "Adaptability" { 2.0 } else { 1.5 };
    }
    for defend in [Some(defender.types.0), defender.types.1] {
        if used.name == "Thousand Arrows" && defend == Some(PokemonType::Flying) {
            continue;
        }
        modifier *= type_effectiveness(used.move_type, defend);
    }
    if used.category == MoveCategory::Physical && user.status == Some(StatusCondition::Burn) {
        modifier *= 0.5;
    }
    modifier *= ability_modifier(user, move_index, defender);

    let (numerator, denominator) = match used.category {
        MoveCategory::Physical => {
            let atk = if used.name == "Body Press" {
                user.stats.def
            } else {
                user.stats.atk
            };
            (atk, defender.stats.def)
        }
        _ => {
            let def = if matches!(used.name.as_str(), "Psystrike" | "Psyshock") {
                defender.stats.def
            } else {
                defender.stats.spd
            };
            (user.stats.spa, def)
        }
    };
    if denominator <= 0 || defender.stats.hp <= 0 {
        return 0.0;
    }

    let level = user.level as f64;
    ((2.0 / 5.0 * level + 2.0) * used.power * numerator as f64 / denominator as f64 / 50.0 + 2.0)
        * modifier
        / defender.stats.hp as f64
}

/// Mean over every (attacker, defender) pair of the attacker's mean move damage.
/// Attackers without moves are skipped; an empty side scores 0.
pub fn average_team_damage(attackers: &[&Pokemon], defenders: &[&Pokemon], multiple_targets: bool) -> f64 {
    let mut total = 0.0;
    let mut count = 0usize;
    for attacker in attackers.iter().filter(|a| !a.moves.is_empty()) {
        let combatant = Combatant::new(attacker);
        for defender in defenders {
            let sum: f64 = (0..attacker.moves.len())
                .map(|i| expected_damage(combatant, i, defender, multiple_targets))
                .sum();
            total += sum / attacker.moves.len() as f64;
            count += 1;
        }
    }
    if count == 0 {
        0.0
    } else {
        total / count as f64
    }
}
