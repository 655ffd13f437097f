use crate::data::type_chart::PokemonType;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;

pub const MAX_GUARD: &str = "Max Guard";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveCategory {
    Physical,
    Special,
    Status,
}

impl MoveCategory {
    pub fn parse(text: &str) -> Option<Self> {
        match text.trim().to_ascii_lowercase().as_str() {
            "physical" => Some(MoveCategory::Physical),
            "special" => Some(MoveCategory::Special),
            "status" => Some(MoveCategory::Status),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Move {
    pub name: String,
    #[serde(rename = "type")]
    pub move_type: PokemonType,
    pub category: MoveCategory,
    pub base_power: u32,
    /// Expected power used by the damage formula: base power with the correction factor applied.
    pub power: f64,
    pub accuracy: f64,
    pub pp: u32,
    #[serde(default)]
    pub is_spread: bool,
    #[serde(default = "default_correction")]
    pub correction_factor: f64,
    #[serde(default)]
    pub effect: String,
}

fn default_correction() -> f64 {
    1.0
}

impl Move {
    pub fn new(
        name: impl Into<String>,
        move_type: PokemonType,
        category: MoveCategory,
        base_power: u32,
        accuracy: f64,
        pp: u32,
    ) -> Self {
        Self {
            name: name.into(),
            move_type,
            category,
            base_power,
            power: base_power as f64,
            accuracy,
            pp,
            is_spread: false,
            correction_factor: 1.0,
            effect: String::new(),
        }
    }

    pub fn spread(mut self, is_spread: bool) -> Self {
        self.is_spread = is_spread;
        self
    }

    pub fn with_effect(mut self, effect: impl Into<String>) -> Self {
        self.effect = effect.into();
        self
    }

    pub fn with_correction(mut self, factor: f64) -> Self {
        self.correction_factor = factor;
        self.power = self.base_power as f64 * factor;
        self
    }

    pub fn is_status(&self) -> bool {
        self.category == MoveCategory::Status
    }

    pub fn hits_multiple_times(&self) -> bool {
        self.effect.contains("Hits 2-5 times")
    }
}

/// Folds quirky move effects into a base power override and an expected-value multiplier.
pub fn effect_correction(effect: &str, accuracy: f64) -> (Option<u32>, f64) {
    let mut power_override = None;
    let mut multiplier = 1.0;
    if effect.contains("the user, the stronger") {
        // Electro Ball, Heavy Slam, Gyro Ball and friends
        power_override = Some(65);
    }
    if effect.contains("on first turn") || effect.contains("next turn") || effect.contains("second turn") {
        multiplier *= 0.5;
    }
    if effect.contains("consumed") || effect.contains("Fails") || effect.contains("Can only be") {
        multiplier = 0.0;
    }
    if effect.contains("twice in one turn") || effect.contains("twice in a row") {
        multiplier *= 2.0;
    } else if effect.contains("Hits 2-5 times") {
        multiplier *= 2.2575;
    } else if effect.contains("Attacks thrice with more power each time.") {
        if accuracy > 0.0 {
            multiplier *= 94.14 / 20.0 / accuracy;
        }
    } else if effect.contains("2 turns later") {
        multiplier *= 1.0 / 3.0;
    }
    (power_override, multiplier)
}

#[derive(Clone, Debug, Default)]
pub struct MoveDatabase {
    moves: HashMap<String, Move>,
    max_moves: BTreeMap<PokemonType, Move>,
    max_guard: Option<Move>,
}

impl MoveDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, move_data: Move) {
        self.moves.insert(move_data.name.clone(), move_data);
    }

    pub fn insert_max_move(&mut self, move_data: Move) {
        if move_data.name == MAX_GUARD {
            self.max_guard = Some(move_data);
        } else {
            self.max_moves.insert(move_data.move_type, move_data);
        }
    }

    pub fn get(&self, name: &str) -> Option<&Move> {
        self.moves.get(name)
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Builds the Dynamax variant of a regular move. Non-`damaging` moves become Max Guard.
    pub fn max_variant(&self, regular: &Move, damaging: bool) -> Result<Move> {
        let mut max_move = if damaging {
            let template = self
                .max_moves
                .get(&regular.move_type)
                .ok_or_else(|| Error::unknown("max move type", regular.move_type.name()))?;
            let mut max_move = template.clone();
            max_move.base_power = crate::ai::damage::max_move_power(regular);
            max_move.power = max_move.base_power as f64;
            max_move
        } else {
            self.max_guard
                .clone()
                .ok_or_else(|| Error::unknown("max move", MAX_GUARD))?
        };
        max_move.category = regular.category;
        max_move.pp = regular.pp;
        Ok(max_move)
    }

    /// Reads the single-column list of moves that hit every opponent.
    pub fn load_spread_list(path: &Path) -> Result<HashSet<String>> {
        let mut rdr = tab_reader(path)?;
        let mut names = HashSet::new();
        for record in rdr.records() {
            let record = record?;
            if let Some(name) = record.get(0).map(str::trim).filter(|n| !n.is_empty()) {
                names.insert(name.to_string());
            }
        }
        log::info!("Read {} spread moves from {}", names.len(), path.display());
        Ok(names)
    }

    /// Loads `Moves.csv`: name, type, category, power, accuracy, PP, TM, effect, probability.
    /// `?` marks an unknown numeric column.
    pub fn load_moves_csv(&mut self, path: &Path, spread: &HashSet<String>) -> Result<()> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(path)?;
        let file = path.display().to_string();
        let mut count = 0;
        for record in rdr.records() {
            let record = record?;
            if record.len() < 8 {
                continue;
            }
            let name = record.get(0).unwrap_or("").trim().to_string();
            if name.is_empty() {
                continue;
            }
            let move_type: PokemonType = record
                .get(1)
                .unwrap_or("")
                .parse()
                .map_err(|e: String| Error::source(&file, format!("{}: {}", name, e)))?;
            let category = MoveCategory::parse(record.get(2).unwrap_or(""))
                .ok_or_else(|| Error::source(&file, format!("{}: bad category", name)))?;
            let mut base_power = parse_or(record.get(3), 0u32, &file)?;
            let accuracy = parse_or(record.get(4), 100.0f64, &file)? / 100.0;
            let pp = parse_or(record.get(5), 0u32, &file)?;
            let effect = record.get(7).unwrap_or("").to_string();

            let (power_override, multiplier) = effect_correction(&effect, accuracy);
            if let Some(power) = power_override {
                base_power = power;
            }
            let move_data = Move::new(name.clone(), move_type, category, base_power, accuracy, pp)
                .with_effect(effect)
                .with_correction(multiplier)
                .spread(spread.contains(&name));
            self.insert(move_data);
            count += 1;
        }
        log::info!("Read {} moves from {}", count, file);
        Ok(())
    }

    /// Loads `Max_moves.txt`: name, type, effect (tab separated).
    pub fn load_max_moves(&mut self, path: &Path) -> Result<()> {
        let mut rdr = tab_reader(path)?;
        let file = path.display().to_string();
        for record in rdr.records() {
            let record = record?;
            let name = record.get(0).unwrap_or("").trim();
            if name.is_empty() {
                continue;
            }
            let move_type: PokemonType = record
                .get(1)
                .unwrap_or("")
                .parse()
                .map_err(|e: String| Error::source(&file, format!("{}: {}", name, e)))?;
            let category = if name == MAX_GUARD {
                MoveCategory::Status
            } else {
                MoveCategory::Physical
            };
            let effect = record.get(2).unwrap_or("");
            self.insert_max_move(Move::new(name, move_type, category, 0, 1.0, 0).with_effect(effect));
        }
        log::info!("Read {} max moves from {}", self.max_moves.len(), file);
        Ok(())
    }
}

fn tab_reader(path: &Path) -> Result<csv::Reader<std::fs::File>> {
    Ok(csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(b'\t')
        .from_path(path)?)
}

fn parse_or<T: std::str::FromStr>(field: Option<&str>, unknown: T, file: &str) -> Result<T> {
    let text = field.unwrap_or("?").trim();
    if text == "?" || text.is_empty() {
        return Ok(unknown);
    }
    text.parse()
        .map_err(|_| Error::source(file, format!("not a number: '{}'", text)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn correction_for_multi_hit_and_charge_moves() {
        assert_eq!(effect_correction("Hits 2-5 times in one turn.", 1.0), (None, 2.2575));
        assert_eq!(effect_correction("Hits twice in one turn.", 1.0), (None, 2.0));
        assert_eq!(effect_correction("Charges on first turn, attacks on second.", 1.0).1, 0.5);
        assert_eq!(effect_correction("User faints. Item is consumed.", 1.0).1, 0.0);
        assert_eq!(
            effect_correction("The heavier the user, the stronger the attack.", 1.0),
            (Some(65), 1.0)
        );
    }

    #[test]
    fn correction_scales_effective_power() {
        let m = Move::new("Double Hit", PokemonType::Normal, MoveCategory::Physical, 35, 0.9, 10)
            .with_correction(2.0);
        assert_eq!(m.base_power, 35);
        assert!((m.power - 70.0).abs() < 1e-9);
    }
}
