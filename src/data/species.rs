use crate::data::moves::Move;
use crate::data::type_chart::PokemonType;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::Path;

/// Catalog of creatures keyed by name.
pub type Roster = BTreeMap<String, Pokemon>;

pub const DEFAULT_IV: i32 = 15;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseStats {
    pub hp: i32,
    pub atk: i32,
    pub def: i32,
    pub spa: i32,
    pub spd: i32,
    pub spe: i32,
}

impl BaseStats {
    pub fn at_level(&self, level: u32) -> BaseStats {
        let level = level as i32;
        BaseStats {
            hp: calc_stat(self.hp, true, level, DEFAULT_IV, 0),
            atk: calc_stat(self.atk, false, level, DEFAULT_IV, 0),
            def: calc_stat(self.def, false, level, DEFAULT_IV, 0),
            spa: calc_stat(self.spa, false, level, DEFAULT_IV, 0),
            spd: calc_stat(self.spd, false, level, DEFAULT_IV, 0),
            spe: calc_stat(self.spe, false, level, DEFAULT_IV, 0),
        }
    }
}

pub fn calc_stat(base: i32, is_hp: bool, level: i32, iv: i32, ev: i32) -> i32 {
    if is_hp {
        ((base * 2 + iv + (ev / 4)) * level) / 100 + level + 10
    } else {
        ((base * 2 + iv + (ev / 4)) * level) / 100 + 5
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusCondition {
    Burn,
    Freeze,
    Paralysis,
    Poison,
    Sleep,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pokemon {
    pub name: String,
    pub ability: String,
    pub types: (PokemonType, Option<PokemonType>),
    pub base_stats: BaseStats,
    /// Battle stats derived from the base stats at `level`.
    pub stats: BaseStats,
    pub level: u32,
    pub moves: Vec<Move>,
    pub max_moves: Vec<Move>,
    #[serde(rename = "PP")]
    pub pp: Vec<u32>,
    #[serde(default)]
    pub status: Option<StatusCondition>,
}

impl Pokemon {
    pub fn new(
        name: impl Into<String>,
        ability: impl Into<String>,
        types: (PokemonType, Option<PokemonType>),
        base_stats: BaseStats,
        moves: Vec<Move>,
        max_moves: Vec<Move>,
        level: u32,
    ) -> Self {
        let pp = moves.iter().map(|m| m.pp).collect();
        Self {
            name: name.into(),
            ability: ability.into(),
            types,
            base_stats,
            stats: base_stats.at_level(level),
            level,
            moves,
            max_moves,
            pp,
            status: None,
        }
    }

    pub fn has_type(&self, t: PokemonType) -> bool {
        self.types.0 == t || self.types.1 == Some(t)
    }

    /// Name without the form suffix, e.g. "Lycanroc" for "Lycanroc (Midnight)".
    pub fn species_name(&self) -> &str {
        self.name.split(" (").next().unwrap_or(&self.name)
    }

    pub fn remaining_pp(&self, move_index: usize) -> u32 {
        self.pp.get(move_index).copied().unwrap_or(0)
    }

    /// Spends PP for one use of a move. Never goes below zero.
    pub fn spend_pp(&mut self, move_index: usize, cost: u32) {
        if let Some(pp) = self.pp.get_mut(move_index) {
            *pp = pp.saturating_sub(cost);
        }
    }

    pub fn restore_pp(&mut self) {
        self.pp = self.moves.iter().map(|m| m.pp).collect();
    }
}

impl fmt::Display for Pokemon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[derive(Clone, Debug, Default)]
pub struct SpeciesDatabase {
    base_stats: HashMap<String, BaseStats>,
    types: HashMap<String, (PokemonType, Option<PokemonType>)>,
}

impl SpeciesDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: &str, stats: BaseStats, types: (PokemonType, Option<PokemonType>)) {
        self.base_stats.insert(name.to_string(), stats);
        self.types.insert(name.to_string(), types);
    }

    pub fn base_stats(&self, name: &str) -> Result<BaseStats> {
        self.base_stats
            .get(name)
            .copied()
            .ok_or_else(|| Error::unknown("base stats for", name))
    }

    pub fn types(&self, name: &str) -> Result<(PokemonType, Option<PokemonType>)> {
        self.types
            .get(name)
            .copied()
            .ok_or_else(|| Error::unknown("types for", name))
    }

    /// Loads `All_Pokemon_stats.txt`: tab separated, name in column 2, stats in columns 3 to 8.
    pub fn load_stats(&mut self, path: &Path) -> Result<()> {
        let file = path.display().to_string();
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(b'\t')
            .from_path(path)?;
        for record in rdr.records() {
            let record = record?;
            if record.len() < 9 {
                continue;
            }
            let stat = |i: usize| -> Result<i32> {
                record
                    .get(i)
                    .unwrap_or("")
                    .trim()
                    .parse()
                    .map_err(|_| Error::source(&file, format!("bad stat in column {}", i)))
            };
            let stats = BaseStats {
                hp: stat(3)?,
                atk: stat(4)?,
                def: stat(5)?,
                spa: stat(6)?,
                spd: stat(7)?,
                spe: stat(8)?,
            };
            self.base_stats.insert(record.get(2).unwrap_or("").to_string(), stats);
        }
        log::info!("Read base stats for {} Pokemon", self.base_stats.len());
        Ok(())
    }

    /// Loads `Pokemon_types.csv`: name, first type, second type (may be empty).
    pub fn load_types(&mut self, path: &Path) -> Result<()> {
        let file = path.display().to_string();
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(path)?;
        for record in rdr.records() {
            let record = record?;
            let name = record.get(0).unwrap_or("").to_string();
            let first = PokemonType::parse(record.get(1).unwrap_or(""))
                .ok_or_else(|| Error::source(&file, format!("{} has no primary type", name)))?;
            let second = PokemonType::parse(record.get(2).unwrap_or(""));
            self.types.insert(name, (first, second));
        }
        log::info!("Read types for {} Pokemon", self.types.len());
        Ok(())
    }
}
