use crate::data::species::{Pokemon, Roster};
use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

pub const RENTAL_POKEMON_FILE: &str = "rental_pokemon.json";
pub const BOSS_POKEMON_FILE: &str = "boss_pokemon.json";
pub const BOSS_MATCHUP_FILE: &str = "boss_matchup_lut.json";
pub const RENTAL_MATCHUP_FILE: &str = "rental_matchup_lut.json";
pub const RENTAL_SCORES_FILE: &str = "rental_pokemon_scores.json";

pub type ScoreTable = BTreeMap<String, BTreeMap<String, f64>>;

/// Precomputed matchup scores. Read-only during a run.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MatchupTables {
    /// rental -> boss -> score
    pub boss_matchups: ScoreTable,
    /// rental -> rental -> score
    pub rental_matchups: ScoreTable,
    /// rental -> aggregate score, mean 1.0
    pub rental_scores: BTreeMap<String, f64>,
}

impl MatchupTables {
    pub fn rental_score(&self, name: &str) -> f64 {
        match self.rental_scores.get(name) {
            Some(score) => *score,
            None => {
                log::warn!("No rental score for {}", name);
                0.0
            }
        }
    }

    pub fn boss_matchup(&self, name: &str, boss: &str) -> f64 {
        match self.boss_matchups.get(name).and_then(|row| row.get(boss)) {
            Some(score) => *score,
            None => {
                log::warn!("No boss matchup for {} against {}", name, boss);
                0.0
            }
        }
    }
}

/// Everything a session needs from the data directory.
#[derive(Clone, Debug, Default)]
pub struct GameData {
    pub rentals: Roster,
    pub bosses: Roster,
    pub tables: MatchupTables,
}

impl GameData {
    pub fn load(dir: &Path) -> Result<Self> {
        let data = Self {
            rentals: read_json(&dir.join(RENTAL_POKEMON_FILE))?,
            bosses: read_json(&dir.join(BOSS_POKEMON_FILE))?,
            tables: MatchupTables {
                boss_matchups: read_json(&dir.join(BOSS_MATCHUP_FILE))?,
                rental_matchups: read_json(&dir.join(RENTAL_MATCHUP_FILE))?,
                rental_scores: read_json(&dir.join(RENTAL_SCORES_FILE))?,
            },
        };
        log::info!(
            "Loaded {} rental and {} boss Pokemon from {}",
            data.rentals.len(),
            data.bosses.len(),
            dir.display()
        );
        Ok(data)
    }

    pub fn save(&self, dir: &Path) -> Result<()> {
        fs::create_dir_all(dir)?;
        write_json(&dir.join(RENTAL_POKEMON_FILE), &self.rentals)?;
        write_json(&dir.join(BOSS_POKEMON_FILE), &self.bosses)?;
        write_json(&dir.join(BOSS_MATCHUP_FILE), &self.tables.boss_matchups)?;
        write_json(&dir.join(RENTAL_MATCHUP_FILE), &self.tables.rental_matchups)?;
        write_json(&dir.join(RENTAL_SCORES_FILE), &self.tables.rental_scores)?;
        Ok(())
    }

    pub fn boss(&self, name: &str) -> Result<&Pokemon> {
        self.bosses.get(name).ok_or_else(|| Error::unknown("boss", name))
    }

    pub fn rental(&self, name: &str) -> Result<&Pokemon> {
        self.rentals.get(name).ok_or_else(|| Error::unknown("rental Pokemon", name))
    }

    pub fn rental_team(&self) -> Vec<&Pokemon> {
        self.rentals.values().collect()
    }
}

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let data = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}

pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let data = serde_json::to_string_pretty(value)?;
    fs::write(path, data)?;
    log::info!("Wrote {}", path.display());
    Ok(())
}
