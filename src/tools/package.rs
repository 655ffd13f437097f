use crate::ai::lut::build_tables;
use crate::data::moves::MoveDatabase;
use crate::data::species::{Pokemon, Roster, SpeciesDatabase};
use crate::data::tables::GameData;
use crate::error::{Error, Result};
use std::fs;
use std::path::Path;

pub const MOVES_FILE: &str = "Moves.csv";
pub const SPREAD_MOVES_FILE: &str = "Spread_moves.txt";
pub const MAX_MOVES_FILE: &str = "Max_moves.txt";
pub const STATS_FILE: &str = "All_Pokemon_stats.txt";
pub const TYPES_FILE: &str = "Pokemon_types.csv";
pub const RENTALS_FILE: &str = "Rental_Pokemon.txt";
pub const BOSSES_FILE: &str = "Boss_Pokemon.txt";

const SKILL_LINK_BOOST: f64 = 5.0 / 2.1575;

/// Which listing a block came from. The two are packaged slightly differently.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Listing {
    /// Skill Link multi-hit moves are boosted; Max Guard only for zero base power.
    Rentals,
    /// Any move whose corrected power is zero becomes Max Guard.
    Bosses,
}

/// One creature entry from the rental or boss listing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PokemonBlock {
    pub name: String,
    pub ability: String,
    pub level: u32,
    pub moves: Vec<String>,
}

/// First comma-separated field of a listing line. Quoted names keep their commas.
fn first_field(line: &str) -> Result<String> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(line.as_bytes());
    let record = rdr.records().next().transpose()?;
    Ok(record
        .as_ref()
        .and_then(|r| r.get(0))
        .unwrap_or("")
        .trim()
        .to_string())
}

/// Parses the listing format:
///
/// ```text
/// Name
/// <any non-empty lines>
///
/// Ability
/// Level 65
/// <one skipped line>
/// Move 1
/// ...
/// ```
///
/// Blocks are separated by blank lines.
pub fn parse_blocks(text: &str, file: &str) -> Result<Vec<PokemonBlock>> {
    let lines: Vec<&str> = text.lines().collect();
    let blank = |i: usize| lines[i].trim().is_empty();
    let truncated = |name: &str| Error::source(file, format!("entry for {} is truncated", name));

    let mut blocks = Vec::new();
    let mut i = 0;
    loop {
        while i < lines.len() && blank(i) {
            i += 1;
        }
        if i >= lines.len() {
            break;
        }
        let name = first_field(lines[i])?;
        i += 1;
        while i < lines.len() && !blank(i) {
            i += 1;
        }
        while i < lines.len() && blank(i) {
            i += 1;
        }
        if i + 1 >= lines.len() {
            return Err(truncated(&name));
        }
        let ability = first_field(lines[i])?;
        i += 1;
        let level = lines[i]
            .split_whitespace()
            .nth(1)
            .and_then(|l| l.parse().ok())
            .ok_or_else(|| Error::source(file, format!("bad level line for {}: '{}'", name, lines[i])))?;
        i += 2;
        let mut moves = Vec::new();
        while i < lines.len() && !blank(i) {
            moves.push(first_field(lines[i])?);
            i += 1;
        }
        blocks.push(PokemonBlock {
            name,
            ability,
            level,
            moves,
        });
    }
    Ok(blocks)
}

pub fn build_pokemon(
    block: &PokemonBlock,
    moves: &MoveDatabase,
    species: &SpeciesDatabase,
    listing: Listing,
) -> Result<Pokemon> {
    let mut regular = Vec::with_capacity(block.moves.len());
    let mut max_moves = Vec::with_capacity(block.moves.len());
    for name in &block.moves {
        let mut m = moves.get(name).cloned().ok_or_else(|| Error::unknown("move", name))?;
        let max_move = match listing {
            Listing::Rentals => {
                if block.ability == "Skill Link" && m.hits_multiple_times() {
                    let factor = m.correction_factor * SKILL_LINK_BOOST;
                    m = m.with_correction(factor);
                }
                moves.max_variant(&m, m.base_power > 0)?
            }
            Listing::Bosses => moves.max_variant(&m, m.power > 0.0)?,
        };
        max_moves.push(max_move);
        regular.push(m);
    }
    Ok(Pokemon::new(
        block.name.clone(),
        block.ability.clone(),
        species.types(&block.name)?,
        species.base_stats(&block.name)?,
        regular,
        max_moves,
        block.level,
    ))
}

pub fn build_roster(
    blocks: &[PokemonBlock],
    moves: &MoveDatabase,
    species: &SpeciesDatabase,
    listing: Listing,
) -> Result<Roster> {
    let mut roster = Roster::new();
    for block in blocks {
        let pokemon = build_pokemon(block, moves, species, listing)?;
        if roster.insert(pokemon.name.clone(), pokemon).is_some() {
            log::warn!("Duplicate entry found! - {}", block.name);
        }
    }
    Ok(roster)
}

/// Source tables shared by the rental and boss listings.
pub struct RawData {
    pub moves: MoveDatabase,
    pub species: SpeciesDatabase,
}

impl RawData {
    pub fn load(dir: &Path) -> Result<Self> {
        let spread = MoveDatabase::load_spread_list(&dir.join(SPREAD_MOVES_FILE))?;
        let mut moves = MoveDatabase::new();
        moves.load_moves_csv(&dir.join(MOVES_FILE), &spread)?;
        moves.load_max_moves(&dir.join(MAX_MOVES_FILE))?;
        let mut species = SpeciesDatabase::new();
        species.load_stats(&dir.join(STATS_FILE))?;
        species.load_types(&dir.join(TYPES_FILE))?;
        Ok(Self { moves, species })
    }

    pub fn load_roster(&self, path: &Path, listing: Listing) -> Result<Roster> {
        let file = path.display().to_string();
        let text = fs::read_to_string(path)?;
        let blocks = parse_blocks(&text, &file)?;
        let roster = build_roster(&blocks, &self.moves, &self.species, listing)?;
        log::info!("Read {} Pokemon from {}", roster.len(), file);
        Ok(roster)
    }
}

/// Builds both catalogs and all matchup tables from the raw data folder.
pub fn package(raw_dir: &Path) -> Result<GameData> {
    let raw = RawData::load(raw_dir)?;
    let rentals = raw.load_roster(&raw_dir.join(RENTALS_FILE), Listing::Rentals)?;
    let bosses = raw.load_roster(&raw_dir.join(BOSSES_FILE), Listing::Bosses)?;
    let tables = build_tables(&rentals, &bosses);
    Ok(GameData {
        rentals,
        bosses,
        tables,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncated_block_is_an_error() {
        let err = parse_blocks("Swampert\nsome notes\n\nTorrent\n", "rentals").expect_err("truncated");
        assert!(err.to_string().contains("Swampert"));
    }

    #[test]
    fn quoted_names_keep_their_commas() {
        let text = "\"Farfetch'd, Galarian\",notes\n\nSteadfast\nLevel 65\nMoves:\n\"Brick Break\",x\nLeaf Blade\n";
        let blocks = parse_blocks(text, "rentals").expect("parse");
        assert_eq!(blocks[0].name, "Farfetch'd, Galarian");
        assert_eq!(blocks[0].ability, "Steadfast");
        assert_eq!(blocks[0].moves, vec!["Brick Break", "Leaf Blade"]);
    }
}
