pub mod moves;
pub mod species;
pub mod tables;
pub mod type_chart;

pub use moves::{Move, MoveCategory, MoveDatabase};
pub use species::{BaseStats, Pokemon, Roster, SpeciesDatabase, StatusCondition};
pub use tables::{GameData, MatchupTables};
pub use type_chart::PokemonType;
