pub mod ai;
pub mod config;
pub mod core;
pub mod data;
pub mod error;
pub mod io;
pub mod logger;
pub mod tools;

pub use ai::{evaluate_matchup, select_best_move, Combatant};
pub use config::SessionConfig;
pub use self::core::{
    controller::{Controller, Stage, Transition},
    state::{BallInventory, Mode, SessionState},
};
pub use data::{
    moves::{Move, MoveCategory, MoveDatabase},
    species::{BaseStats, Pokemon, Roster, SpeciesDatabase},
    tables::{GameData, MatchupTables},
    type_chart::PokemonType,
};
pub use error::{Error, Result};
