pub mod damage;
pub mod eval;
pub mod lut;

pub use damage::{average_team_damage, expected_damage, max_move_power, type_effectiveness, Combatant};
pub use eval::{combine_matchup_scores, evaluate_matchup, matchup_summary, move_score, select_best_move};
pub use lut::build_tables;
