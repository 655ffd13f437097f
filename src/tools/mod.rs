pub mod identify;
pub mod package;

pub use identify::identify_pokemon;
pub use package::{package, parse_blocks, RawData};
