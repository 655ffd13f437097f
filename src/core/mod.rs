pub mod controller;
pub mod stages;
pub mod state;

pub use controller::{Controller, Stage, StageContext, Step, Transition};
pub use state::{BallInventory, Encounter, Mode, RunState, SessionState};
