use crate::data::species::Pokemon;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Ball name that means "whatever the game selects first".
pub const DEFAULT_BALL: &str = "DEFAULT";
pub const MAX_CATCHES: u32 = 4;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    #[default]
    Default,
    /// Reset after a full clear to keep a seed with a strong boss.
    StrongBoss,
    /// Reset instead of spending a legendary ball on a non-shiny legendary.
    BallSaver,
}

impl Mode {
    pub fn parse(text: &str) -> Option<Self> {
        match text.trim().to_ascii_lowercase().replace(['_', ' '], "-").as_str() {
            "default" => Some(Mode::Default),
            "strong-boss" => Some(Mode::StrongBoss),
            "ball-saver" => Some(Mode::BallSaver),
            _ => None,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Mode::Default => "default",
            Mode::StrongBoss => "strong boss",
            Mode::BallSaver => "ball saver",
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BallInventory {
    pub base_ball: String,
    pub base_balls: u32,
    pub legendary_ball: String,
    pub legendary_balls: u32,
}

impl BallInventory {
    pub fn same_kind(&self) -> bool {
        self.base_ball == self.legendary_ball
    }

    /// Ball to throw at the boss of catch number `num_caught` (0-based).
    pub fn target_ball(&self, num_caught: u32) -> &str {
        if num_caught < 3 {
            &self.base_ball
        } else {
            &self.legendary_ball
        }
    }

    pub fn check_sufficient_balls(&self) -> bool {
        if self.same_kind() && self.base_balls < 4 {
            return false;
        }
        self.base_balls >= 3 && self.legendary_balls >= 1
    }
}

/// Battle-scoped state, cleared whenever a stage is entered.
#[derive(Clone, Debug, Default)]
pub struct Encounter {
    /// Cursor position on the move list; may run past 3 before wrapping.
    pub move_index: usize,
    /// Turns of dynamax left after the current one. `None` when not dynamaxed.
    pub dmax_timer: Option<u32>,
    pub opponent: Option<Pokemon>,
    pub dynamax_available: bool,
    pub dynamaxed: bool,
}

#[derive(Clone, Debug)]
pub struct RunState {
    pub pokemon: Option<Pokemon>,
    pub hp_fraction: f64,
    pub num_caught: u32,
    pub encounter: Encounter,
    base_used: u32,
    legendary_used: u32,
}

impl Default for RunState {
    fn default() -> Self {
        Self {
            pokemon: None,
            hp_fraction: 1.0,
            num_caught: 0,
            encounter: Encounter::default(),
            base_used: 0,
            legendary_used: 0,
        }
    }
}

impl RunState {
    pub fn balls_used(&self) -> (u32, u32) {
        (self.base_used, self.legendary_used)
    }
}

#[derive(Clone, Debug)]
pub struct SessionState {
    pub boss: String,
    pub balls: BallInventory,
    pub mode: Mode,
    pub runs: u32,
    pub wins: u32,
    pub shinies_found: u32,
    pub consecutive_resets: u32,
    pub dynite_ore: u32,
    pub started: DateTime<Local>,
    pub run: RunState,
}

impl SessionState {
    pub fn new(boss: impl Into<String>, balls: BallInventory, mode: Mode, dynite_ore: u32) -> Self {
        Self {
            boss: boss.into(),
            balls,
            mode,
            runs: 0,
            wins: 0,
            shinies_found: 0,
            consecutive_resets: 0,
            dynite_ore,
            started: Local::now(),
            run: RunState::default(),
        }
    }

    pub fn reset_run(&mut self) {
        self.run = RunState::default();
    }

    pub fn target_ball(&self) -> &str {
        self.balls.target_ball(self.run.num_caught)
    }

    /// Takes one ball out of the inventory and counts the catch.
    ///
    /// Each call adds exactly one catch. The cap at `MAX_CATCHES` is never hit
    /// in a run because the fourth catch ends it.
    pub fn record_ball_use(&mut self) {
        let balls = &mut self.balls;
        if balls.same_kind() {
            balls.base_balls = balls.base_balls.saturating_sub(1);
            balls.legendary_balls = balls.legendary_balls.saturating_sub(1);
            self.run.base_used += 1;
            self.run.legendary_used += 1;
        } else if self.run.num_caught < 3 {
            balls.base_balls = balls.base_balls.saturating_sub(1);
            self.run.base_used += 1;
        } else {
            balls.legendary_balls = balls.legendary_balls.saturating_sub(1);
            self.run.legendary_used += 1;
        }
        self.run.num_caught = (self.run.num_caught + 1).min(MAX_CATCHES);
    }

    pub fn check_sufficient_balls(&self) -> bool {
        self.balls.check_sufficient_balls()
    }

    /// Puts back the balls thrown this run. Resetting the game undoes them.
    pub fn refund_run_balls(&mut self) {
        let (base, legendary) = self.run.balls_used();
        self.balls.base_balls += base;
        self.balls.legendary_balls += legendary;
        self.run.base_used = 0;
        self.run.legendary_used = 0;
    }

    pub fn ore_cost(resets: u32) -> u32 {
        if resets < 3 {
            0
        } else {
            resets.min(10)
        }
    }

    pub fn check_sufficient_ore(&self, resets: u32) -> bool {
        self.dynite_ore >= Self::ore_cost(resets)
    }

    pub fn pay_for_reset(&mut self) {
        self.consecutive_resets += 1;
        let cost = Self::ore_cost(self.consecutive_resets);
        self.dynite_ore = self.dynite_ore.saturating_sub(cost);
        log::info!(
            "Reset #{} costs {} Dynite Ore ({} left)",
            self.consecutive_resets,
            cost,
            self.dynite_ore
        );
    }

    pub fn win_percent(&self) -> Option<u32> {
        if self.runs == 0 {
            None
        } else {
            Some((100.0 * self.wins as f64 / self.runs as f64).round() as u32)
        }
    }

    pub fn time_per_run(&self) -> Option<chrono::Duration> {
        if self.runs == 0 {
            None
        } else {
            Some((Local::now() - self.started) / self.runs as i32)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_accepts_several_spellings() {
        assert_eq!(Mode::parse("Strong Boss"), Some(Mode::StrongBoss));
        assert_eq!(Mode::parse("ball_saver"), Some(Mode::BallSaver));
        assert_eq!(Mode::parse("default"), Some(Mode::Default));
        assert_eq!(Mode::parse("turbo"), None);
    }

    #[test]
    fn ore_cost_steps() {
        assert_eq!(SessionState::ore_cost(0), 0);
        assert_eq!(SessionState::ore_cost(2), 0);
        assert_eq!(SessionState::ore_cost(3), 3);
        assert_eq!(SessionState::ore_cost(12), 10);
    }
}
