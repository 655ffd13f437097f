use crate::core::stages;
use crate::core::state::{Encounter, SessionState};
use crate::data::species::Pokemon;
use crate::data::tables::GameData;
use crate::error::Result;
use crate::io::device::{Button, CommandSink};
use crate::io::vision::{Overlay, Screen, TextRequest};
use std::fmt;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Stage {
    Initialize,
    Join,
    Path,
    Detect,
    Battle,
    Catch,
    Backpacker,
    Scientist,
    SelectPokemon,
    Done,
}

impl Stage {
    pub fn name(self) -> &'static str {
        match self {
            Stage::Initialize => "initialize",
            Stage::Join => "join",
            Stage::Path => "path",
            Stage::Detect => "detect",
            Stage::Battle => "battle",
            Stage::Catch => "catch",
            Stage::Backpacker => "backpacker",
            Stage::Scientist => "scientist",
            Stage::SelectPokemon => "select_pokemon",
            Stage::Done => "done",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What a step handler wants the controller to do next.
#[derive(Clone, Debug, PartialEq)]
pub enum Transition {
    /// Poll the same substage again.
    Stay,
    Advance,
    Goto(u16),
    /// Start another stage at substage 0 with a fresh clock and encounter.
    Enter(Stage),
    /// End the session.
    Finish(String),
}

pub type Handler = fn(&mut StageContext<'_>) -> Transition;

/// One substage: the handler runs once `wait` has passed on the stage clock.
#[derive(Clone, Copy)]
pub struct Step {
    pub wait: Duration,
    pub run: Handler,
}

impl Step {
    pub fn now(run: Handler) -> Self {
        Self {
            wait: Duration::ZERO,
            run,
        }
    }

    pub fn after(seconds: f64, run: Handler) -> Self {
        Self {
            wait: Duration::from_secs_f64(seconds),
            run,
        }
    }

    pub fn ready(&self, elapsed: Duration) -> bool {
        self.wait.is_zero() || elapsed > self.wait
    }
}

/// Everything a step handler may touch during one poll.
pub struct StageContext<'a> {
    pub session: &'a mut SessionState,
    pub data: &'a GameData,
    pub screen: &'a mut dyn Screen,
    pub device: &'a mut dyn CommandSink,
    stage: Stage,
    substage: u16,
    now: Duration,
    clock: &'a mut Duration,
}

impl<'a> StageContext<'a> {
    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn substage(&self) -> u16 {
        self.substage
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn elapsed(&self) -> Duration {
        self.now.saturating_sub(*self.clock)
    }

    pub fn restart_clock(&mut self) {
        *self.clock = self.now;
    }

    /// Restarts the clock `seconds` in the future, adding that much to the next wait.
    pub fn restart_clock_with_delay(&mut self, seconds: f64) {
        *self.clock = self.now + Duration::from_secs_f64(seconds);
    }

    /// Sends a button press. Write failures are logged and otherwise ignored.
    pub fn press(&mut self, button: Button) {
        if let Err(e) = self.device.press(button) {
            log::warn!("Failed to send '{}' to the device: {}", button, e);
        }
    }

    pub fn read_text(&mut self, request: &TextRequest) -> String {
        self.screen.read_text(request)
    }

    /// The whole rental roster, used as teammates when scoring.
    pub fn team(&self) -> Vec<&'a Pokemon> {
        self.data.rental_team()
    }

    pub fn overlay(&self) -> Overlay {
        Overlay::from_session(&*self.session, self.stage.name(), self.substage, None)
    }
}

/// Timer-gated stage machine driving a session of runs.
#[derive(Debug)]
pub struct Controller {
    stage: Stage,
    substage: u16,
    clock: Duration,
    finish_reason: Option<String>,
}

impl Default for Controller {
    fn default() -> Self {
        Self::new()
    }
}

impl Controller {
    pub fn new() -> Self {
        Self {
            stage: Stage::Initialize,
            substage: 0,
            clock: Duration::ZERO,
            finish_reason: None,
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn substage(&self) -> u16 {
        self.substage
    }

    pub fn clock(&self) -> Duration {
        self.clock
    }

    pub fn is_done(&self) -> bool {
        self.stage == Stage::Done
    }

    pub fn finish_reason(&self) -> Option<&str> {
        self.finish_reason.as_deref()
    }

    /// Places the controller mid-run, e.g. to resume after a crash.
    pub fn resume_at(&mut self, stage: Stage, substage: u16, clock: Duration) {
        self.stage = stage;
        self.substage = substage;
        self.clock = clock;
    }

    fn enter(&mut self, stage: Stage, now: Duration, session: &mut SessionState) {
        log::debug!("{} -> {}", self.stage, stage);
        self.stage = stage;
        self.substage = 0;
        self.clock = now;
        session.run.encounter = Encounter::default();
    }

    /// Runs at most one step of the current stage.
    pub fn poll(
        &mut self,
        now: Duration,
        session: &mut SessionState,
        data: &GameData,
        screen: &mut dyn Screen,
        device: &mut dyn CommandSink,
    ) -> Stage {
        if self.is_done() {
            return self.stage;
        }
        let Some(step) = stages::step(self.stage, self.substage) else {
            log::error!("No step for {} substage {}", self.stage, self.substage);
            return self.stage;
        };
        if !step.ready(now.saturating_sub(self.clock)) {
            return self.stage;
        }

        let stage = self.stage;
        let substage = self.substage;
        let transition = {
            let mut ctx = StageContext {
                session: &mut *session,
                data,
                screen,
                device,
                stage,
                substage,
                now,
                clock: &mut self.clock,
            };
            (step.run)(&mut ctx)
        };

        match transition {
            Transition::Stay => {}
            Transition::Advance => self.substage += 1,
            Transition::Goto(next) => self.substage = next,
            Transition::Enter(next) => self.enter(next, now, session),
            Transition::Finish(reason) => {
                log::info!("{}", reason);
                self.stage = Stage::Done;
                self.finish_reason = Some(reason);
            }
        }
        self.stage
    }

    /// The outer loop: one frame, one step, one overlay and one drain per
    /// iteration until the session is done or a quit is requested.
    pub fn run(
        &mut self,
        session: &mut SessionState,
        data: &GameData,
        screen: &mut dyn Screen,
        device: &mut dyn CommandSink,
    ) -> Result<Stage> {
        let mut last_frame: Option<Duration> = None;
        while !self.is_done() {
            let now = screen.capture()?;
            self.poll(now, session, data, screen, device);

            let fps = last_frame
                .map(|prev| now.saturating_sub(prev).as_secs_f64())
                .filter(|dt| *dt > 0.0)
                .map(|dt| 1.0 / dt);
            last_frame = Some(now);
            screen.show(&Overlay::from_session(session, self.stage.name(), self.substage, fps));

            if let Err(e) = device.drain() {
                log::warn!("Failed to read from the device: {}", e);
            }
            if screen.quit_requested() {
                log::info!("Quit requested");
                break;
            }
        }
        Overlay::from_session(session, self.stage.name(), self.substage, None).log();
        Ok(self.stage)
    }
}
