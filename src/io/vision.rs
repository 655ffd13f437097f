use crate::core::state::SessionState;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::time::Duration;

/// Rectangle in normalized screen coordinates, all values in [0, 1].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Region {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Region {
    pub const fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }
}

/// Where and how to extract text from a frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextRequest {
    /// Stable key for the region, used by recorded sessions.
    pub name: &'static str,
    pub region: Region,
    pub threshold: bool,
    pub invert: bool,
    pub language: Option<&'static str>,
    pub segmentation: &'static str,
}

const fn request(
    name: &'static str,
    region: Region,
    threshold: bool,
    invert: bool,
    language: Option<&'static str>,
    segmentation: &'static str,
) -> TextRequest {
    TextRequest {
        name,
        region,
        threshold,
        invert,
        language,
        segmentation,
    }
}

pub const BOTTOM_TEXT: TextRequest = request(
    "bottom",
    Region::new(0.0, 0.6, 1.0, 1.0),
    true,
    true,
    Some("eng"),
    "--psm 11",
);

pub const JOIN_NAMES: [TextRequest; 3] = [
    request("join_name_1", Region::new(0.485, 0.28, 0.60, 0.33), false, true, None, "--psm 8"),
    request("join_name_2", Region::new(0.485, 0.54, 0.60, 0.59), false, false, None, "--psm 8"),
    // The third name moves around between runs.
    request("join_name_3", Region::new(0.485, 0.80, 0.60, 0.855), false, false, None, "--psm 3"),
];

pub const JOIN_ABILITIES: [TextRequest; 3] = [
    request("join_ability_1", Region::new(0.485, 0.33, 0.60, 0.39), false, true, None, "--psm 8"),
    request("join_ability_2", Region::new(0.485, 0.59, 0.60, 0.65), false, false, None, "--psm 8"),
    request("join_ability_3", Region::new(0.485, 0.85, 0.60, 0.91), false, false, None, "--psm 3"),
];

pub const CATCH_NAME: TextRequest = request(
    "catch_name",
    Region::new(0.485, 0.59, 0.60, 0.645),
    false,
    false,
    None,
    "--psm 3",
);

pub const CATCH_ABILITY: TextRequest = request(
    "catch_ability",
    Region::new(0.485, 0.645, 0.60, 0.69),
    false,
    false,
    None,
    "--psm 3",
);

pub const BATTLE_NAME: TextRequest = request(
    "battle_name",
    Region::new(0.195, 0.11, 0.39, 0.16),
    false,
    false,
    Some("eng"),
    "--psm 8",
);

pub const BATTLE_TYPES: [TextRequest; 2] = [
    request("battle_type_1", Region::new(0.24, 0.17, 0.31, 0.215), false, true, Some("eng"), "--psm 8"),
    request("battle_type_2", Region::new(0.35, 0.17, 0.425, 0.214), false, true, Some("eng"), "--psm 8"),
];

pub const BALL_TEXT: TextRequest = request(
    "ball",
    Region::new(0.69, 0.63, 0.88, 0.68),
    false,
    true,
    Some("eng"),
    "--psm 8",
);

pub const SHINY_STAR: Region = Region::new(0.075, 0.53, 0.105, 0.58);

/// Video source plus the perception services the controller relies on.
pub trait Screen {
    /// Grabs the next frame and returns its timestamp relative to session start.
    fn capture(&mut self) -> Result<Duration>;

    /// Raw text in a region of the last captured frame. Empty when nothing was read.
    fn read_text(&mut self, request: &TextRequest) -> String;

    /// Whether the shiny star is lit in the summary screen of the last frame.
    fn shiny_star_visible(&mut self) -> bool;

    fn show(&mut self, overlay: &Overlay);

    fn quit_requested(&mut self) -> bool;
}

/// Status panel drawn next to the video.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Overlay {
    pub lines: Vec<(&'static str, String)>,
}

impl Overlay {
    pub fn from_session(session: &SessionState, stage: &str, substage: u16, fps: Option<f64>) -> Self {
        let run = &session.run;
        let show_opt = |p: Option<&crate::data::species::Pokemon>| {
            p.map_or_else(|| "None".to_string(), |p| p.name.clone())
        };
        let lines = vec![
            ("Run #", (session.runs + 1).to_string()),
            ("Stage: ", stage.to_string()),
            ("Substage: ", substage.to_string()),
            ("FPS: ", fps.map_or_else(|| "High".to_string(), |f| format!("{:.1}", f))),
            ("Base balls: ", session.balls.base_balls.to_string()),
            ("Legendary balls: ", session.balls.legendary_balls.to_string()),
            ("Pokemon caught: ", run.num_caught.to_string()),
            ("Pokemon: ", show_opt(run.pokemon.as_ref())),
            ("Opponent: ", show_opt(run.encounter.opponent.as_ref())),
            (
                "Win percentage: ",
                session.win_percent().map_or_else(|| "None%".to_string(), |p| format!("{}%", p)),
            ),
            (
                "Time per run: ",
                session
                    .time_per_run()
                    .map_or_else(|| "None".to_string(), |d| format!("{}s", d.num_seconds())),
            ),
            ("Shinies found: ", session.shinies_found.to_string()),
            ("Dynite Ore: ", session.dynite_ore.to_string()),
        ];
        Self { lines }
    }

    pub fn get(&self, label: &str) -> Option<&str> {
        self.lines
            .iter()
            .find(|(l, _)| l.trim_end_matches([':', ' ']) == label.trim_end_matches([':', ' ']))
            .map(|(_, v)| v.as_str())
    }

    pub fn log(&self) {
        for (label, value) in &self.lines {
            log::info!("{}{}", label, value);
        }
    }
}

impl fmt::Display for Overlay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (label, value) in &self.lines {
            writeln!(f, "{}{}", label, value)?;
        }
        Ok(())
    }
}

/// One captured frame of a recorded session.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// Seconds since the session started.
    pub time: f64,
    /// Region name to extracted text. Regions not listed read as empty.
    #[serde(default)]
    pub text: BTreeMap<String, String>,
    #[serde(default)]
    pub shiny: bool,
}

impl Frame {
    pub fn at(time: f64) -> Self {
        Self {
            time,
            ..Default::default()
        }
    }

    pub fn with_text(mut self, request: &TextRequest, text: impl Into<String>) -> Self {
        self.text.insert(request.name.to_string(), text.into());
        self
    }

    pub fn shiny(mut self, shiny: bool) -> Self {
        self.shiny = shiny;
        self
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Recording {
    pub frames: Vec<Frame>,
}

/// Replays a recorded session frame by frame. Once the last frame has been
/// captured it asks the loop to quit.
#[derive(Debug, Default)]
pub struct RecordedScreen {
    frames: Vec<Frame>,
    cursor: usize,
    last_overlay: Option<Overlay>,
}

impl RecordedScreen {
    pub fn new(frames: Vec<Frame>) -> Self {
        Self {
            frames,
            cursor: 0,
            last_overlay: None,
        }
    }

    /// Loads a `.json` recording, or YAML for any other extension.
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        let recording: Recording = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => serde_json::from_str(&data)?,
            _ => serde_yaml::from_str(&data)?,
        };
        if let Some(frame) = recording.frames.iter().find(|f| !f.time.is_finite()) {
            return Err(Error::Screen(format!(
                "{} has a frame at non-finite time {}",
                path.display(),
                frame.time
            )));
        }
        log::info!("Replaying {} frames from {}", recording.frames.len(), path.display());
        Ok(Self::new(recording.frames))
    }

    pub fn push(&mut self, frame: Frame) {
        self.frames.push(frame);
    }

    pub fn last_overlay(&self) -> Option<&Overlay> {
        self.last_overlay.as_ref()
    }

    fn current(&self) -> Option<&Frame> {
        self.cursor.checked_sub(1).and_then(|i| self.frames.get(i))
    }
}

impl Screen for RecordedScreen {
    fn capture(&mut self) -> Result<Duration> {
        if self.frames.is_empty() {
            return Err(Error::Screen("recording has no frames".to_string()));
        }
        if self.cursor < self.frames.len() {
            self.cursor += 1;
        }
        let time = self.current().map_or(0.0, |f| f.time);
        Duration::try_from_secs_f64(time.max(0.0))
            .map_err(|e| Error::Screen(format!("bad frame time {}: {}", time, e)))
    }

    fn read_text(&mut self, request: &TextRequest) -> String {
        self.current()
            .and_then(|f| f.text.get(request.name))
            .cloned()
            .unwrap_or_default()
    }

    fn shiny_star_visible(&mut self) -> bool {
        self.current().map_or(false, |f| f.shiny)
    }

    fn show(&mut self, overlay: &Overlay) {
        log::trace!("{}", overlay);
        self.last_overlay = Some(overlay.clone());
    }

    fn quit_requested(&mut self) -> bool {
        self.cursor >= self.frames.len()
    }
}
