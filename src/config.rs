use crate::core::state::{BallInventory, Mode, SessionState};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const BOSS_VAR: &str = "MAX_LAIR_BOSS";
pub const DEVICE_VAR: &str = "MAX_LAIR_DEVICE";
pub const MODE_VAR: &str = "MAX_LAIR_MODE";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceConfig {
    pub path: PathBuf,
    pub baud_rate: u32,
    /// 0 keeps trying forever.
    pub connect_attempts: u32,
    pub retry_delay_ms: u64,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("/dev/ttyACM0"),
            baud_rate: 9600,
            connect_attempts: 0,
            retry_delay_ms: 500,
        }
    }
}

impl DeviceConfig {
    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub boss: String,
    pub base_ball: String,
    pub base_balls: u32,
    pub legendary_ball: String,
    pub legendary_balls: u32,
    pub mode: Mode,
    pub dynite_ore: u32,
    pub device: DeviceConfig,
    pub data_dir: PathBuf,
    pub log_dir: PathBuf,
    /// Replay this recorded session instead of a live screen.
    pub recording: Option<PathBuf>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            boss: String::new(),
            base_ball: "Poke".to_string(),
            base_balls: 0,
            legendary_ball: "Poke".to_string(),
            legendary_balls: 0,
            mode: Mode::Default,
            dynite_ore: 0,
            device: DeviceConfig::default(),
            data_dir: PathBuf::from("data"),
            log_dir: PathBuf::from("logs"),
            recording: None,
        }
    }
}

impl SessionConfig {
    pub fn from_yaml(text: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Reads the YAML file, then applies `.env` and environment overrides.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let mut config = Self::from_yaml(&text)?;
        dotenv::dotenv().ok();
        config.apply_overrides(|key| env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(boss) = lookup(BOSS_VAR) {
            self.boss = boss;
        }
        if let Some(device) = lookup(DEVICE_VAR) {
            self.device.path = PathBuf::from(device);
        }
        if let Some(mode) = lookup(MODE_VAR) {
            self.mode = Mode::parse(&mode)
                .ok_or_else(|| Error::Config(format!("{} has unknown mode '{}'", MODE_VAR, mode)))?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.boss.trim().is_empty() {
            return Err(Error::Config("no boss configured".to_string()));
        }
        if self.base_ball.trim().is_empty() || self.legendary_ball.trim().is_empty() {
            return Err(Error::Config("ball kinds must not be empty".to_string()));
        }
        Ok(())
    }

    pub fn balls(&self) -> BallInventory {
        BallInventory {
            base_ball: self.base_ball.clone(),
            base_balls: self.base_balls,
            legendary_ball: self.legendary_ball.clone(),
            legendary_balls: self.legendary_balls,
        }
    }

    pub fn new_session(&self) -> SessionState {
        SessionState::new(self.boss.clone(), self.balls(), self.mode, self.dynite_ore)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "
boss: Zygarde
base_ball: Dive
base_balls: 12
legendary_ball: Beast
legendary_balls: 3
mode: ball-saver
dynite_ore: 20
device:
  path: /dev/ttyUSB1
";

    #[test]
    fn parses_yaml_with_defaults() {
        let config = SessionConfig::from_yaml(SAMPLE).expect("parse");
        assert_eq!(config.boss, "Zygarde");
        assert_eq!(config.mode, Mode::BallSaver);
        assert_eq!(config.device.path, PathBuf::from("/dev/ttyUSB1"));
        assert_eq!(config.device.retry_delay_ms, 500);
        assert_eq!(config.device.baud_rate, 9600);
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn environment_overrides_win() {
        let mut config = SessionConfig::from_yaml(SAMPLE).expect("parse");
        config
            .apply_overrides(|key| match key {
                BOSS_VAR => Some("Kyogre".to_string()),
                MODE_VAR => Some("strong boss".to_string()),
                _ => None,
            })
            .expect("overrides");
        assert_eq!(config.boss, "Kyogre");
        assert_eq!(config.mode, Mode::StrongBoss);

        let err = config.apply_overrides(|key| (key == MODE_VAR).then(|| "turbo".to_string()));
        assert!(err.is_err());
    }

    #[test]
    fn missing_boss_is_rejected() {
        let config = SessionConfig::default();
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }
}
