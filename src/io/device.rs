use crate::error::{Error, Result};
use serialport::SerialPort;
use std::fmt;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

/// A single controller input understood by the microcontroller firmware.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Button {
    A,
    B,
    /// Closes the game from the Home menu.
    X,
    Y,
    L,
    Up,
    Down,
    Left,
    Home,
    /// No-op tokens, used to mark the end of a scripted sequence.
    Digit(u8),
}

impl Button {
    pub fn token(self) -> u8 {
        match self {
            Button::A => b'a',
            Button::B => b'b',
            Button::X => b'x',
            Button::Y => b'y',
            Button::L => b'l',
            Button::Up => b'^',
            Button::Down => b'v',
            Button::Left => b'<',
            Button::Home => b'h',
            Button::Digit(d) => b'0' + d.min(9),
        }
    }

    pub fn from_token(token: u8) -> Option<Self> {
        Some(match token {
            b'a' => Button::A,
            b'b' => Button::B,
            b'x' => Button::X,
            b'y' => Button::Y,
            b'l' => Button::L,
            b'^' => Button::Up,
            b'v' => Button::Down,
            b'<' => Button::Left,
            b'h' => Button::Home,
            b'0'..=b'9' => Button::Digit(token - b'0'),
            _ => return None,
        })
    }
}

impl fmt::Display for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token() as char)
    }
}

pub trait CommandSink {
    fn press(&mut self, button: Button) -> Result<()>;

    /// Returns whatever the device sent back since the last call, without blocking.
    fn drain(&mut self) -> Result<Vec<u8>>;
}

const READ_TIMEOUT: Duration = Duration::from_millis(10);

/// Byte-oriented link to the input-emulation microcontroller.
///
/// Reads only happen inside `drain`, on the caller's thread.
pub struct SerialDevice {
    path: PathBuf,
    port: Box<dyn SerialPort>,
}

impl SerialDevice {
    /// Opens the device, retrying until it appears. `attempts == 0` retries forever.
    pub fn connect(path: &Path, baud_rate: u32, attempts: u32, delay: Duration) -> Result<Self> {
        log::info!("Connecting to {} at {} baud...", path.display(), baud_rate);
        let builder = serialport::new(path.to_string_lossy(), baud_rate).timeout(READ_TIMEOUT);
        let mut tried = 0;
        let port = loop {
            match builder.clone().open() {
                Ok(port) => break port,
                Err(e) => {
                    tried += 1;
                    if attempts != 0 && tried >= attempts {
                        return Err(Error::Device(format!("{}: {}", path.display(), e)));
                    }
                    log::debug!("Could not open {} ({}), retrying", path.display(), e);
                    thread::sleep(delay);
                }
            }
        };
        log::info!("Connected!");
        Ok(Self {
            path: path.to_path_buf(),
            port,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CommandSink for SerialDevice {
    fn press(&mut self, button: Button) -> Result<()> {
        self.port.write_all(&[button.token()])?;
        self.port.flush()?;
        Ok(())
    }

    fn drain(&mut self) -> Result<Vec<u8>> {
        let waiting = self.port.bytes_to_read()? as usize;
        if waiting == 0 {
            return Ok(Vec::new());
        }
        let mut bytes = vec![0u8; waiting];
        let read = self.port.read(&mut bytes)?;
        bytes.truncate(read);
        Ok(bytes)
    }
}

/// In-memory sink that remembers every press. Echoes tokens back like the firmware.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pressed: Vec<Button>,
    pending: Vec<u8>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pressed(&self) -> &[Button] {
        &self.pressed
    }

    pub fn clear(&mut self) {
        self.pressed.clear();
        self.pending.clear();
    }

    /// The presses so far as the token string sent over the wire.
    pub fn tokens(&self) -> String {
        self.pressed.iter().map(|b| b.token() as char).collect()
    }
}

impl CommandSink for RecordingSink {
    fn press(&mut self, button: Button) -> Result<()> {
        log::trace!("press {}", button);
        self.pressed.push(button);
        self.pending.push(button.token());
        Ok(())
    }

    fn drain(&mut self) -> Result<Vec<u8>> {
        Ok(std::mem::take(&mut self.pending))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_round_trip() {
        for token in b"abxyl^v<h0123456789" {
            let button = Button::from_token(*token).expect("known token");
            assert_eq!(button.token(), *token);
        }
        assert_eq!(Button::from_token(b'z'), None);
    }

    #[test]
    fn recording_sink_echoes_once() {
        let mut sink = RecordingSink::new();
        sink.press(Button::A).expect("press");
        sink.press(Button::Down).expect("press");
        assert_eq!(sink.drain().expect("drain"), b"av".to_vec());
        assert!(sink.drain().expect("drain").is_empty());
        assert_eq!(sink.tokens(), "av");
    }

    #[test]
    fn missing_device_gives_up_after_the_configured_attempts() {
        let path = std::env::temp_dir().join(format!("max-lair-no-such-port-{}", std::process::id()));
        let result = SerialDevice::connect(&path, 9600, 2, Duration::from_millis(1));
        assert!(matches!(result, Err(Error::Device(_))));
    }
}
