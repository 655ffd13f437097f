pub mod device;
pub mod vision;

pub use device::{Button, CommandSink, RecordingSink, SerialDevice};
pub use vision::{Frame, Overlay, RecordedScreen, Screen, TextRequest};
