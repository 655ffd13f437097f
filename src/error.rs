use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("logger setup failed: {0}")]
    Logger(#[from] log::SetLoggerError),
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("unknown {kind} '{name}'")]
    Unknown { kind: &'static str, name: String },
    #[error("malformed source data in {file}: {reason}")]
    Source { file: String, reason: String },
    #[error("serial port error: {0}")]
    Serial(#[from] serialport::Error),
    #[error("device unavailable: {0}")]
    Device(String),
    #[error("screen unavailable: {0}")]
    Screen(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn unknown(kind: &'static str, name: impl Into<String>) -> Self {
        Error::Unknown {
            kind,
            name: name.into(),
        }
    }

    pub fn source(file: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::Source {
            file: file.into(),
            reason: reason.into(),
        }
    }
}
