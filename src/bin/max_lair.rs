//! Runs Max Lair adventures until a shiny legendary turns up, the balls run
//! out, or `q` is requested through the screen.
//!
//! Usage:
//!   max-lair --config session.yaml [--recording session.yaml] [--dry-run]

use clap::Parser;
use max_lair::core::controller::Controller;
use max_lair::error::Error as LairError;
use max_lair::io::device::{CommandSink, RecordingSink, SerialDevice};
use max_lair::io::vision::RecordedScreen;
use max_lair::{logger, GameData, SessionConfig};
use std::error::Error;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Session configuration (YAML)
    #[arg(short, long, default_value = "session.yaml")]
    config: PathBuf,

    /// Replay a recorded session instead of the configured one
    #[arg(short, long)]
    recording: Option<PathBuf>,

    /// Do not open the device; presses are only logged
    #[arg(long)]
    dry_run: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let mut config = SessionConfig::load(&args.config)?;
    if args.recording.is_some() {
        config.recording = args.recording;
    }

    let mut session = config.new_session();
    let log_name = logger::session_log_name(&config.boss, &session.started);
    logger::init(Some(&config.log_dir), &log_name)?;
    log::info!("Loaded session configuration from {}", args.config.display());

    let data = GameData::load(&config.data_dir)?;
    data.boss(&config.boss)?;

    let recording = config
        .recording
        .as_ref()
        .ok_or_else(|| LairError::Screen("no video source configured".to_string()))?;
    let mut screen = RecordedScreen::load(recording)?;

    let mut device: Box<dyn CommandSink> = if args.dry_run {
        Box::new(RecordingSink::new())
    } else {
        Box::new(SerialDevice::connect(
            &config.device.path,
            config.device.baud_rate,
            config.device.connect_attempts,
            config.device.retry_delay(),
        )?)
    };

    let mut controller = Controller::new();
    let stage = controller.run(&mut session, &data, &mut screen, device.as_mut())?;
    log::info!(
        "Finished in stage {}: {}",
        stage,
        controller.finish_reason().unwrap_or("stopped")
    );
    Ok(())
}
