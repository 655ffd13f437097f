use crate::error::Result;
use chrono::{DateTime, Local};
use log::{LevelFilter, Record};
use std::fmt::Arguments;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// `<boss>_<YYYY-mm-dd HH-MM-SS>_log.txt`
pub fn session_log_name(boss: &str, started: &DateTime<Local>) -> String {
    format!("{}_{}_log.txt", boss, started.format("%Y-%m-%d %H-%M-%S"))
}

/// Console at info, plus a debug-level file under `dir` when one is given.
/// Returns the path of the log file.
pub fn init(dir: Option<&Path>, file_name: &str) -> Result<Option<PathBuf>> {
    let console = fern::Dispatch::new()
        .format(console_format)
        .level(LevelFilter::Info)
        .chain(io::stdout());

    let mut dispatch = fern::Dispatch::new().chain(console);
    let mut path = None;
    if let Some(dir) = dir {
        fs::create_dir_all(dir)?;
        let file_path = dir.join(file_name);
        let file = fern::Dispatch::new()
            .format(file_format)
            .level(LevelFilter::Debug)
            .chain(fern::log_file(&file_path)?);
        dispatch = dispatch.chain(file);
        path = Some(file_path);
    }
    dispatch.apply()?;
    Ok(path)
}

fn console_format(callback: fern::FormatCallback, message: &Arguments, record: &Record) {
    callback.finish(format_args!(
        "[{} {}] {}",
        chrono::Local::now().format("%T"),
        record.level(),
        message
    ))
}

fn file_format(callback: fern::FormatCallback, message: &Arguments, record: &Record) {
    callback.finish(format_args!(
        "{}\t{}\t{}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        record.level(),
        message
    ))
}
