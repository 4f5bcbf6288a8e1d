use std::{
    fs::{self, File, OpenOptions},
    io::{BufWriter, Write as _},
    path::Path,
    sync::Mutex,
};

use anyhow::Context;
use chrono::Local;
use log::{LevelFilter, Log, Metadata, Record};

/// Appends log records to a file.
///
/// The terminal belongs to the TUI while a game runs, so nothing is ever
/// written to stdout or stderr.
#[derive(Debug)]
struct FileLogger {
    level: LevelFilter,
    writer: Mutex<BufWriter<File>>,
}

impl Log for FileLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let Ok(mut writer) = self.writer.lock() else {
            return;
        };
        // A failed log write has nowhere else to go.
        _ = writeln!(
            writer,
            "{} {:<5} [{}] {}",
            Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
            record.level(),
            record.target(),
            record.args()
        );
    }

    fn flush(&self) {
        if let Ok(mut writer) = self.writer.lock() {
            _ = writer.flush();
        }
    }
}

/// Installs the global logger, writing to `<dir>/inkgrid.log`.
///
/// Does nothing when logging is turned off.
pub(crate) fn init(dir: &Path, level: LevelFilter) -> anyhow::Result<()> {
    if level == LevelFilter::Off {
        return Ok(());
    }
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create data directory: {}", dir.display()))?;
    let path = dir.join("inkgrid.log");
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))?;
    let logger = FileLogger {
        level,
        writer: Mutex::new(BufWriter::new(file)),
    };
    log::set_boxed_logger(Box::new(logger)).context("Failed to install logger")?;
    log::set_max_level(level);
    Ok(())
}

/// Flushes buffered records before the process exits.
pub(crate) fn flush() {
    log::logger().flush();
}
