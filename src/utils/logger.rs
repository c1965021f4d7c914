//! Logger utility for application-wide logging
//!
//! This module provides a logger for the `log` crate that prints every
//! record to the console and mirrors it into a log file.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;
use log::{Log, Record, Metadata, LevelFilter};

use crate::utils::progress::suspend_active;

/// Console and file logger
pub struct Logger {
    /// File handle for log output
    file: Mutex<Option<File>>,
    /// Most verbose level that is recorded
    level: LevelFilter,
}

impl Logger {
    /// Creates a new logger instance
    ///
    /// # Arguments
    ///
    /// * `log_file` - Path to the log file
    /// * `level` - Most verbose level to record
    ///
    /// # Returns
    ///
    /// A new Logger instance or an error if the file cannot be created
    pub fn new(log_file: &Path, level: LevelFilter) -> io::Result<Self> {
        let file = File::create(log_file)?;
        Ok(Logger {
            file: Mutex::new(Some(file)),
            level,
        })
    }

    /// Appends a line to the log file
    ///
    /// # Arguments
    ///
    /// * `message` - The line to write
    pub fn write_line(&self, message: &str) -> io::Result<()> {
        let mut guard = match self.file.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Some(file) = guard.as_mut() {
            writeln!(file, "{}", message)?;
            file.flush()?;
        }
        Ok(())
    }

    /// Install a logger writing to `log_file` as the global `log` backend
    pub fn init_global_logger(log_file: &Path, level: LevelFilter) -> io::Result<()> {
        let global_logger = Logger::new(log_file, level)?;

        // Only called once at startup
        if log::set_boxed_logger(Box::new(global_logger)).is_err() {
            eprintln!("Warning: Global logger was already initialized");
        }

        log::set_max_level(level);
        Ok(())
    }
}

// Implement the Log trait to make our Logger work with the log crate
impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let message = format!("[{}] {}", record.level(), record.args());
            let _ = self.write_line(&message);

            // Also print to console, around any progress bar
            suspend_active(|| println!("{}", message));
        }
    }

    fn flush(&self) {
        // Already flushing in write_line
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::Level;

    #[test]
    fn test_records_above_level_are_filtered() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("terrainkit.log");
        let logger = Logger::new(&path, LevelFilter::Info).unwrap();

        logger.log(&Record::builder().level(Level::Info).args(format_args!("kept")).build());
        logger.log(&Record::builder().level(Level::Debug).args(format_args!("dropped")).build());

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "[INFO] kept\n");
    }
}
