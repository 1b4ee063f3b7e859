//! Logger utility for application-wide logging
//!
//! This module provides a custom logger implementation that works alongside
//! the standard log crate, but adds file output capabilities. A `Logger`
//! is also used directly as a run report sink for milestone lines.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;
use log::{Log, Record, Metadata, LevelFilter};

/// Custom logger implementation
pub struct Logger {
    /// File handle for log output, `None` discards messages
    file: Mutex<Option<File>>,
    /// Most verbose level accepted when installed as the global logger
    level: LevelFilter,
}

impl Logger {
    /// Creates a new logger instance
    ///
    /// # Arguments
    ///
    /// * `log_file` - Path to the log file
    ///
    /// # Returns
    ///
    /// A new Logger instance or an error if the file cannot be created
    pub fn new(log_file: &Path) -> io::Result<Self> {
        let file = File::create(log_file)?;
        Ok(Logger {
            file: Mutex::new(Some(file)),
            level: LevelFilter::Debug,
        })
    }

    /// Creates a logger that discards every message
    pub fn sink() -> Self {
        Logger {
            file: Mutex::new(None),
            level: LevelFilter::Off,
        }
    }

    /// Logs a message to the log file
    ///
    /// # Arguments
    ///
    /// * `message` - The message to log
    pub fn log(&self, message: &str) -> io::Result<()> {
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

    /// Static method to initialize the global logger
    ///
    /// # Arguments
    ///
    /// * `log_file` - File receiving every record
    /// * `level` - Most verbose level to record
    pub fn init_global_logger(log_file: &Path, level: LevelFilter) -> io::Result<()> {
        let mut global_logger = Logger::new(log_file)?;
        global_logger.level = level;

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
            let _ = Logger::log(self, &message);

            // Also echo to the console
            eprintln!("{}", message);
        }
    }

    fn flush(&self) {
        // Already flushing in the log method
    }
}
