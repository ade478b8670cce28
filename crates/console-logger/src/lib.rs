//! Console Logger
//!
//! `log` backend for the admin UI. Records go to the browser console on
//! wasm32 (stderr elsewhere) and the most recent ones are kept in a bounded
//! circular buffer so they can be dumped from the UI after the fact.

use std::collections::VecDeque;
use std::fmt;
use std::sync::{Mutex, OnceLock};

use chrono::{DateTime, Local};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

/// One retained record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub timestamp: DateTime<Local>,
    pub level: Level,
    pub target: String,
    pub message: String,
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {:<5} {}: {}",
            self.timestamp.format("%H:%M:%S%.3f"),
            self.level,
            self.target,
            self.message
        )
    }
}

/// Fixed-capacity buffer that drops the oldest entry when full
#[derive(Debug)]
struct RingBuffer {
    entries: VecDeque<LogEntry>,
    capacity: usize,
}

impl RingBuffer {
    fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    fn push(&mut self, entry: LogEntry) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    fn last(&self, n: usize) -> Vec<LogEntry> {
        let skip = self.entries.len().saturating_sub(n);
        self.entries.iter().skip(skip).cloned().collect()
    }
}

pub struct ConsoleLogger {
    app_name: String,
    level: LevelFilter,
    buffer: Mutex<RingBuffer>,
}

impl ConsoleLogger {
    pub fn new(app_name: &str, level: LevelFilter, capacity: usize) -> Self {
        Self {
            app_name: app_name.to_string(),
            level,
            buffer: Mutex::new(RingBuffer::new(capacity)),
        }
    }

    /// Up to `n` most recent entries, oldest first
    pub fn recent(&self, n: usize) -> Vec<LogEntry> {
        match self.buffer.lock() {
            Ok(buffer) => buffer.last(n),
            Err(_) => Vec::new(),
        }
    }

    pub fn clear(&self) {
        if let Ok(mut buffer) = self.buffer.lock() {
            buffer.entries.clear();
        }
    }

    fn emit(&self, entry: &LogEntry) {
        let line = format!("{} {}", self.app_name, entry);
        write_console(entry.level, &line);
    }
}

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let entry = LogEntry {
            timestamp: Local::now(),
            level: record.level(),
            target: record.target().to_string(),
            message: record.args().to_string(),
        };
        self.emit(&entry);
        if let Ok(mut buffer) = self.buffer.lock() {
            buffer.push(entry);
        }
    }

    fn flush(&self) {}
}

#[cfg(target_arch = "wasm32")]
fn write_console(level: Level, line: &str) {
    let value = wasm_bindgen::JsValue::from_str(line);
    match level {
        Level::Error => web_sys::console::error_1(&value),
        Level::Warn => web_sys::console::warn_1(&value),
        Level::Info => web_sys::console::info_1(&value),
        Level::Debug | Level::Trace => web_sys::console::debug_1(&value),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn write_console(_level: Level, line: &str) {
    eprintln!("{}", line);
}

static LOGGER: OnceLock<ConsoleLogger> = OnceLock::new();

/// Install the global logger. Fails if a logger is already installed.
pub fn init_logger(app_name: &str, level: LevelFilter, capacity: usize) -> Result<(), SetLoggerError> {
    let logger = LOGGER.get_or_init(|| ConsoleLogger::new(app_name, level, capacity));
    log::set_logger(logger)?;
    log::set_max_level(level);
    Ok(())
}

/// Recent entries of the global logger (empty before [`init_logger`])
pub fn recent(n: usize) -> Vec<LogEntry> {
    LOGGER.get().map(|l| l.recent(n)).unwrap_or_default()
}

/// Recent entries of the global logger as text, one per line
pub fn dump(n: usize) -> String {
    recent(n)
        .iter()
        .map(LogEntry::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn info(message: &str) {
    log::info!(target: "app", "{}", message);
}

pub fn warn(message: &str) {
    log::warn!(target: "app", "{}", message);
}

pub fn error(message: &str) {
    log::error!(target: "app", "{}", message);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn log_to(logger: &ConsoleLogger, level: Level, message: &str) {
        logger.log(
            &Record::builder()
                .level(level)
                .target("test")
                .args(format_args!("{}", message))
                .build(),
        );
    }

    #[test]
    fn test_buffer_drops_oldest() {
        let logger = ConsoleLogger::new("Test", LevelFilter::Trace, 3);
        for i in 0..5 {
            log_to(&logger, Level::Info, &format!("m{}", i));
        }
        let kept: Vec<String> = logger.recent(10).into_iter().map(|e| e.message).collect();
        assert_eq!(kept, vec!["m2", "m3", "m4"]);
        assert_eq!(logger.recent(1)[0].message, "m4");
    }

    #[test]
    fn test_level_filter() {
        let logger = ConsoleLogger::new("Test", LevelFilter::Warn, 10);
        log_to(&logger, Level::Debug, "hidden");
        log_to(&logger, Level::Error, "shown");
        let entries = logger.recent(10);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].level, Level::Error);
        assert_eq!(entries[0].target, "test");
    }

    #[test]
    fn test_entry_line_format() {
        let logger = ConsoleLogger::new("Test", LevelFilter::Info, 2);
        log_to(&logger, Level::Warn, "slow response");
        let line = logger.recent(1)[0].to_string();
        assert!(line.ends_with("WARN  test: slow response"), "{}", line);
        logger.clear();
        assert!(logger.recent(5).is_empty());
    }

    #[test]
    fn test_zero_capacity_keeps_one() {
        let logger = ConsoleLogger::new("Test", LevelFilter::Info, 0);
        log_to(&logger, Level::Info, "a");
        log_to(&logger, Level::Info, "b");
        assert_eq!(logger.recent(5).len(), 1);
    }
}
