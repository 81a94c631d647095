//! The run log: timestamped messages collected during one write.

use std::fmt;

use chrono::{DateTime, Local};
use serde::Serialize;

/// How a log message should be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Normal progress.
    Info,
    /// A pass did not run because its template slot is empty.
    Skipped,
    /// Something worth attention that did not stop anything.
    Warning,
    /// A pass or the whole run stopped early.
    Aborted,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Info => write!(f, "info"),
            LogLevel::Skipped => write!(f, "skipped"),
            LogLevel::Warning => write!(f, "warning"),
            LogLevel::Aborted => write!(f, "aborted"),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LogEntry {
    pub timestamp: DateTime<Local>,
    pub level: LogLevel,
    pub message: String,
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {}",
            self.timestamp.format("%H:%M:%S"),
            self.level,
            self.message
        )
    }
}

/// Append-only list of entries for a single run.
///
/// Every entry is also emitted as a `tracing` event.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct RunLog {
    entries: Vec<LogEntry>,
}

impl RunLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, level: LogLevel, message: impl Into<String>) {
        let message = message.into();
        match level {
            LogLevel::Info => tracing::info!("{}", message),
            LogLevel::Skipped => tracing::debug!("{}", message),
            LogLevel::Warning | LogLevel::Aborted => tracing::warn!(%level, "{}", message),
        }
        self.entries.push(LogEntry {
            timestamp: Local::now(),
            level,
            message,
        });
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(LogLevel::Info, message);
    }

    pub fn skipped(&mut self, message: impl Into<String>) {
        self.push(LogLevel::Skipped, message);
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.push(LogLevel::Warning, message);
    }

    pub fn aborted(&mut self, message: impl Into<String>) {
        self.push(LogLevel::Aborted, message);
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Messages in order, without timestamps.
    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.message.as_str())
    }

    /// Entries of a single level.
    pub fn at_level(&self, level: LogLevel) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter().filter(move |e| e.level == level)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entries_keep_order_and_level() {
        let mut log = RunLog::new();
        log.info("Starting Write Process");
        log.skipped("No row template, skipping row files");
        log.aborted("No class instance fragment available to write database template.");

        let messages: Vec<_> = log.messages().collect();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0], "Starting Write Process");
        assert_eq!(log.at_level(LogLevel::Aborted).count(), 1);
        assert_eq!(log.entries()[1].level, LogLevel::Skipped);
    }

    #[test]
    fn test_level_display() {
        assert_eq!(LogLevel::Info.to_string(), "info");
        assert_eq!(LogLevel::Aborted.to_string(), "aborted");
    }
}
