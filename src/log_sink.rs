//! Log Sink
//!
//! TigerStyle: Append-only activity log of counter READ/WRITE events.
//!
//! Each event becomes one plain-text line:
//!
//! ```text
//! 2024/01/01 12:00:00 - READ = 0
//! 2024/01/01 12:00:03 - WRITE = 1
//! ```
//!
//! Recording is best-effort: a failed append is reported through `tracing`
//! and never reaches the caller. Reading back requires a configured
//! destination; without one the log viewer is simply unavailable.

use chrono::NaiveDateTime;
use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::PathBuf;

// =============================================================================
// TigerStyle Constants
// =============================================================================

/// strftime format of the timestamp prefix
pub const LOG_TIMESTAMP_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

// =============================================================================
// Types
// =============================================================================

/// What happened to the counter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogAction {
    /// Value resolved from storage at startup
    Read,
    /// Value persisted to storage
    Write,
}

impl LogAction {
    /// Label used in the log line
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Read => "READ",
            Self::Write => "WRITE",
        }
    }
}

impl fmt::Display for LogAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Format one log line (without the trailing newline).
pub fn format_line(action: LogAction, value: u64, timestamp: NaiveDateTime) -> String {
    format!(
        "{} - {} = {}",
        timestamp.format(LOG_TIMESTAMP_FORMAT),
        action,
        value
    )
}

// =============================================================================
// Log Sink
// =============================================================================

/// Append-only text log with an optional file destination
#[derive(Debug, Clone, Default)]
pub struct LogSink {
    /// Log file, if one was configured for this process
    destination: Option<PathBuf>,
}

impl LogSink {
    /// Create a sink writing to `destination`, or a sink with no
    /// destination when `None`.
    pub fn new(destination: Option<PathBuf>) -> Self {
        Self { destination }
    }

    /// Sink without a destination; events only reach `tracing`.
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Whether a destination is configured (and `read_all` can succeed).
    pub fn is_available(&self) -> bool {
        self.destination.is_some()
    }

    /// Append one event. Never fails from the caller's perspective.
    pub fn record(&self, action: LogAction, value: u64, timestamp: NaiveDateTime) {
        let line = format_line(action, value, timestamp);
        tracing::info!(action = %action, value = value, "{}", line);

        let Some(path) = &self.destination else {
            return;
        };

        let result = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .and_then(|mut file| writeln!(file, "{}", line));

        if let Err(e) = result {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "Failed to append to activity log"
            );
        }
    }

    /// Full accumulated log text.
    ///
    /// A configured destination that has not been written yet reads as empty.
    pub fn read_all(&self) -> Result<String, LogError> {
        let path = self.destination.as_ref().ok_or(LogError::Unavailable)?;

        match fs::read_to_string(path) {
            Ok(text) => Ok(text),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(String::new()),
            Err(e) => Err(LogError::Io {
                path: path.clone(),
                source: e,
            }),
        }
    }
}

// =============================================================================
// Errors
// =============================================================================

/// Log retrieval errors
#[derive(Debug, thiserror::Error)]
pub enum LogError {
    #[error("no log destination configured")]
    Unavailable,

    #[error("failed to read log {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{Clock, ManualClock};
    use tempfile::tempdir;

    #[test]
    fn test_format_line() {
        let clock = ManualClock::default();
        assert_eq!(
            format_line(LogAction::Read, 0, clock.now()),
            "2024/01/01 00:00:00 - READ = 0"
        );
        clock.advance_secs(3_723);
        assert_eq!(
            format_line(LogAction::Write, 42, clock.now()),
            "2024/01/01 01:02:03 - WRITE = 42"
        );
    }

    #[test]
    fn test_record_appends_in_call_order() {
        let dir = tempdir().unwrap();
        let sink = LogSink::new(Some(dir.path().join("console.log")));
        let clock = ManualClock::default();

        sink.record(LogAction::Read, 7, clock.now());
        clock.advance_secs(1);
        sink.record(LogAction::Write, 8, clock.now());

        assert_eq!(
            sink.read_all().unwrap(),
            "2024/01/01 00:00:00 - READ = 7\n2024/01/01 00:00:01 - WRITE = 8\n"
        );
    }

    #[test]
    fn test_record_keeps_existing_text() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("console.log");
        std::fs::write(&path, "earlier output\n").unwrap();

        let sink = LogSink::new(Some(path));
        sink.record(LogAction::Write, 1, ManualClock::default().now());

        assert_eq!(
            sink.read_all().unwrap(),
            "earlier output\n2024/01/01 00:00:00 - WRITE = 1\n"
        );
    }

    #[test]
    fn test_read_all_without_destination() {
        let sink = LogSink::disabled();
        assert!(!sink.is_available());
        assert!(matches!(sink.read_all(), Err(LogError::Unavailable)));

        // Recording without a destination is a no-op, not a failure
        sink.record(LogAction::Read, 0, ManualClock::default().now());
    }

    #[test]
    fn test_read_all_before_first_record() {
        let dir = tempdir().unwrap();
        let sink = LogSink::new(Some(dir.path().join("console.log")));
        assert!(sink.is_available());
        assert_eq!(sink.read_all().unwrap(), "");
    }

    #[test]
    fn test_record_failure_is_swallowed() {
        let dir = tempdir().unwrap();
        let sink = LogSink::new(Some(dir.path().join("missing").join("console.log")));

        sink.record(LogAction::Write, 1, ManualClock::default().now());

        assert_eq!(sink.read_all().unwrap(), "");
    }
}
