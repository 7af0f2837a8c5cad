//! Persistent Counter
//!
//! TigerStyle: One integer, one file, always a usable value.
//!
//! The counter is read once at construction and written after every
//! increment. Storage that is missing or unparsable means "first run" and
//! resolves to zero. A failed write is returned to the caller while the
//! in-memory count stays advanced, so retrying the increment persists the
//! user's action.
//!
//! The file holds the decimal value with no trailing newline. Writes go to a
//! temporary file in the same directory which then replaces the counter file,
//! so a crash mid-write never leaves a half-written value behind.

use crate::clock::{Clock, SystemClock};
use crate::log_sink::{LogAction, LogSink};
use serde::Serialize;
use std::fs;
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

// =============================================================================
// TigerStyle Constants
// =============================================================================

/// Counter file name inside the data directory
pub const COUNTER_FILE_NAME: &str = "counter.txt";

/// Mode requested for a newly created counter file (before umask)
#[cfg(unix)]
pub const COUNTER_FILE_MODE_NEW: u32 = 0o666;

// =============================================================================
// Observer
// =============================================================================

/// Receives the new display text whenever the count changes.
pub trait CounterObserver {
    /// Called after the in-memory count advances, before it is persisted.
    fn on_count_changed(&self, display_text: &str);
}

/// Human-readable label for a count.
pub fn display_text(count: u64) -> String {
    let suffix = if count == 1 { "" } else { "s" };
    format!("Button tapped {} time{}", count, suffix)
}

/// Serializable view of the counter state
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CounterSnapshot {
    pub count: u64,
    pub display_text: String,
    pub storage_path: PathBuf,
}

// =============================================================================
// Persistent Counter
// =============================================================================

/// A tap counter backed by a single text file
pub struct PersistentCounter {
    /// Current count
    count: u64,
    /// Counter file, fixed at construction
    storage_path: PathBuf,
    /// Activity log
    log: LogSink,
    /// Timestamp source for log events
    clock: Box<dyn Clock>,
    /// Display subscribers
    observers: Vec<Box<dyn CounterObserver>>,
}

impl std::fmt::Debug for PersistentCounter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PersistentCounter")
            .field("count", &self.count)
            .field("storage_path", &self.storage_path)
            .field("log", &self.log)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl PersistentCounter {
    /// Open the counter stored at `storage_path`, timestamping log events
    /// with the system clock.
    pub fn open(storage_path: impl Into<PathBuf>, log: LogSink) -> Self {
        Self::with_clock(storage_path, log, Box::new(SystemClock))
    }

    /// Open the counter with an explicit clock.
    pub fn with_clock(storage_path: impl Into<PathBuf>, log: LogSink, clock: Box<dyn Clock>) -> Self {
        let mut counter = Self {
            count: 0,
            storage_path: storage_path.into(),
            log,
            clock,
            observers: Vec::new(),
        };
        counter.count = counter.load();
        counter
    }

    /// Read the stored value, falling back to zero when the file is missing
    /// or does not hold an integer. Records one READ event.
    fn load(&self) -> u64 {
        let value = match fs::read_to_string(&self.storage_path) {
            Ok(text) => match text.trim().parse::<u64>() {
                Ok(value) => value,
                Err(e) => {
                    tracing::debug!(
                        path = %self.storage_path.display(),
                        error = %e,
                        "Counter file is not an integer, starting from 0"
                    );
                    0
                }
            },
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(
                    path = %self.storage_path.display(),
                    "No counter file yet, starting from 0"
                );
                0
            }
            Err(e) => {
                tracing::warn!(
                    path = %self.storage_path.display(),
                    error = %e,
                    "Failed to read counter file, starting from 0"
                );
                0
            }
        };

        self.log.record(LogAction::Read, value, self.clock.now());
        value
    }

    /// Advance the count by one, refresh observers, then persist.
    ///
    /// On a write error the in-memory count keeps the new value and the
    /// error is returned; calling `increment` again retries the write.
    pub fn increment(&mut self) -> Result<u64, CounterError> {
        self.count = self.count.checked_add(1).ok_or(CounterError::Overflow)?;

        self.refresh();
        self.persist()?;
        self.log.record(LogAction::Write, self.count, self.clock.now());

        Ok(self.count)
    }

    /// Write the current count, replacing the counter file atomically.
    fn persist(&self) -> Result<(), CounterError> {
        let io_err = |source| CounterError::Io {
            path: self.storage_path.clone(),
            source,
        };

        let dir = match self.storage_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut tmp = self.temp_file_in(dir).map_err(io_err)?;
        tmp.write_all(self.count.to_string().as_bytes())
            .map_err(io_err)?;
        tmp.as_file().sync_all().map_err(io_err)?;
        tmp.persist(&self.storage_path).map_err(|e| io_err(e.error))?;

        tracing::debug!(
            path = %self.storage_path.display(),
            count = self.count,
            "Persisted counter"
        );
        Ok(())
    }

    /// Temporary file that will replace the counter file. It carries the
    /// existing file's permissions, or the usual new-file mode.
    fn temp_file_in(&self, dir: &Path) -> io::Result<NamedTempFile> {
        match fs::metadata(&self.storage_path) {
            Ok(meta) => {
                let tmp = NamedTempFile::new_in(dir)?;
                tmp.as_file().set_permissions(meta.permissions())?;
                Ok(tmp)
            }
            Err(_) => new_temp_file_in(dir),
        }
    }

    /// Notify observers with the current label.
    pub fn refresh(&self) {
        let text = self.current_display_text();
        for observer in &self.observers {
            observer.on_count_changed(&text);
        }
    }

    /// Label for the current count
    pub fn current_display_text(&self) -> String {
        display_text(self.count)
    }

    /// Current count
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Counter file location
    pub fn storage_path(&self) -> &Path {
        &self.storage_path
    }

    /// Activity log this counter records to
    pub fn log(&self) -> &LogSink {
        &self.log
    }

    /// Register a display subscriber
    pub fn subscribe(&mut self, observer: Box<dyn CounterObserver>) {
        self.observers.push(observer);
    }

    /// Serializable view of the current state
    pub fn snapshot(&self) -> CounterSnapshot {
        CounterSnapshot {
            count: self.count,
            display_text: self.current_display_text(),
            storage_path: self.storage_path.clone(),
        }
    }
}

#[cfg(unix)]
fn new_temp_file_in(dir: &Path) -> io::Result<NamedTempFile> {
    use std::os::unix::fs::PermissionsExt;

    tempfile::Builder::new()
        .permissions(fs::Permissions::from_mode(COUNTER_FILE_MODE_NEW))
        .tempfile_in(dir)
}

#[cfg(not(unix))]
fn new_temp_file_in(dir: &Path) -> io::Result<NamedTempFile> {
    NamedTempFile::new_in(dir)
}

// =============================================================================
// Errors
// =============================================================================

/// Counter errors
#[derive(Debug, thiserror::Error)]
pub enum CounterError {
    #[error("failed to write counter file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("counter overflow")]
    Overflow,
}

// =============================================================================
// Tests
// =============================================================================
