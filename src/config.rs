//! Configuration
//!
//! TigerStyle: Locations are resolved once and passed explicitly.
//!
//! Two locations matter: the counter file and the optional activity log.
//! Each comes from a CLI flag, an environment variable (possibly loaded from
//! `.env`), or a built-in default, in that order.

use crate::counter::COUNTER_FILE_NAME;
use serde::Serialize;
use std::path::{Path, PathBuf};

// =============================================================================
// TigerStyle Constants
// =============================================================================

/// Data directory used when nothing else is configured
pub const DATA_DIR_DEFAULT: &str = "~/.storage-playground";

/// Environment variable naming the data directory
pub const ENV_STORAGE_DATA: &str = "PLAYGROUND_STORAGE_DATA";

/// Environment variable naming the counter file directly
pub const ENV_COUNTER_FILE: &str = "PLAYGROUND_COUNTER_FILE";

/// Environment variable naming the activity log file
pub const ENV_CONSOLE: &str = "PLAYGROUND_CONSOLE";

// =============================================================================
// Types
// =============================================================================

/// Unresolved location settings, as supplied by the caller
#[derive(Debug, Clone, Default)]
pub struct ConfigSources {
    /// Data directory holding `counter.txt`
    pub data_dir: Option<String>,
    /// Explicit counter file (wins over `data_dir`)
    pub storage_path: Option<String>,
    /// Activity log file
    pub log_path: Option<String>,
}

impl ConfigSources {
    /// Read the `PLAYGROUND_*` environment variables.
    pub fn from_env() -> Self {
        Self {
            data_dir: std::env::var(ENV_STORAGE_DATA).ok(),
            storage_path: std::env::var(ENV_COUNTER_FILE).ok(),
            log_path: std::env::var(ENV_CONSOLE).ok(),
        }
    }

    /// Fill every unset field from `fallback`.
    pub fn or(self, fallback: ConfigSources) -> Self {
        Self {
            data_dir: non_empty(self.data_dir).or(non_empty(fallback.data_dir)),
            storage_path: non_empty(self.storage_path).or(non_empty(fallback.storage_path)),
            log_path: non_empty(self.log_path).or(non_empty(fallback.log_path)),
        }
    }
}

/// Resolved application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppConfig {
    /// Counter file
    pub storage_path: PathBuf,
    /// Activity log file; `None` disables the log viewer
    pub log_path: Option<PathBuf>,
}

impl AppConfig {
    /// Resolve locations, expanding a leading `~`. Everything else in a
    /// location string is taken literally.
    pub fn resolve(sources: ConfigSources) -> Self {
        let storage_path = match non_empty(sources.storage_path) {
            Some(path) => expand(&path),
            None => {
                let dir = non_empty(sources.data_dir).unwrap_or_else(|| DATA_DIR_DEFAULT.to_string());
                expand(&dir).join(COUNTER_FILE_NAME)
            }
        };

        let log_path = non_empty(sources.log_path).map(|path| expand(&path));

        Self {
            storage_path,
            log_path,
        }
    }

    /// Create the directory that will hold the counter file.
    pub fn ensure_dirs(&self) -> Result<(), ConfigError> {
        if let Some(dir) = self.data_dir() {
            std::fs::create_dir_all(dir).map_err(|source| ConfigError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
        }
        Ok(())
    }

    /// Directory holding the counter file, if the path names one
    pub fn data_dir(&self) -> Option<&Path> {
        self.storage_path
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn expand(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).as_ref())
}

// =============================================================================
// Errors
// =============================================================================

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to create directory {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

// =============================================================================
// Tests
// =============================================================================
