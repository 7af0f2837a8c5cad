//! Storage Playground
//!
//! A tap counter whose value survives restarts, with an optional activity log.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐ increment  ┌───────────────────┐  write   ┌─────────────┐
//! │ CounterView  │ ─────────▶ │ PersistentCounter │ ───────▶ │ counter.txt │
//! │ (front end)  │ ◀───────── │                   │          └─────────────┘
//! └──────────────┘  display   └───────────────────┘
//!                                      │ READ / WRITE
//!                                      ▼
//!                               ┌─────────────┐
//!                               │   LogSink   │ ──▶ console log (optional)
//!                               └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```no_run
//! use storage_playground::{App, AppConfig, ConfigSources};
//!
//! let config = AppConfig::resolve(ConfigSources::from_env());
//! config.ensure_dirs()?;
//! let mut app = App::new(&config);
//! app.on_increment_requested()?;
//! println!("{}", app.display_text());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod app;
pub mod clock;
pub mod commands;
pub mod config;
pub mod counter;
pub mod log_sink;

pub use app::{App, CounterView};
pub use commands::CommandError;
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{AppConfig, ConfigError, ConfigSources};
pub use counter::{
    display_text, CounterError, CounterObserver, CounterSnapshot, PersistentCounter,
    COUNTER_FILE_NAME,
};
pub use log_sink::{LogAction, LogError, LogSink};

/// Application name
pub const APP_NAME: &str = "storage-playground";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
