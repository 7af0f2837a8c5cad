//! App
//!
//! TigerStyle: The command surface a front end drives.
//!
//! A renderer implements [`CounterView`] and is handed the new display text
//! after every increment. The log viewer affordance exists only when the
//! configuration names a log destination.

use crate::clock::Clock;
use crate::config::AppConfig;
use crate::counter::{CounterError, CounterObserver, CounterSnapshot, PersistentCounter};
use crate::log_sink::{LogError, LogSink};

/// A front end that shows the counter label.
pub trait CounterView {
    /// Re-render with the new label.
    fn render(&self, display_text: &str);
}

struct ViewObserver<V>(V);

impl<V: CounterView> CounterObserver for ViewObserver<V> {
    fn on_count_changed(&self, display_text: &str) {
        self.0.render(display_text);
    }
}

/// Single-screen counter application
#[derive(Debug)]
pub struct App {
    counter: PersistentCounter,
}

impl App {
    /// Open the counter described by `config`.
    pub fn new(config: &AppConfig) -> Self {
        let log = LogSink::new(config.log_path.clone());
        Self {
            counter: PersistentCounter::open(config.storage_path.clone(), log),
        }
    }

    /// Open the counter with an explicit clock for log timestamps.
    pub fn with_clock(config: &AppConfig, clock: Box<dyn Clock>) -> Self {
        let log = LogSink::new(config.log_path.clone());
        Self {
            counter: PersistentCounter::with_clock(config.storage_path.clone(), log, clock),
        }
    }

    /// Attach a renderer; it is notified on every increment.
    pub fn attach_view<V: CounterView + 'static>(&mut self, view: V) {
        self.counter.subscribe(Box::new(ViewObserver(view)));
    }

    /// Handle the "increment" command.
    pub fn on_increment_requested(&mut self) -> Result<u64, CounterError> {
        match self.counter.increment() {
            Ok(count) => Ok(count),
            Err(e) => {
                tracing::error!(error = %e, count = self.counter.count(), "Increment not persisted");
                Err(e)
            }
        }
    }

    /// Label to show
    pub fn display_text(&self) -> String {
        self.counter.current_display_text()
    }

    /// Whether to offer the log viewer
    pub fn log_viewer_available(&self) -> bool {
        self.counter.log().is_available()
    }

    /// Text for the log viewer
    pub fn show_logs(&self) -> Result<String, LogError> {
        self.counter.log().read_all()
    }

    /// Serializable state
    pub fn snapshot(&self) -> CounterSnapshot {
        self.counter.snapshot()
    }

    /// Re-render attached views with the current label.
    pub fn refresh(&self) {
        self.counter.refresh();
    }
}
