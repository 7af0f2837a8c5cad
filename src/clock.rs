//! Clock - Timestamps for Log Events
//!
//! TigerStyle: All time reads go through an injectable interface.
//!
//! Production code uses [`SystemClock`] (local wall-clock time). Tests use
//! [`ManualClock`], which only moves when told to, so log lines are
//! reproducible.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use std::cell::Cell;

// =============================================================================
// TigerStyle Constants
// =============================================================================

/// Maximum single advance of a manual clock, in seconds (one day)
pub const MANUAL_CLOCK_ADVANCE_SECS_MAX: i64 = 86_400;

// =============================================================================
// Clock Trait
// =============================================================================

/// Source of the current local time.
pub trait Clock {
    /// Current local date and time.
    fn now(&self) -> NaiveDateTime;
}

/// Wall-clock time in the local timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        chrono::Local::now().naive_local()
    }
}

// =============================================================================
// Manual Clock
// =============================================================================

/// A clock that is advanced explicitly.
///
/// TigerStyle:
/// - Time only moves forward
/// - No reliance on system time
#[derive(Debug, Clone)]
pub struct ManualClock {
    current: Cell<NaiveDateTime>,
}

impl ManualClock {
    /// Create a clock frozen at the given instant.
    #[must_use]
    pub fn at(start: NaiveDateTime) -> Self {
        Self {
            current: Cell::new(start),
        }
    }

    /// Advance time by the given number of seconds.
    ///
    /// # Panics
    /// Panics if `secs` is negative or exceeds `MANUAL_CLOCK_ADVANCE_SECS_MAX`.
    pub fn advance_secs(&self, secs: i64) -> NaiveDateTime {
        assert!(secs >= 0, "cannot advance time backwards: {}", secs);
        assert!(
            secs <= MANUAL_CLOCK_ADVANCE_SECS_MAX,
            "advance_secs({}) exceeds max ({})",
            secs,
            MANUAL_CLOCK_ADVANCE_SECS_MAX
        );

        let next = self.current.get() + Duration::seconds(secs);
        self.current.set(next);
        next
    }
}

impl Default for ManualClock {
    /// 2024/01/01 00:00:00
    fn default() -> Self {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .unwrap_or_default();
        Self::at(start)
    }
}

impl Clock for ManualClock {
    fn now(&self) -> NaiveDateTime {
        self.current.get()
    }
}

impl<C: Clock + ?Sized> Clock for std::rc::Rc<C> {
    fn now(&self) -> NaiveDateTime {
        (**self).now()
    }
}
