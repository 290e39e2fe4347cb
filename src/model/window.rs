use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Source of the current local wall-clock time.
pub trait Clock {
    /// Returns the current local time.
    fn now(&self) -> NaiveDateTime;
}

/// Reads the system clock in the local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// Local-time window during which the form accepts reports.
///
/// Both ends are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    /// First instant the form is open.
    pub start: NaiveDateTime,
    /// Last instant the form is open.
    pub end: NaiveDateTime,
}

impl TimeWindow {
    /// Creates a window from its two bounds.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    /// Returns `true` if `at` lies within the window.
    pub fn contains(&self, at: NaiveDateTime) -> bool {
        self.start <= at && at <= self.end
    }

    /// Returns `true` if the end does not precede the start.
    pub fn is_well_formed(&self) -> bool {
        self.start <= self.end
    }

    /// The notice shown in place of the form outside the window.
    pub fn closed_notice(&self) -> String {
        format!(
            "Das Formular ist derzeit offline.\nEs ist verfügbar vom\n{} bis {}.",
            format_de(self.start),
            format_de(self.end)
        )
    }
}

/// Formats a timestamp the way German locales print date and time,
/// e.g. `1.10.2025, 08:00:00`.
pub fn format_de(at: NaiveDateTime) -> String {
    at.format("%-d.%-m.%Y, %H:%M:%S").to_string()
}
