use chrono::{DateTime, Utc};
use chrono_tz::Asia::Tehran;

/// Fixed display timezone; the deployment the ledger serves lives in Tehran.
const DISPLAY_FORMAT: &str = "%A %-d %B %Y %-I:%M %P";

/// A single instant captured for one mutation: the raw epoch-millis value used
/// for ordering, and the human rendering stored alongside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stamp {
    pub at: i64,
    pub display: String,
}

/// Time source for all write operations. `Fixed` exists so tests can pin the
/// instant every row receives.
#[derive(Debug, Clone, Copy)]
pub enum Clock {
    System,
    Fixed(i64),
}

impl Clock {
    pub fn system() -> Self {
        Clock::System
    }

    pub fn fixed(millis: i64) -> Self {
        Clock::Fixed(millis)
    }

    pub fn now_millis(&self) -> i64 {
        match self {
            Clock::System => Utc::now().timestamp_millis(),
            Clock::Fixed(millis) => *millis,
        }
    }

    /// Capture one stamp for a whole unit of work, so every row touched by a
    /// single mutation carries the same instant.
    pub fn stamp(&self) -> Stamp {
        let at = self.now_millis();
        Stamp {
            at,
            display: display_instant(at),
        }
    }
}

impl Default for Clock {
    fn default() -> Self {
        Clock::System
    }
}

/// Render an epoch-millis instant in the fixed display timezone.
pub fn display_instant(millis: i64) -> String {
    match DateTime::<Utc>::from_timestamp_millis(millis) {
        Some(instant) => instant
            .with_timezone(&Tehran)
            .format(DISPLAY_FORMAT)
            .to_string(),
        None => millis.to_string(),
    }
}
