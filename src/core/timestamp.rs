//! Timestamp pattern rendering
//!
//! Log timestamps are rendered through a strftime-style pattern with one
//! reserved token, `uuu`, standing for the instant's millisecond component as
//! exactly three zero-padded digits. chrono's own `%`-specifiers handle the
//! calendar and timezone fields; `uuu` is substituted afterward, so the token
//! may sit anywhere in the pattern.

use super::error::{PipelineError, Result};
use chrono::{DateTime, Local, TimeZone};
use std::fmt;
use std::fmt::Write as _;

/// Reserved pattern token replaced by the three-digit millisecond component.
pub const MILLIS_TOKEN: &str = "uuu";

/// Default pattern: calendar date, millisecond time, UTC offset.
pub const DEFAULT_TIME_PATTERN: &str = "%Y-%m-%d %H:%M:%S.uuu%z";

/// A compiled timestamp pattern.
///
/// # Examples
///
/// ```
/// use logpipe::core::timestamp::TimePattern;
/// use chrono::{FixedOffset, TimeZone};
///
/// let pattern = TimePattern::new("%H:%M:%S.uuu");
/// let offset = FixedOffset::east_opt(0).unwrap();
/// let instant = offset.with_ymd_and_hms(2025, 1, 8, 10, 30, 45).unwrap();
/// assert_eq!(pattern.format(&instant), "10:30:45.000");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimePattern {
    pattern: String,
}

impl TimePattern {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
        }
    }

    /// Check the pattern against chrono's specifier set; an invalid `%` token
    /// is a configuration error.
    pub(crate) fn validate(&self) -> Result<()> {
        let mut probe = String::new();
        write!(probe, "{}", Local::now().format(&self.pattern)).map_err(|_| {
            PipelineError::config(
                "time_pattern",
                format!("invalid format specifier in '{}'", self.pattern),
            )
        })?;
        Ok(())
    }

    /// Render an instant. Deterministic and side-effect-free; an instant with
    /// zero milliseconds still renders `000`.
    #[must_use]
    pub fn format<Tz: TimeZone>(&self, instant: &DateTime<Tz>) -> String
    where
        Tz::Offset: fmt::Display,
    {
        let mut rendered = String::new();
        if write!(rendered, "{}", instant.format(&self.pattern)).is_err() {
            // Unvalidated pattern with a bad specifier: fall back rather than
            // propagate a panic into the producing thread.
            return instant.to_rfc3339();
        }
        // Leap-second spillover (subsecond >= 1000ms) clamps to 999.
        let millis = instant.timestamp_subsec_millis().min(999);
        rendered.replace(MILLIS_TOKEN, &format!("{:03}", millis))
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

impl Default for TimePattern {
    fn default() -> Self {
        Self::new(DEFAULT_TIME_PATTERN)
    }
}
