//! Wall-clock times for route steps.
//!
//! The catalog records step times as "HH:MM" strings with no date. All times
//! in one path are read as the same calendar day: there is no rollover
//! detection, so a path that crosses midnight yields a negative duration.

use chrono::{Duration, NaiveTime, Timelike};
use std::fmt;

/// Error returned when parsing an invalid time string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// A time of day on a 24-hour clock, minute resolution.
///
/// # Examples
///
/// ```
/// use route_matcher::domain::WallTime;
///
/// let time = WallTime::parse_hhmm("08:05").unwrap();
/// assert_eq!(time.to_string(), "08:05");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WallTime(NaiveTime);

impl WallTime {
    /// Parse a time from "HH:MM" format.
    ///
    /// Hours and minutes may each be written with one or two digits, so
    /// "8:05" is accepted alongside "08:05".
    ///
    /// # Examples
    ///
    /// ```
    /// use route_matcher::domain::WallTime;
    ///
    /// assert!(WallTime::parse_hhmm("00:00").is_ok());
    /// assert!(WallTime::parse_hhmm("23:59").is_ok());
    /// assert!(WallTime::parse_hhmm("8:05").is_ok());
    ///
    /// assert!(WallTime::parse_hhmm("0805").is_err());
    /// assert!(WallTime::parse_hhmm("24:00").is_err());
    /// assert!(WallTime::parse_hhmm("").is_err());
    /// ```
    pub fn parse_hhmm(s: &str) -> Result<Self, TimeError> {
        let (hours, minutes) = s
            .split_once(':')
            .ok_or_else(|| TimeError::new("expected HH:MM format"))?;

        let hour = parse_digits(hours).ok_or_else(|| TimeError::new("invalid hour digits"))?;
        if hour > 23 {
            return Err(TimeError::new("hour must be 0-23"));
        }

        let minute =
            parse_digits(minutes).ok_or_else(|| TimeError::new("invalid minute digits"))?;
        if minute > 59 {
            return Err(TimeError::new("minute must be 0-59"));
        }

        NaiveTime::from_hms_opt(hour, minute, 0)
            .map(Self)
            .ok_or_else(|| TimeError::new("invalid time"))
    }

    /// Returns the hour (0-23).
    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    /// Returns the minute (0-59).
    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    /// Returns the signed duration from `earlier` to `self` on the same day.
    ///
    /// Negative if `self` is before `earlier` on the clock face.
    pub fn signed_duration_since(&self, earlier: Self) -> Duration {
        self.0.signed_duration_since(earlier.0)
    }
}

impl fmt::Debug for WallTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WallTime({:02}:{:02})", self.hour(), self.minute())
    }
}

impl fmt::Display for WallTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

/// Parse one or two ASCII digits into a u32.
fn parse_digits(s: &str) -> Option<u32> {
    if s.is_empty() || s.len() > 2 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}
