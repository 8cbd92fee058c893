//! Service-day time handling.
//!
//! GTFS departure times are measured from midnight of the service day, not
//! from the wall clock. A trip that leaves after midnight on a service that
//! started the previous day is written with an hour of 24 or more, e.g.
//! "25:07:00" for 01:07 the next morning. This module provides a duration
//! type that keeps that convention: values order and subtract as elapsed
//! time, and format back in the same over-24h notation they arrived in.

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

/// Elapsed time since midnight of the service day.
///
/// Unlike a wall-clock time, the hours component is unbounded above:
/// "24:10:00" is a valid departure ten minutes after the service-day
/// midnight boundary and sorts after "23:50:00", 1200 seconds later.
/// Minutes and seconds are conventional (0-59).
///
/// # Examples
///
/// ```
/// use departures_server::domain::ServiceDayTime;
///
/// let early = ServiceDayTime::parse("23:50:00").unwrap();
/// let late = ServiceDayTime::parse("24:10:00").unwrap();
///
/// assert!(early < late);
/// assert_eq!(late.seconds_since(early), 1200);
/// assert_eq!(late.to_string(), "24:10:00");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ServiceDayTime {
    total_seconds: u32,
}

impl ServiceDayTime {
    /// Parse a time from "H:MM:SS" or "HH:MM:SS" format.
    ///
    /// The hours field may be a single digit (feeds commonly write
    /// "8:30:00") and may exceed 23 for departures past the service-day
    /// midnight. Minutes and seconds must be exactly two digits in 0-59.
    ///
    /// # Examples
    ///
    /// ```
    /// use departures_server::domain::ServiceDayTime;
    ///
    /// assert!(ServiceDayTime::parse("08:30:00").is_ok());
    /// assert!(ServiceDayTime::parse("8:30:00").is_ok());
    /// assert!(ServiceDayTime::parse("48:00:00").is_ok());
    ///
    /// assert!(ServiceDayTime::parse("08:30").is_err());
    /// assert!(ServiceDayTime::parse("08:61:00").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, TimeError> {
        let mut fields = s.split(':');

        let hours = fields.next().ok_or_else(|| TimeError::new("empty input"))?;
        let minutes = fields
            .next()
            .ok_or_else(|| TimeError::new("expected H:MM:SS format"))?;
        let seconds = fields
            .next()
            .ok_or_else(|| TimeError::new("expected H:MM:SS format"))?;
        if fields.next().is_some() {
            return Err(TimeError::new("expected exactly three fields"));
        }

        if hours.is_empty() || !hours.bytes().all(|b| b.is_ascii_digit()) {
            return Err(TimeError::new("invalid hour digits"));
        }
        let hours: u32 = hours
            .parse()
            .map_err(|_| TimeError::new("hour out of range"))?;

        let minutes =
            parse_two_digits(minutes).ok_or_else(|| TimeError::new("invalid minute digits"))?;
        if minutes > 59 {
            return Err(TimeError::new("minute must be 0-59"));
        }

        let seconds =
            parse_two_digits(seconds).ok_or_else(|| TimeError::new("invalid second digits"))?;
        if seconds > 59 {
            return Err(TimeError::new("second must be 0-59"));
        }

        let total_seconds = hours
            .checked_mul(3600)
            .and_then(|h| h.checked_add(minutes * 60 + seconds))
            .ok_or_else(|| TimeError::new("time out of range"))?;

        Ok(Self { total_seconds })
    }

    /// Construct directly from a second count.
    pub fn from_total_seconds(total_seconds: u32) -> Self {
        Self { total_seconds }
    }

    /// Total seconds since service-day midnight.
    pub fn total_seconds(&self) -> u32 {
        self.total_seconds
    }

    /// Returns the hours component. May be 24 or greater.
    pub fn hours(&self) -> u32 {
        self.total_seconds / 3600
    }

    /// Returns the minutes component (0-59).
    pub fn minutes(&self) -> u32 {
        self.total_seconds / 60 % 60
    }

    /// Returns the seconds component (0-59).
    pub fn seconds(&self) -> u32 {
        self.total_seconds % 60
    }

    /// Signed seconds elapsed from `other` to `self`.
    ///
    /// Negative when `other` is later. No midnight wrapping is applied:
    /// both values live on the same service-day axis.
    pub fn seconds_since(&self, other: Self) -> i64 {
        i64::from(self.total_seconds) - i64::from(other.total_seconds)
    }
}

impl fmt::Debug for ServiceDayTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ServiceDayTime({self})")
    }
}

impl fmt::Display for ServiceDayTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}",
            self.hours(),
            self.minutes(),
            self.seconds()
        )
    }
}

/// Parse exactly two ASCII digit bytes into a u32.
fn parse_two_digits(s: &str) -> Option<u32> {
    let bytes = s.as_bytes();
    if bytes.len() != 2 {
        return None;
    }
    let d1 = (bytes[0] as char).to_digit(10)?;
    let d2 = (bytes[1] as char).to_digit(10)?;
    Some(d1 * 10 + d2)
}
