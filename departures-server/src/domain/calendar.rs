//! Weekly service calendars and date exceptions.
//!
//! A calendar row gives a service a weekly pattern over an inclusive date
//! range. Exception rows then add or remove single dates, which is how
//! feeds express holidays and one-off timetables.

use chrono::{Datelike, NaiveDate, Weekday};

use super::ids::ServiceId;

/// The set of weekdays a service runs on, packed as a seven-bit field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Weekdays(u8);

impl Weekdays {
    /// No days set.
    pub const NONE: Self = Self(0);

    /// Build from the seven GTFS day flags, Monday first.
    #[allow(clippy::too_many_arguments)]
    pub fn from_flags(
        monday: bool,
        tuesday: bool,
        wednesday: bool,
        thursday: bool,
        friday: bool,
        saturday: bool,
        sunday: bool,
    ) -> Self {
        let days = [
            monday, tuesday, wednesday, thursday, friday, saturday, sunday,
        ];
        let mut bits = 0u8;
        for (i, &set) in days.iter().enumerate() {
            if set {
                bits |= 1 << i;
            }
        }
        Self(bits)
    }

    /// Whether the given weekday is set.
    pub fn contains(self, day: Weekday) -> bool {
        self.0 & (1 << day.num_days_from_monday()) != 0
    }
}

/// A weekly service pattern over an inclusive date range.
///
/// # Examples
///
/// ```
/// use departures_server::domain::{Calendar, ServiceId, Weekdays};
/// use chrono::NaiveDate;
///
/// let weekday = Calendar {
///     service_id: ServiceId::new("WEEKDAY"),
///     weekdays: Weekdays::from_flags(true, true, true, true, true, false, false),
///     start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
///     end_date: NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
/// };
///
/// // 2024-07-04 is a Thursday inside the range
/// assert!(weekday.active_on(NaiveDate::from_ymd_opt(2024, 7, 4).unwrap()));
/// // 2024-07-06 is a Saturday
/// assert!(!weekday.active_on(NaiveDate::from_ymd_opt(2024, 7, 6).unwrap()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Calendar {
    pub service_id: ServiceId,
    pub weekdays: Weekdays,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl Calendar {
    /// Whether this calendar's weekly pattern covers `date`.
    ///
    /// Both range endpoints are inclusive.
    pub fn active_on(&self, date: NaiveDate) -> bool {
        self.weekdays.contains(date.weekday())
            && self.start_date <= date
            && date <= self.end_date
    }
}

/// Whether an exception row adds or removes service on its date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExceptionType {
    Added,
    Removed,
}

impl ExceptionType {
    /// Map a GTFS `exception_type` code. Codes other than 1 and 2 have no
    /// meaning and yield `None`.
    pub fn from_gtfs(code: u32) -> Option<Self> {
        match code {
            1 => Some(Self::Added),
            2 => Some(Self::Removed),
            _ => None,
        }
    }
}

/// A single-date exception to a service's weekly pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarDate {
    pub service_id: ServiceId,
    pub date: NaiveDate,
    pub exception_type: ExceptionType,
}
