//! Raw stored rows and their conversion to domain values.
//!
//! Snapshots keep GTFS fields the way feeds write them: day flags as 0/1
//! integers, dates as YYYYMMDD integers, exception types as integer codes.
//! Conversion validates each row in isolation. A bad row is dropped with a
//! warning and never fails the load; one ragged record should not take a
//! whole agency's schedule offline.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::{
    Calendar, CalendarDate, ExceptionType, Route, RouteId, ServiceId, Stop, StopId, StopTime,
    Trip, TripId, Weekdays,
};

/// Parse a YYYYMMDD integer into a date.
fn parse_gtfs_date(value: u32) -> Option<NaiveDate> {
    let year = (value / 10_000) as i32;
    let month = value / 100 % 100;
    let day = value % 100;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// A stored weekly calendar row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarRecord {
    #[serde(default)]
    pub agency_key: String,
    #[serde(default)]
    pub service_id: String,
    #[serde(default)]
    pub monday: u8,
    #[serde(default)]
    pub tuesday: u8,
    #[serde(default)]
    pub wednesday: u8,
    #[serde(default)]
    pub thursday: u8,
    #[serde(default)]
    pub friday: u8,
    #[serde(default)]
    pub saturday: u8,
    #[serde(default)]
    pub sunday: u8,
    pub start_date: u32,
    pub end_date: u32,
}

impl CalendarRecord {
    /// Validate into a domain calendar. Returns `None` for rows with an
    /// empty service id, unparsable dates, or an inverted date range.
    pub fn into_calendar(self) -> Option<Calendar> {
        if self.service_id.is_empty() {
            warn!("calendar row with empty service_id, dropping");
            return None;
        }
        let Some(start_date) = parse_gtfs_date(self.start_date) else {
            warn!(
                service_id = %self.service_id,
                start_date = self.start_date,
                "calendar row with unparsable start_date, dropping"
            );
            return None;
        };
        let Some(end_date) = parse_gtfs_date(self.end_date) else {
            warn!(
                service_id = %self.service_id,
                end_date = self.end_date,
                "calendar row with unparsable end_date, dropping"
            );
            return None;
        };
        if start_date > end_date {
            warn!(
                service_id = %self.service_id,
                "calendar row with start_date after end_date, dropping"
            );
            return None;
        }

        Some(Calendar {
            service_id: ServiceId::new(self.service_id),
            weekdays: Weekdays::from_flags(
                self.monday == 1,
                self.tuesday == 1,
                self.wednesday == 1,
                self.thursday == 1,
                self.friday == 1,
                self.saturday == 1,
                self.sunday == 1,
            ),
            start_date,
            end_date,
        })
    }
}

/// A stored calendar exception row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarDateRecord {
    #[serde(default)]
    pub agency_key: String,
    #[serde(default)]
    pub service_id: String,
    pub date: u32,
    pub exception_type: u32,
}

impl CalendarDateRecord {
    /// Validate into a domain exception. Codes other than 1 (added) and
    /// 2 (removed) drop the row.
    pub fn into_calendar_date(self) -> Option<CalendarDate> {
        if self.service_id.is_empty() {
            warn!("calendar_date row with empty service_id, dropping");
            return None;
        }
        let Some(date) = parse_gtfs_date(self.date) else {
            warn!(
                service_id = %self.service_id,
                date = self.date,
                "calendar_date row with unparsable date, dropping"
            );
            return None;
        };
        let Some(exception_type) = ExceptionType::from_gtfs(self.exception_type) else {
            warn!(
                service_id = %self.service_id,
                exception_type = self.exception_type,
                "calendar_date row with unknown exception_type, dropping"
            );
            return None;
        };

        Some(CalendarDate {
            service_id: ServiceId::new(self.service_id),
            date,
            exception_type,
        })
    }
}

/// A stored route row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteRecord {
    #[serde(default)]
    pub agency_key: String,
    #[serde(default)]
    pub route_id: String,
    pub route_short_name: String,
}

impl RouteRecord {
    pub fn into_route(self) -> Option<Route> {
        if self.route_id.is_empty() {
            warn!("route row with empty route_id, dropping");
            return None;
        }
        Some(Route {
            route_id: RouteId::new(self.route_id),
            short_name: self.route_short_name,
        })
    }
}

/// A stored trip row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripRecord {
    #[serde(default)]
    pub agency_key: String,
    #[serde(default)]
    pub trip_id: String,
    #[serde(default)]
    pub route_id: String,
    #[serde(default)]
    pub service_id: String,
    #[serde(default)]
    pub trip_headsign: Option<String>,
}

impl TripRecord {
    /// Validate into a domain trip. The join keys must all be non-empty;
    /// a blank headsign becomes `None`.
    pub fn into_trip(self) -> Option<Trip> {
        if self.trip_id.is_empty() || self.route_id.is_empty() || self.service_id.is_empty() {
            warn!(
                trip_id = %self.trip_id,
                "trip row with empty id field, dropping"
            );
            return None;
        }
        Some(Trip {
            trip_id: TripId::new(self.trip_id),
            route_id: RouteId::new(self.route_id),
            service_id: ServiceId::new(self.service_id),
            headsign: self.trip_headsign.filter(|h| !h.is_empty()),
        })
    }
}

/// A stored stop time row.
///
/// The departure time is carried as-is. Whether it parses only matters at
/// sequencing time, and a bad time there drops one departure rather than
/// one stored row's whole trip.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StopTimeRecord {
    #[serde(default)]
    pub agency_key: String,
    #[serde(default)]
    pub trip_id: String,
    #[serde(default)]
    pub stop_id: String,
    #[serde(default)]
    pub departure_time: String,
}

impl StopTimeRecord {
    pub fn into_stop_time(self) -> Option<StopTime> {
        if self.trip_id.is_empty() || self.stop_id.is_empty() {
            warn!("stop_time row with empty id field, dropping");
            return None;
        }
        Some(StopTime {
            trip_id: TripId::new(self.trip_id),
            stop_id: StopId::new(self.stop_id),
            departure_time: self.departure_time,
        })
    }
}

/// A stored stop row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StopRecord {
    #[serde(default)]
    pub agency_key: String,
    #[serde(default)]
    pub stop_id: String,
    #[serde(default)]
    pub stop_code: Option<String>,
}

impl StopRecord {
    pub fn into_stop(self) -> Option<Stop> {
        if self.stop_id.is_empty() {
            warn!("stop row with empty stop_id, dropping");
            return None;
        }
        Some(Stop {
            stop_id: StopId::new(self.stop_id),
            stop_code: self.stop_code.filter(|c| !c.is_empty()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn calendar_record() -> CalendarRecord {
        CalendarRecord {
            agency_key: "metro".into(),
            service_id: "WEEKDAY".into(),
            monday: 1,
            tuesday: 1,
            wednesday: 1,
            thursday: 1,
            friday: 1,
            saturday: 0,
            sunday: 0,
            start_date: 2024_01_01,
            end_date: 2024_12_31,
        }
    }

    #[test]
    fn calendar_converts() {
        let cal = calendar_record().into_calendar().unwrap();

        assert_eq!(cal.service_id.as_str(), "WEEKDAY");
        assert!(cal.weekdays.contains(Weekday::Mon));
        assert!(cal.weekdays.contains(Weekday::Fri));
        assert!(!cal.weekdays.contains(Weekday::Sat));
        assert_eq!(
            cal.start_date,
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
        );
        assert_eq!(
            cal.end_date,
            NaiveDate::from_ymd_opt(2024, 12, 31).unwrap()
        );
    }

    #[test]
    fn calendar_empty_service_id_dropped() {
        let mut rec = calendar_record();
        rec.service_id = String::new();
        assert!(rec.into_calendar().is_none());
    }

    #[test]
    fn calendar_missing_service_id_field_dropped() {
        // Missing fields with defaults come back empty and drop the row
        let rec: CalendarRecord = serde_json::from_str(
            r#"{"agency_key": "metro", "start_date": 20240101, "end_date": 20241231}"#,
        )
        .unwrap();
        assert!(rec.into_calendar().is_none());
    }

    #[test]
    fn calendar_bad_dates_dropped() {
        let mut rec = calendar_record();
        rec.start_date = 2024_13_40;
        assert!(rec.into_calendar().is_none());

        let mut rec = calendar_record();
        rec.end_date = 0;
        assert!(rec.into_calendar().is_none());
    }

    #[test]
    fn calendar_inverted_range_dropped() {
        let mut rec = calendar_record();
        rec.start_date = 2024_12_31;
        rec.end_date = 2024_01_01;
        assert!(rec.into_calendar().is_none());
    }

    #[test]
    fn calendar_nonstandard_flag_values_unset() {
        let mut rec = calendar_record();
        rec.monday = 7;
        let cal = rec.into_calendar().unwrap();
        assert!(!cal.weekdays.contains(Weekday::Mon));
        assert!(cal.weekdays.contains(Weekday::Tue));
    }

    #[test]
    fn calendar_date_converts() {
        let rec = CalendarDateRecord {
            agency_key: "metro".into(),
            service_id: "HOLIDAY".into(),
            date: 2024_07_04,
            exception_type: 1,
        };
        let ex = rec.into_calendar_date().unwrap();

        assert_eq!(ex.service_id.as_str(), "HOLIDAY");
        assert_eq!(ex.date, NaiveDate::from_ymd_opt(2024, 7, 4).unwrap());
        assert_eq!(ex.exception_type, ExceptionType::Added);
    }

    #[test]
    fn calendar_date_unknown_code_dropped() {
        for code in [0, 3, 99] {
            let rec = CalendarDateRecord {
                agency_key: "metro".into(),
                service_id: "HOLIDAY".into(),
                date: 2024_07_04,
                exception_type: code,
            };
            assert!(rec.into_calendar_date().is_none());
        }
    }

    #[test]
    fn calendar_date_bad_date_dropped() {
        let rec = CalendarDateRecord {
            agency_key: "metro".into(),
            service_id: "HOLIDAY".into(),
            date: 2024_02_30,
            exception_type: 2,
        };
        assert!(rec.into_calendar_date().is_none());
    }

    #[test]
    fn trip_blank_headsign_becomes_none() {
        let rec = TripRecord {
            agency_key: "metro".into(),
            trip_id: "t1".into(),
            route_id: "r1".into(),
            service_id: "WEEKDAY".into(),
            trip_headsign: Some(String::new()),
        };
        assert_eq!(rec.into_trip().unwrap().headsign, None);

        let rec: TripRecord = serde_json::from_str(
            r#"{"agency_key": "metro", "trip_id": "t1", "route_id": "r1", "service_id": "WEEKDAY"}"#,
        )
        .unwrap();
        assert_eq!(rec.into_trip().unwrap().headsign, None);
    }

    #[test]
    fn trip_empty_keys_dropped() {
        let rec = TripRecord {
            agency_key: "metro".into(),
            trip_id: "t1".into(),
            route_id: "r1".into(),
            service_id: String::new(),
            trip_headsign: None,
        };
        assert!(rec.into_trip().is_none());
    }

    #[test]
    fn route_empty_id_dropped() {
        let rec = RouteRecord {
            agency_key: "metro".into(),
            route_id: String::new(),
            route_short_name: "60".into(),
        };
        assert!(rec.into_route().is_none());
    }

    #[test]
    fn stop_blank_code_becomes_none() {
        let rec = StopRecord {
            agency_key: "metro".into(),
            stop_id: "2167".into(),
            stop_code: Some(String::new()),
        };
        assert_eq!(rec.into_stop().unwrap().stop_code, None);
    }

    #[test]
    fn stop_time_keeps_raw_departure_time() {
        // Hours past 23 and even junk pass through; time validation
        // happens at sequencing
        let rec = StopTimeRecord {
            agency_key: "metro".into(),
            trip_id: "t1".into(),
            stop_id: "2167".into(),
            departure_time: "25:07:00".into(),
        };
        assert_eq!(rec.into_stop_time().unwrap().departure_time, "25:07:00");

        let rec = StopTimeRecord {
            agency_key: "metro".into(),
            trip_id: "t1".into(),
            stop_id: "2167".into(),
            departure_time: "not a time".into(),
        };
        assert!(rec.into_stop_time().is_some());
    }

    #[test]
    fn unknown_fields_ignored() {
        // Stored rows carry extra feed fields; loads must not choke on them
        let rec: StopRecord = serde_json::from_str(
            r#"{"agency_key": "metro", "stop_id": "2167", "stop_lat": 45.5, "_id": "abc"}"#,
        )
        .unwrap();
        assert!(rec.into_stop().is_some());
    }
}
