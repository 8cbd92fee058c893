//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{Route, Stop};
use crate::schedule::Departure;

/// Query parameters for the stop schedule endpoint.
#[derive(Debug, Deserialize)]
pub struct ScheduleRequest {
    /// Stop id to look up
    pub stop: Option<String>,

    /// Rider-facing stop code, accepted in place of `stop`
    pub stop_code: Option<String>,

    /// Comma-separated route ids; absent means all routes
    pub routes: Option<String>,

    /// Service date in YYYY-MM-DD format
    pub date: String,
}

/// A stop in listing results.
#[derive(Debug, Serialize)]
pub struct StopResult {
    /// Stop id
    pub stop_id: String,

    /// Rider-facing stop code, where the feed provides one
    pub stop_code: Option<String>,
}

/// Response for the stop listing.
#[derive(Debug, Serialize)]
pub struct StopsResponse {
    /// Every stop in the snapshot
    pub stops: Vec<StopResult>,
}

/// A route in listing results.
#[derive(Debug, Serialize)]
pub struct RouteResult {
    /// Route id
    pub route_id: String,

    /// Rider-facing route name (e.g., "60")
    pub route_name: String,
}

/// Response for the route listing.
#[derive(Debug, Serialize)]
pub struct RoutesResponse {
    /// Every route in the snapshot
    pub routes: Vec<RouteResult>,
}

/// A departure on the schedule board.
#[derive(Debug, Serialize)]
pub struct DepartureResult {
    /// Route id
    pub route_id: String,

    /// Rider-facing route name
    pub route_name: String,

    /// Destination shown on the vehicle, where the feed provides one
    pub headsign: Option<String>,

    /// Departure time; hours run past 23 on trips that cross midnight
    pub time: String,

    /// Seconds since the previous departure; null for the first
    pub spacing_seconds: Option<i64>,
}

/// Response for the stop schedule endpoint.
#[derive(Debug, Serialize)]
pub struct ScheduleResponse {
    /// Stop the board was built for
    pub stop_id: String,

    /// Service date the board was built for
    pub date: String,

    /// Departures in board order
    pub departures: Vec<DepartureResult>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

// Conversion implementations

impl StopResult {
    /// Create from a domain Stop.
    pub fn from_stop(stop: &Stop) -> Self {
        Self {
            stop_id: stop.stop_id.to_string(),
            stop_code: stop.stop_code.clone(),
        }
    }
}

impl RouteResult {
    /// Create from a domain Route.
    pub fn from_route(route: &Route) -> Self {
        Self {
            route_id: route.route_id.to_string(),
            route_name: route.short_name.clone(),
        }
    }
}

impl DepartureResult {
    /// Create from a sequenced Departure.
    pub fn from_departure(departure: &Departure) -> Self {
        Self {
            route_id: departure.route_id.to_string(),
            route_name: departure.route_short_name.clone(),
            headsign: departure.headsign.clone(),
            time: departure.time_of_day.to_string(),
            spacing_seconds: departure.spacing_seconds,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RouteId, ServiceDayTime, StopId, TripId};

    #[test]
    fn stop_result_from_stop() {
        let stop = Stop {
            stop_id: StopId::from("market"),
            stop_code: Some("2167".to_string()),
        };
        let result = StopResult::from_stop(&stop);

        assert_eq!(result.stop_id, "market");
        assert_eq!(result.stop_code, Some("2167".to_string()));
    }

    #[test]
    fn route_result_from_route() {
        let route = Route {
            route_id: RouteId::from("60"),
            short_name: "60".to_string(),
        };
        let result = RouteResult::from_route(&route);

        assert_eq!(result.route_id, "60");
        assert_eq!(result.route_name, "60");
    }

    #[test]
    fn ids_serialize_as_plain_strings() {
        let route = Route {
            route_id: RouteId::new("60"),
            short_name: "60".to_string(),
        };
        let value = serde_json::to_value(RouteResult::from_route(&route)).unwrap();

        assert_eq!(value["route_id"], "60");
    }

    #[test]
    fn departure_result_keeps_elapsed_hours() {
        let departure = Departure {
            route_id: RouteId::from("11"),
            route_short_name: "11".to_string(),
            trip_id: TripId::from("11-2410"),
            headsign: Some("Airport".to_string()),
            time_of_day: ServiceDayTime::parse("24:10:00").unwrap(),
            spacing_seconds: Some(1200),
        };
        let result = DepartureResult::from_departure(&departure);

        assert_eq!(result.time, "24:10:00");
        assert_eq!(result.spacing_seconds, Some(1200));
        assert_eq!(result.headsign, Some("Airport".to_string()));
    }

    #[test]
    fn first_departure_serializes_null_spacing() {
        let departure = Departure {
            route_id: RouteId::from("60"),
            route_short_name: "60".to_string(),
            trip_id: TripId::from("60-0800"),
            headsign: None,
            time_of_day: ServiceDayTime::parse("08:00:00").unwrap(),
            spacing_seconds: None,
        };
        let value =
            serde_json::to_value(DepartureResult::from_departure(&departure)).unwrap();

        assert_eq!(value["spacing_seconds"], serde_json::Value::Null);
        assert_eq!(value["headsign"], serde_json::Value::Null);
        assert_eq!(value["time"], "08:00:00");
    }
}
