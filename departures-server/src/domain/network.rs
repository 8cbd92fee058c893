//! Routes, trips, stop times and stops.

use super::ids::{RouteId, ServiceId, StopId, TripId};

/// A route as riders know it, e.g. bus line "60".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub route_id: RouteId,
    pub short_name: String,
}

/// One scheduled run along a route, tied to a service pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trip {
    pub trip_id: TripId,
    pub route_id: RouteId,
    pub service_id: ServiceId,
    pub headsign: Option<String>,
}

/// A trip's scheduled departure from one stop.
///
/// The departure time stays in its raw string form here. Hours in GTFS
/// feeds run past 23 for trips after the service-day midnight, so the
/// value only becomes a [`super::ServiceDayTime`] at the point where
/// departures are ordered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopTime {
    pub trip_id: TripId,
    pub stop_id: StopId,
    pub departure_time: String,
}

/// A boarding location. `stop_code` is the short rider-facing code posted
/// on signage, distinct from the feed-internal `stop_id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stop {
    pub stop_id: StopId,
    pub stop_code: Option<String>,
}
