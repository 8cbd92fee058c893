//! Departure candidate assembly.
//!
//! Joins the four schedule entities for one stop and date: resolve the
//! active services, narrow to candidate trips (optionally constrained to
//! a route set), pull the stop's departure rows for those trips, then
//! attach route and headsign data to each row.

use std::collections::HashMap;

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::domain::{RouteId, StopId, TripId};
use crate::store::{ScheduleStore, StoreError};

use super::resolver::CalendarResolver;

/// Error from schedule assembly.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ScheduleError {
    /// The requested stop does not exist
    #[error("no stop with id {0}")]
    StopNotFound(StopId),

    /// The store failed
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// One unordered departure: a stop time joined to its trip and route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepartureCandidate {
    pub route_id: RouteId,
    pub route_short_name: String,
    pub trip_id: TripId,
    pub headsign: Option<String>,
    /// Raw departure time, parsed only when departures are ordered.
    pub departure_time: String,
}

/// Assembles departure candidates for a stop on a date.
pub struct ScheduleAssembler<'a, S: ScheduleStore> {
    store: &'a S,
}

impl<'a, S: ScheduleStore> ScheduleAssembler<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Collect the stop's departure candidates for `date`.
    ///
    /// An empty `route_filter` means no route constraint. A non-empty
    /// filter is narrowed to the routes that actually exist, so unknown
    /// ids simply drop out; a filter matching nothing yields an empty
    /// schedule rather than an error.
    ///
    /// Joins are defensive: a stop time whose trip is missing, or a trip
    /// whose route is missing, drops that row with a warning instead of
    /// failing the request.
    pub async fn build_departures(
        &self,
        stop_id: &StopId,
        date: NaiveDate,
        route_filter: &[RouteId],
    ) -> Result<Vec<DepartureCandidate>, ScheduleError> {
        let resolver = CalendarResolver::new(self.store);
        let (stop, active) = futures::try_join!(
            self.store.stop_by_id(stop_id),
            resolver.active_service_ids(date)
        )?;
        if stop.is_none() {
            return Err(ScheduleError::StopNotFound(stop_id.clone()));
        }
        if active.is_empty() {
            debug!(%date, "no services active, schedule is empty");
            return Ok(Vec::new());
        }

        let routes = if route_filter.is_empty() {
            self.store.routes().await?
        } else {
            self.store.routes_by_ids(route_filter).await?
        };
        let route_constraint: Option<Vec<RouteId>> = if route_filter.is_empty() {
            None
        } else {
            Some(routes.iter().map(|r| r.route_id.clone()).collect())
        };

        let trips = self
            .store
            .trips_for_services(&active, route_constraint.as_deref())
            .await?;
        if trips.is_empty() {
            return Ok(Vec::new());
        }

        let trip_ids: Vec<TripId> = trips.iter().map(|t| t.trip_id.clone()).collect();
        let stop_times = self.store.stop_times_at(stop_id, &trip_ids).await?;

        let routes_by_id: HashMap<_, _> = routes.iter().map(|r| (&r.route_id, r)).collect();
        let trips_by_id: HashMap<_, _> = trips.iter().map(|t| (&t.trip_id, t)).collect();

        let mut candidates = Vec::with_capacity(stop_times.len());
        for stop_time in &stop_times {
            let Some(trip) = trips_by_id.get(&stop_time.trip_id) else {
                warn!(
                    trip_id = %stop_time.trip_id,
                    "stop time references unknown trip, dropping"
                );
                continue;
            };
            let Some(route) = routes_by_id.get(&trip.route_id) else {
                warn!(
                    route_id = %trip.route_id,
                    trip_id = %trip.trip_id,
                    "trip references unknown route, dropping"
                );
                continue;
            };

            candidates.push(DepartureCandidate {
                route_id: route.route_id.clone(),
                route_short_name: route.short_name.clone(),
                trip_id: trip.trip_id.clone(),
                headsign: trip.headsign.clone(),
                departure_time: stop_time.departure_time.clone(),
            });
        }

        debug!(
            stop = %stop_id,
            %date,
            candidates = candidates.len(),
            "assembled departure candidates"
        );

        Ok(candidates)
    }
}
