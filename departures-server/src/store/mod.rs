//! Schedule store capability.
//!
//! The resolver and assembler only ever read, and only with equality or
//! set-membership filters, so the store surface is a small trait rather
//! than a query language. Key characteristics:
//!
//! - every method is implicitly scoped to one agency's records
//! - by-id lookups return `Ok(None)` for missing rows; `Err` is reserved
//!   for operational failure
//! - malformed rows are dropped with a warning when a snapshot is loaded,
//!   so consumers only ever see validated domain values

use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::domain::{
    Calendar, CalendarDate, Route, RouteId, ServiceId, Stop, StopId, StopTime, Trip, TripId,
};

mod error;
mod handle;
mod memory;
mod records;

pub use error::StoreError;
pub use handle::{Connector, HandleConfig, StoreHandle};
pub use memory::{FixtureConnector, MemoryStore};
pub use records::{
    CalendarDateRecord, CalendarRecord, RouteRecord, StopRecord, StopTimeRecord, TripRecord,
};

/// Read access to one agency's schedule snapshot.
#[allow(async_fn_in_trait)]
pub trait ScheduleStore {
    /// All weekly calendars.
    async fn calendars(&self) -> Result<Vec<Calendar>, StoreError>;

    /// Calendar exceptions falling on the given date.
    async fn calendar_dates_on(&self, date: NaiveDate) -> Result<Vec<CalendarDate>, StoreError>;

    /// Look up a stop by its feed-internal id.
    async fn stop_by_id(&self, stop_id: &StopId) -> Result<Option<Stop>, StoreError>;

    /// Look up a stop by its rider-facing code.
    async fn stop_by_code(&self, code: &str) -> Result<Option<Stop>, StoreError>;

    /// All stops.
    async fn stops(&self) -> Result<Vec<Stop>, StoreError>;

    /// All routes.
    async fn routes(&self) -> Result<Vec<Route>, StoreError>;

    /// Routes whose ids appear in `ids`. Ids matching nothing are absent
    /// from the result, not an error.
    async fn routes_by_ids(&self, ids: &[RouteId]) -> Result<Vec<Route>, StoreError>;

    /// Trips whose service is active, optionally constrained to a route set.
    /// `None` means the route constraint is absent.
    async fn trips_for_services(
        &self,
        services: &BTreeSet<ServiceId>,
        routes: Option<&[RouteId]>,
    ) -> Result<Vec<Trip>, StoreError>;

    /// Stop times at one stop, constrained to the given trips.
    async fn stop_times_at(
        &self,
        stop_id: &StopId,
        trips: &[TripId],
    ) -> Result<Vec<StopTime>, StoreError>;
}
