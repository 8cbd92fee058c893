//! In-memory schedule store loaded from JSON snapshot files.
//!
//! Serves a single agency's records from per-entity files in one
//! directory (`stops.json`, `routes.json`, `trips.json`,
//! `stop_times.json`, `calendars.json`, `calendar_dates.json`). Rows for
//! other agencies are filtered out at load, so every query is already
//! agency-scoped.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::domain::{
    AgencyId, Calendar, CalendarDate, Route, RouteId, ServiceId, Stop, StopId, StopTime, Trip,
    TripId,
};

use super::ScheduleStore;
use super::error::StoreError;
use super::handle::Connector;
use super::records::{
    CalendarDateRecord, CalendarRecord, RouteRecord, StopRecord, StopTimeRecord, TripRecord,
};

/// An immutable snapshot of one agency's schedule.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    pub agency: AgencyId,
    pub calendars: Vec<Calendar>,
    pub calendar_dates: Vec<CalendarDate>,
    pub routes: Vec<Route>,
    pub trips: Vec<Trip>,
    pub stop_times: Vec<StopTime>,
    pub stops: Vec<Stop>,
}

impl MemoryStore {
    /// An empty snapshot for the given agency.
    pub fn empty(agency: AgencyId) -> Self {
        Self {
            agency,
            calendars: Vec::new(),
            calendar_dates: Vec::new(),
            routes: Vec::new(),
            trips: Vec::new(),
            stop_times: Vec::new(),
            stops: Vec::new(),
        }
    }

    /// Load a snapshot from a directory of JSON files.
    ///
    /// A missing file is an empty collection. Undecodable rows, rows that
    /// fail validation and rows belonging to other agencies are dropped;
    /// only an unreadable directory or file fails the load.
    pub fn from_dir(dir: impl AsRef<Path>, agency: AgencyId) -> Result<Self, StoreError> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(StoreError::Connection(format!(
                "snapshot directory {} not found",
                dir.display()
            )));
        }

        let key = agency.as_str().to_owned();
        let mut store = Self::empty(agency);

        store.calendars = load_rows::<CalendarRecord>(dir, "calendars.json")?
            .into_iter()
            .filter(|r| r.agency_key == key)
            .filter_map(CalendarRecord::into_calendar)
            .collect();
        store.calendar_dates = load_rows::<CalendarDateRecord>(dir, "calendar_dates.json")?
            .into_iter()
            .filter(|r| r.agency_key == key)
            .filter_map(CalendarDateRecord::into_calendar_date)
            .collect();
        store.routes = load_rows::<RouteRecord>(dir, "routes.json")?
            .into_iter()
            .filter(|r| r.agency_key == key)
            .filter_map(RouteRecord::into_route)
            .collect();
        store.trips = load_rows::<TripRecord>(dir, "trips.json")?
            .into_iter()
            .filter(|r| r.agency_key == key)
            .filter_map(TripRecord::into_trip)
            .collect();
        store.stop_times = load_rows::<StopTimeRecord>(dir, "stop_times.json")?
            .into_iter()
            .filter(|r| r.agency_key == key)
            .filter_map(StopTimeRecord::into_stop_time)
            .collect();
        store.stops = load_rows::<StopRecord>(dir, "stops.json")?
            .into_iter()
            .filter(|r| r.agency_key == key)
            .filter_map(StopRecord::into_stop)
            .collect();

        debug!(
            agency = %store.agency,
            calendars = store.calendars.len(),
            calendar_dates = store.calendar_dates.len(),
            routes = store.routes.len(),
            trips = store.trips.len(),
            stop_times = store.stop_times.len(),
            stops = store.stops.len(),
            "loaded schedule snapshot"
        );

        Ok(store)
    }
}

/// Read one snapshot file as a list of rows, dropping undecodable rows.
fn load_rows<T: DeserializeOwned>(dir: &Path, file: &str) -> Result<Vec<T>, StoreError> {
    let path = dir.join(file);
    if !path.exists() {
        debug!(file, "snapshot file missing, treating as empty");
        return Ok(Vec::new());
    }

    let json = std::fs::read_to_string(&path).map_err(|e| {
        StoreError::Connection(format!("failed to read {}: {}", path.display(), e))
    })?;
    let rows: Vec<serde_json::Value> = serde_json::from_str(&json).map_err(|e| {
        StoreError::Connection(format!("failed to parse {}: {}", path.display(), e))
    })?;

    let mut out = Vec::with_capacity(rows.len());
    for row in rows {
        match serde_json::from_value::<T>(row) {
            Ok(record) => out.push(record),
            Err(e) => warn!(file, error = %e, "undecodable row, dropping"),
        }
    }
    Ok(out)
}

impl ScheduleStore for MemoryStore {
    async fn calendars(&self) -> Result<Vec<Calendar>, StoreError> {
        Ok(self.calendars.clone())
    }

    async fn calendar_dates_on(&self, date: NaiveDate) -> Result<Vec<CalendarDate>, StoreError> {
        Ok(self
            .calendar_dates
            .iter()
            .filter(|e| e.date == date)
            .cloned()
            .collect())
    }

    async fn stop_by_id(&self, stop_id: &StopId) -> Result<Option<Stop>, StoreError> {
        Ok(self.stops.iter().find(|s| &s.stop_id == stop_id).cloned())
    }

    async fn stop_by_code(&self, code: &str) -> Result<Option<Stop>, StoreError> {
        Ok(self
            .stops
            .iter()
            .find(|s| s.stop_code.as_deref() == Some(code))
            .cloned())
    }

    async fn stops(&self) -> Result<Vec<Stop>, StoreError> {
        Ok(self.stops.clone())
    }

    async fn routes(&self) -> Result<Vec<Route>, StoreError> {
        Ok(self.routes.clone())
    }

    async fn routes_by_ids(&self, ids: &[RouteId]) -> Result<Vec<Route>, StoreError> {
        Ok(self
            .routes
            .iter()
            .filter(|r| ids.contains(&r.route_id))
            .cloned()
            .collect())
    }

    async fn trips_for_services(
        &self,
        services: &BTreeSet<ServiceId>,
        routes: Option<&[RouteId]>,
    ) -> Result<Vec<Trip>, StoreError> {
        Ok(self
            .trips
            .iter()
            .filter(|t| {
                services.contains(&t.service_id)
                    && routes.is_none_or(|rs| rs.contains(&t.route_id))
            })
            .cloned()
            .collect())
    }

    async fn stop_times_at(
        &self,
        stop_id: &StopId,
        trips: &[TripId],
    ) -> Result<Vec<StopTime>, StoreError> {
        Ok(self
            .stop_times
            .iter()
            .filter(|st| &st.stop_id == stop_id && trips.contains(&st.trip_id))
            .cloned()
            .collect())
    }
}

/// Connects by loading the snapshot directory.
#[derive(Debug, Clone)]
pub struct FixtureConnector {
    dir: PathBuf,
    agency: AgencyId,
}

impl FixtureConnector {
    pub fn new(dir: impl Into<PathBuf>, agency: AgencyId) -> Self {
        Self {
            dir: dir.into(),
            agency,
        }
    }
}

impl Connector for FixtureConnector {
    type Store = MemoryStore;

    async fn connect(&self) -> Result<MemoryStore, StoreError> {
        MemoryStore::from_dir(&self.dir, self.agency.clone())
    }
}
