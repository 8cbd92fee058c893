//! Service calendar resolution.
//!
//! Answers the question "which services run on this date": weekly
//! calendars give the base set, then single-date exceptions add and
//! remove services on top of it.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use tracing::debug;

use crate::domain::{ExceptionType, ServiceId};
use crate::store::{ScheduleStore, StoreError};

/// Resolves which services are active on a calendar date.
pub struct CalendarResolver<'a, S: ScheduleStore> {
    store: &'a S,
}

impl<'a, S: ScheduleStore> CalendarResolver<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// The set of service ids active on `date`.
    ///
    /// The set is computed in two phases over data fetched up front,
    /// never by mutating while scanning exception rows:
    ///
    /// 1. every calendar whose weekday flag matches and whose inclusive
    ///    date range contains `date` contributes its service id
    /// 2. added exceptions are applied, then removed exceptions
    ///
    /// Applying removals last makes removal win when one service is both
    /// added and removed for the same date, regardless of row order. An
    /// empty result is a valid answer, not an error.
    pub async fn active_service_ids(
        &self,
        date: NaiveDate,
    ) -> Result<BTreeSet<ServiceId>, StoreError> {
        let (calendars, exceptions) = futures::try_join!(
            self.store.calendars(),
            self.store.calendar_dates_on(date)
        )?;

        let mut active: BTreeSet<ServiceId> = calendars
            .iter()
            .filter(|cal| cal.active_on(date))
            .map(|cal| cal.service_id.clone())
            .collect();

        let mut added = BTreeSet::new();
        let mut removed = BTreeSet::new();
        for exception in &exceptions {
            match exception.exception_type {
                ExceptionType::Added => added.insert(exception.service_id.clone()),
                ExceptionType::Removed => removed.insert(exception.service_id.clone()),
            };
        }

        for service_id in added {
            active.insert(service_id);
        }
        for service_id in &removed {
            active.remove(service_id);
        }

        debug!(
            %date,
            calendars = calendars.len(),
            exceptions = exceptions.len(),
            active = active.len(),
            "resolved active services"
        );

        Ok(active)
    }
}
