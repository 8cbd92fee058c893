//! Domain types for the departure board service.
//!
//! This module contains the validated schedule model. Raw feed rows are
//! checked once at the store boundary; everything here can be trusted by
//! construction, so the resolver and assembler never re-validate.

mod calendar;
mod ids;
mod network;
mod time;

pub use calendar::{Calendar, CalendarDate, ExceptionType, Weekdays};
pub use ids::{AgencyId, RouteId, ServiceId, StopId, TripId};
pub use network::{Route, Stop, StopTime, Trip};
pub use time::{ServiceDayTime, TimeError};
