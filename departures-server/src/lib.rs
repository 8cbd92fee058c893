//! Transit departure board server.
//!
//! Answers: "standing at this stop on this date, which vehicles
//! leave, in what order, and how far apart?" from a static
//! timetable snapshot.

pub mod domain;
pub mod schedule;
pub mod store;
pub mod web;
