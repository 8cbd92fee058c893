//! Web layer for the departure board service.
//!
//! Provides JSON endpoints for stop and route listings and for the
//! per-stop departure schedule.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::create_router;
pub use state::AppState;
