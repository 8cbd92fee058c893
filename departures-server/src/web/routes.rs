//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use chrono::NaiveDate;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::error;

use crate::domain::{RouteId, StopId};
use crate::schedule::{ScheduleAssembler, ScheduleError, sequence};
use crate::store::{ScheduleStore, StoreError};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/stops", get(list_stops))
        .route("/routes", get(list_routes))
        .route("/schedule", get(stop_schedule))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// List every stop in the snapshot.
async fn list_stops(State(state): State<AppState>) -> Result<Json<StopsResponse>, AppError> {
    let store = state.store.get().await?;
    let stops = store.stops().await?;

    Ok(Json(StopsResponse {
        stops: stops.iter().map(StopResult::from_stop).collect(),
    }))
}

/// List every route in the snapshot.
async fn list_routes(State(state): State<AppState>) -> Result<Json<RoutesResponse>, AppError> {
    let store = state.store.get().await?;
    let routes = store.routes().await?;

    Ok(Json(RoutesResponse {
        routes: routes.iter().map(RouteResult::from_route).collect(),
    }))
}

/// Departure board for one stop on one service date.
async fn stop_schedule(
    State(state): State<AppState>,
    Query(req): Query<ScheduleRequest>,
) -> Result<Json<ScheduleResponse>, AppError> {
    let date = NaiveDate::parse_from_str(&req.date, "%Y-%m-%d").map_err(|_| {
        AppError::BadRequest {
            message: format!("Invalid date: {}", req.date),
        }
    })?;

    let route_filter = parse_route_filter(req.routes.as_deref());

    let store = state.store.get().await?;

    // Accept either a stop id or a rider-facing stop code.
    let stop_id = match (&req.stop, &req.stop_code) {
        (Some(stop), _) if !stop.is_empty() => StopId::from(stop.as_str()),
        (_, Some(code)) if !code.is_empty() => {
            let stop = store
                .stop_by_code(code)
                .await?
                .ok_or_else(|| AppError::NotFound {
                    message: format!("No stop with code {}", code),
                })?;
            stop.stop_id
        }
        _ => {
            return Err(AppError::BadRequest {
                message: "Missing stop or stop_code parameter".to_string(),
            });
        }
    };

    let assembler = ScheduleAssembler::new(store.as_ref());
    let candidates = assembler
        .build_departures(&stop_id, date, &route_filter)
        .await?;
    let departures = sequence(candidates);

    Ok(Json(ScheduleResponse {
        stop_id: stop_id.to_string(),
        date: date.to_string(),
        departures: departures
            .iter()
            .map(DepartureResult::from_departure)
            .collect(),
    }))
}

/// Parse the comma-separated route filter, ignoring blank entries.
fn parse_route_filter(raw: Option<&str>) -> Vec<RouteId> {
    raw.unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(RouteId::from)
        .collect()
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Unavailable { message: String },
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        AppError::Unavailable {
            message: e.to_string(),
        }
    }
}

impl From<ScheduleError> for AppError {
    fn from(e: ScheduleError) -> Self {
        match e {
            ScheduleError::StopNotFound(stop_id) => AppError::NotFound {
                message: format!("No stop with id {}", stop_id),
            },
            ScheduleError::Store(e) => AppError::from(e),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match &self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message.clone()),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message.clone()),
            AppError::Unavailable { message } => (StatusCode::SERVICE_UNAVAILABLE, message.clone()),
        };

        error!(%status, "{message}");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
