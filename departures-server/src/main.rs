use std::net::SocketAddr;

use departures_server::domain::AgencyId;
use departures_server::store::{FixtureConnector, HandleConfig, ScheduleStore, StoreHandle};
use departures_server::web::{AppState, create_router};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Snapshot location and agency scope from the environment
    let fixture_dir = std::env::var("FIXTURE_DIR").unwrap_or_else(|_| "data/fixtures".to_string());
    let agency = std::env::var("AGENCY_KEY").unwrap_or_else(|_| {
        eprintln!("Warning: AGENCY_KEY not set. Serving the \"metro\" feed.");
        "metro".to_string()
    });

    println!("Serving agency {agency} from {fixture_dir}");

    let connector = FixtureConnector::new(fixture_dir, AgencyId::from(agency));
    let config = HandleConfig::default();
    let store = StoreHandle::with_config(connector, config);

    // Warm the connection; requests establish their own if this fails.
    match store.get().await {
        Ok(snapshot) => {
            let stops = snapshot.stops().await.map(|s| s.len()).unwrap_or(0);
            println!("Loaded snapshot with {stops} stops");
        }
        Err(e) => eprintln!("Warning: store not reachable yet: {e}"),
    }

    // Build app state
    let state = AppState::new(store);

    // Create router
    let app = create_router(state);

    // Bind and serve
    let addr: SocketAddr = std::env::var("BIND_ADDR")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or_else(|| SocketAddr::from(([127, 0, 0, 1], 3000)));
    println!("Departure board listening on http://{addr}");
    println!();
    println!("API Endpoints:");
    println!("  GET /health    - Health check");
    println!("  GET /stops     - List stops");
    println!("  GET /routes    - List routes");
    println!("  GET /schedule  - Departure board for a stop on a date");

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
