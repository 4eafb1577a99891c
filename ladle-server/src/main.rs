use std::process::ExitCode;

use ladle_server::config::AppConfig;
use ladle_server::geo::GeoResolver;
use ladle_server::store::PgStore;
use ladle_server::web::{AppState, create_router};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env file is fine; the environment may already be set
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    // Connect to the database (fail fast if unavailable)
    let store = match PgStore::connect(&config.database).await {
        Ok(store) => store,
        Err(e) => {
            error!(error = %e, "failed to connect to database");
            return ExitCode::FAILURE;
        }
    };

    let geo = match GeoResolver::new(&config.geo) {
        Ok(geo) => geo,
        Err(e) => {
            error!(error = %e, "failed to create HTTP client");
            return ExitCode::FAILURE;
        }
    };

    // Build app state and router
    let state = AppState::new(store.clone(), geo);
    let app = create_router(state, &config.static_dir);

    let listener = match tokio::net::TcpListener::bind(config.bind_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(addr = %config.bind_addr, error = %e, "failed to bind");
            return ExitCode::FAILURE;
        }
    };

    let addr = config.bind_addr;
    info!("Ladle listening on http://{addr}");
    info!("  GET  /search                - Search recommendations");
    info!("  GET  /submit                - Submission form");
    info!("  POST /submit                - Submit a recommendation");
    info!("  GET  /api/locate            - Resolve a map link");
    info!("  GET  /api/stations/nearest  - Nearest MRT stations");

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    store.close().await;

    match served {
        Ok(()) => {
            info!("shut down cleanly");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "server error");
            ExitCode::FAILURE
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to listen for Ctrl-C");
        // Never resolve, so the server keeps running
        std::future::pending::<()>().await;
    }
    info!("shutdown requested");
}
