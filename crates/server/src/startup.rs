use std::{net::SocketAddr, path::Path, sync::Arc};

use axum::Router;
use configs::AppConfig;
use sea_orm::DatabaseConnection;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::errors::StartupError;
use crate::routes;
use models::db::{connect_and_migrate, DatabaseConfig};
use service::{
    place::{PlaceService, SeaOrmPlaceRepository},
    seed,
};

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub places: Arc<PlaceService<SeaOrmPlaceRepository>>,
}

impl AppState {
    pub fn new(db: DatabaseConnection) -> Self {
        let repo = SeaOrmPlaceRepository::new(db.clone());
        Self { db, places: Arc::new(PlaceService::new(Arc::new(repo))) }
    }
}

/// Browser clients (Swagger UI, local frontends) may call from any origin
fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Host/port from the validated config
fn bind_addr(cfg: &AppConfig) -> Result<SocketAddr, StartupError> {
    format!("{}:{}", cfg.server.host, cfg.server.port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("server address: {e}")))
}

/// Connect, migrate and seed; the state the router is built on.
pub async fn prepare_state(cfg: &AppConfig) -> Result<AppState, StartupError> {
    // DB connection, schema up to date
    let db = connect_and_migrate(&DatabaseConfig::from_settings(&cfg.database)).await?;
    let state = AppState::new(db);
    // Initial places, only into an empty database
    if let Some(file) = cfg.seed.file.as_deref() {
        seed::seed_if_empty(state.places.as_ref(), Path::new(file))
            .await
            .map_err(|e| StartupError::Seed(e.to_string()))?;
    }
    Ok(state)
}

pub fn build_app(state: AppState) -> Router {
    routes::build_router(state, build_cors())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutdown signal received");
    }
}

/// Public entry: build the app and run the HTTP server until Ctrl+C
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let addr = bind_addr(&cfg)?;

    // Database, repository and service
    let state = prepare_state(&cfg).await?;

    // Build router
    let app = build_app(state);

    // Bind and serve until Ctrl+C
    info!(%addr, "starting aerztekasse server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;
    info!("server stopped");
    Ok(())
}
