use axum::{
    middleware,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::{types::Health, HOME_MESSAGE};

use crate::{observability, openapi::ApiDoc, startup::AppState};

pub mod places;

#[utoipa::path(
    get, path = "/", tag = "home",
    responses((status = 200, description = "Welcome message", body = String))
)]
pub async fn home() -> &'static str {
    HOME_MESSAGE
}

#[utoipa::path(
    get, path = "/health", tag = "health",
    responses((status = 200, description = "Service is up", body = crate::openapi::HealthResponse))
)]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

pub async fn metrics() -> impl IntoResponse {
    observability::encode_metrics()
}

/// Build the full application router: places API, operational endpoints and docs
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    // Public routes (home + health)
    let api = Router::new()
        .route("/", get(home))
        .route("/health", get(health))
        // Places API
        .route(
            "/places",
            get(places::list_all).post(places::save_places).put(places::update_place),
        )
        .route("/places/:id", get(places::find_by_id).delete(places::delete_by_id))
        .route("/places/:id/opening-hours/grouped", get(places::grouped_opening_hours))
        // Request count and latency per matched route
        .route_layer(middleware::from_fn(observability::track_metrics));

    // Operational routes: metrics scrape, OpenAPI document and Swagger UI

    let ops = Router::new()
        .route("/metrics", get(metrics))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    // Compose
    api.merge(ops)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // one INFO span per request with method and path
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                // request arrival
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                // status and latency on response
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 5xx at ERROR
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
