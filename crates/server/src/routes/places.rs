use axum::{
    extract::{rejection::{JsonRejection, PathRejection}, Path, State},
    http::StatusCode,
    Json,
};
use service::place::domain::{GroupedPlace, PlaceRecord};
use tracing::info;

use crate::{errors::JsonApiError, startup::AppState};

pub const DELETED_MESSAGE: &str = "Place deleted successfully";

#[utoipa::path(
    post, path = "/places", tag = "places",
    request_body = [crate::openapi::PlaceRecordDoc],
    responses(
        (status = 200, description = "Places created successfully", body = [crate::openapi::PlaceRecordDoc]),
        (status = 400, description = "Invalid payload or empty list", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn save_places(
    State(state): State<AppState>,
    payload: Result<Json<Vec<PlaceRecord>>, JsonRejection>,
) -> Result<Json<Vec<PlaceRecord>>, JsonApiError> {
    let Json(places) = payload?;
    let saved = state.places.save_places(places).await?;
    info!(count = saved.len(), "places created");
    Ok(Json(saved))
}

#[utoipa::path(
    get, path = "/places", tag = "places",
    responses((status = 200, description = "Returns list of places", body = [crate::openapi::PlaceRecordDoc]))
)]
pub async fn list_all(State(state): State<AppState>) -> Result<Json<Vec<PlaceRecord>>, JsonApiError> {
    Ok(Json(state.places.list_all().await?))
}

#[utoipa::path(
    get, path = "/places/{id}", tag = "places",
    params(("id" = i64, Path, description = "Place ID", example = 1)),
    responses(
        (status = 200, description = "Place found", body = crate::openapi::PlaceRecordDoc),
        (status = 404, description = "Place not found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn find_by_id(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<PlaceRecord>, JsonApiError> {
    let Path(id) = id?;
    Ok(Json(state.places.find_by_id(id).await?))
}

#[utoipa::path(
    get, path = "/places/{id}/opening-hours/grouped", tag = "places",
    params(("id" = i64, Path, description = "Place ID", example = 1)),
    responses(
        (status = 200, description = "Returns grouped opening hours", body = crate::openapi::GroupedPlaceDoc),
        (status = 404, description = "Place not found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn grouped_opening_hours(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<GroupedPlace>, JsonApiError> {
    let Path(id) = id?;
    Ok(Json(state.places.grouped_opening_hours(id).await?))
}

#[utoipa::path(
    delete, path = "/places/{id}", tag = "places",
    params(("id" = i64, Path, description = "Place ID", example = 1)),
    responses(
        (status = 200, description = "Place deleted successfully", body = String),
        (status = 404, description = "Place not found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn delete_by_id(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<(StatusCode, &'static str), JsonApiError> {
    let Path(id) = id?;
    state.places.delete_by_id(id).await?;
    Ok((StatusCode::OK, DELETED_MESSAGE))
}

/// Replaces label, location and opening hours of an existing place.
#[utoipa::path(
    put, path = "/places", tag = "places",
    request_body = crate::openapi::PlaceRecordDoc,
    responses(
        (status = 200, description = "Resource successfully updated", body = crate::openapi::PlaceRecordDoc),
        (status = 400, description = "Invalid or malformed request", body = crate::openapi::ErrorDoc),
        (status = 404, description = "Resource not found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn update_place(
    State(state): State<AppState>,
    payload: Result<Json<PlaceRecord>, JsonRejection>,
) -> Result<Json<PlaceRecord>, JsonApiError> {
    let Json(place) = payload?;
    Ok(Json(state.places.update_place(place).await?))
}
