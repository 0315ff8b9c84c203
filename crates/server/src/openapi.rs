use std::collections::BTreeMap;

use serde::Serialize;
use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(Serialize, ToSchema)]
pub struct OpenIntervalDoc {
    #[schema(example = "08:00")]
    pub start: String,
    #[schema(example = "12:00")]
    pub end: String,
    #[serde(rename = "type")]
    #[schema(example = "open")]
    pub kind: String,
}

/// Keys are weekday names (`monday`, `Mon`, ...).
#[derive(Serialize, ToSchema)]
pub struct OpeningHoursDoc {
    pub days: BTreeMap<String, Vec<OpenIntervalDoc>>,
}

#[derive(Serialize, ToSchema)]
pub struct PlaceRecordDoc {
    pub id: Option<i64>,
    #[schema(example = "Praxis Dr. Muster")]
    pub label: String,
    #[schema(example = "Bahnhofstrasse 1, 8001 Zürich")]
    pub location: String,
    #[serde(rename = "openingHours")]
    pub opening_hours: OpeningHoursDoc,
}

#[derive(Serialize, ToSchema)]
pub struct GroupedOpeningDayDoc {
    #[schema(example = "Monday - Friday")]
    pub day: String,
    pub intervals: Vec<String>,
}

#[derive(Serialize, ToSchema)]
pub struct GroupedPlaceDoc {
    pub id: i64,
    pub label: String,
    pub location: String,
    #[serde(rename = "openingHours")]
    pub opening_hours: Vec<GroupedOpeningDayDoc>,
}

#[derive(Serialize, ToSchema)]
pub struct ErrorDoc {
    pub status: u16,
    pub error: String,
    pub message: Option<String>,
    pub details: Option<Vec<String>>,
}

#[derive(OpenApi)]
#[openapi(
    info(title = "aerztekasse", description = "Places and their grouped opening hours"),
    paths(
        crate::routes::home,
        crate::routes::health,
        crate::routes::places::save_places,
        crate::routes::places::list_all,
        crate::routes::places::find_by_id,
        crate::routes::places::grouped_opening_hours,
        crate::routes::places::delete_by_id,
        crate::routes::places::update_place,
    ),
    components(
        schemas(
            HealthResponse,
            OpenIntervalDoc,
            OpeningHoursDoc,
            PlaceRecordDoc,
            GroupedOpeningDayDoc,
            GroupedPlaceDoc,
            ErrorDoc,
        )
    ),
    tags(
        (name = "home"),
        (name = "health"),
        (name = "places", description = "Endpoints to manage places and fetch grouped opening hours")
    )
)]
pub struct ApiDoc;
