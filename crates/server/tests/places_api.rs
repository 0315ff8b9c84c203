use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::{Service, ServiceExt};

use models::db::{connect_and_migrate, DatabaseConfig};
use server::{routes, AppState};

const PLACES: &str = include_str!("fixtures/places.json");
const BAD_REQUEST: &str = include_str!("fixtures/places_bad_request.json");
const MALFORMED: &str = include_str!("fixtures/places_malformed.json");
const WRONG_TIME_1: &str = include_str!("fixtures/places_wrong_time_1.json");
const WRONG_TIME_2: &str = include_str!("fixtures/places_wrong_time_2.json");
const WRONG_TIME_3: &str = include_str!("fixtures/places_wrong_time_3.json");

fn cors() -> tower_http::cors::CorsLayer { tower_http::cors::CorsLayer::very_permissive() }

async fn build_app() -> anyhow::Result<Router> {
    let db = connect_and_migrate(&DatabaseConfig::in_memory()).await?;
    Ok(routes::build_router(AppState::new(db), cors()))
}

fn json_request(method: &str, uri: &str, body: &str) -> anyhow::Result<Request<Body>> {
    Ok(Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_owned()))?)
}

fn empty_request(method: &str, uri: &str) -> anyhow::Result<Request<Body>> {
    Ok(Request::builder().method(method).uri(uri).body(Body::empty())?)
}

async fn send(app: &Router, req: Request<Body>) -> anyhow::Result<(StatusCode, String)> {
    let resp = app.clone().oneshot(req).await?;
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await?;
    Ok((status, String::from_utf8(bytes.to_vec())?))
}

async fn send_json(app: &Router, req: Request<Body>) -> anyhow::Result<(StatusCode, Value)> {
    let (status, body) = send(app, req).await?;
    Ok((status, serde_json::from_str(&body)?))
}

async fn seed(app: &Router) -> anyhow::Result<Vec<Value>> {
    let (status, body) = send_json(app, json_request("POST", "/places", PLACES)?).await?;
    assert_eq!(status, StatusCode::OK);
    Ok(body.as_array().cloned().unwrap_or_default())
}

#[tokio::test]
async fn home_returns_greeting() -> anyhow::Result<()> {
    let mut app = build_app().await?;
    let resp = app.call(empty_request("GET", "/")?).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await?;
    assert_eq!(&bytes[..], b"Aerztekasse - code challenge - Home!");
    Ok(())
}

#[tokio::test]
async fn health_and_metrics() -> anyhow::Result<()> {
    let app = build_app().await?;
    let (status, body) = send_json(&app, empty_request("GET", "/health")?).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));

    let (status, text) = send(&app, empty_request("GET", "/metrics")?).await?;
    assert_eq!(status, StatusCode::OK);
    assert!(text.contains("aerztekasse_http_requests_total"));
    Ok(())
}

#[tokio::test]
async fn openapi_document_lists_place_routes() -> anyhow::Result<()> {
    let app = build_app().await?;
    let (status, doc) = send_json(&app, empty_request("GET", "/api-docs/openapi.json")?).await?;
    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"]["/places"].is_object());
    assert!(doc["paths"]["/places/{id}/opening-hours/grouped"]["get"].is_object());
    Ok(())
}

#[tokio::test]
async fn create_and_list_places() -> anyhow::Result<()> {
    let app = build_app().await?;
    let created = seed(&app).await?;
    assert_eq!(created.len(), 2);
    assert_eq!(created[0]["id"], 1);
    assert_eq!(created[1]["id"], 2);
    assert_eq!(created[1]["openingHours"]["days"]["monday"][0]["end"], "00:00");
    assert_eq!(created[1]["openingHours"]["days"]["sunday"][0]["type"], "emergency");

    let (status, list) = send_json(&app, empty_request("GET", "/places")?).await?;
    assert_eq!(status, StatusCode::OK);
    let labels: Vec<_> = list.as_array().unwrap().iter().map(|p| p["label"].as_str().unwrap().to_owned()).collect();
    assert_eq!(labels, vec!["Praxis Dr. Muster", "Apotheke am Markt"]);
    Ok(())
}

#[tokio::test]
async fn find_place_by_id() -> anyhow::Result<()> {
    let app = build_app().await?;
    seed(&app).await?;
    let (status, place) = send_json(&app, empty_request("GET", "/places/1")?).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(place["label"], "Praxis Dr. Muster");
    // stored order within a day is kept
    assert_eq!(place["openingHours"]["days"]["monday"][0]["start"], "13:00");

    let (status, err) = send_json(&app, empty_request("GET", "/places/999")?).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(err["status"], 404);
    assert_eq!(err["message"], "Place not found: 999");
    Ok(())
}

#[tokio::test]
async fn non_numeric_id_is_bad_request() -> anyhow::Result<()> {
    let app = build_app().await?;
    let (status, err) = send_json(&app, empty_request("GET", "/places/abc")?).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err["status"], 400);
    Ok(())
}

#[tokio::test]
async fn grouped_opening_hours() -> anyhow::Result<()> {
    let app = build_app().await?;
    seed(&app).await?;
    let (status, grouped) = send_json(&app, empty_request("GET", "/places/1/opening-hours/grouped")?).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        grouped,
        json!({
            "id": 1,
            "label": "Praxis Dr. Muster",
            "location": "Bahnhofstrasse 1, 8001 Zürich",
            "openingHours": [
                {"day": "Monday - Friday", "intervals": ["08:00 - 12:00", "13:00 - 17:00"]},
                {"day": "Saturday", "intervals": ["09:00 - 12:00"]},
                {"day": "Sunday", "intervals": ["closed"]}
            ]
        })
    );

    let (status, grouped) = send_json(&app, empty_request("GET", "/places/2/opening-hours/grouped")?).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(grouped["openingHours"][0], json!({"day": "Monday", "intervals": ["07:30 - 00:00"]}));
    assert_eq!(grouped["openingHours"][1], json!({"day": "Tuesday - Saturday", "intervals": ["closed"]}));
    assert_eq!(grouped["openingHours"][2], json!({"day": "Sunday", "intervals": ["10:00 - 14:00"]}));

    let (status, _) = send_json(&app, empty_request("GET", "/places/42/opening-hours/grouped")?).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn grouped_opening_hours_joins_equal_days_across_the_week() -> anyhow::Result<()> {
    let app = build_app().await?;
    let body = json!([{
        "label": "Praxis Alternierend",
        "location": "Rathausplatz 2, 9000 St. Gallen",
        "openingHours": {"days": {
            "monday": [{"start": "08:00", "end": "12:00", "type": "open"}],
            "wednesday": [{"start": "08:00", "end": "12:00", "type": "open"}],
            "friday": [{"start": "08:00", "end": "12:00", "type": "open"}]
        }}
    }]);
    let (status, _) = send_json(&app, json_request("POST", "/places", &body.to_string())?).await?;
    assert_eq!(status, StatusCode::OK);

    let (status, grouped) = send_json(&app, empty_request("GET", "/places/1/opening-hours/grouped")?).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        grouped["openingHours"],
        json!([
            {"day": "Monday - Friday", "intervals": ["08:00 - 12:00"]},
            {"day": "Tuesday - Sunday", "intervals": ["closed"]}
        ])
    );
    Ok(())
}

#[tokio::test]
async fn null_fields_are_reported_as_violations() -> anyhow::Result<()> {
    let app = build_app().await?;
    let body = r#"[{
        "label": null,
        "location": null,
        "openingHours": {"days": {"monday": [{"start": null, "end": null, "type": null}]}}
    }]"#;
    let (status, err) = send_json(&app, json_request("POST", "/places", body)?).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        err["details"],
        json!([
            "Label is mandatory",
            "Location is mandatory",
            "Start time is required",
            "End time is required",
            "Type is required"
        ])
    );

    let (status, err) = send_json(&app, json_request("POST", "/places", r#"[{"label": "A", "location": "B", "openingHours": null}]"#)?).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err["details"], json!(["OpeningHours is mandatory"]));
    Ok(())
}

#[tokio::test]
async fn delete_place() -> anyhow::Result<()> {
    let app = build_app().await?;
    seed(&app).await?;
    let (status, text) = send(&app, empty_request("DELETE", "/places/1")?).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(text, "Place deleted successfully");

    let (status, _) = send(&app, empty_request("GET", "/places/1")?).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, empty_request("DELETE", "/places/1")?).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn update_place() -> anyhow::Result<()> {
    let app = build_app().await?;
    seed(&app).await?;
    let body = json!({
        "id": 2,
        "label": "Apotheke Neu",
        "location": "Kramgasse 9, 3011 Bern",
        "openingHours": {"days": {"saturday": [{"start": "08:00", "end": "16:00", "type": "open"}]}}
    });
    let (status, updated) = send_json(&app, json_request("PUT", "/places", &body.to_string())?).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["label"], "Apotheke Neu");
    assert_eq!(updated["openingHours"]["days"], json!({"saturday": [{"start": "08:00", "end": "16:00", "type": "open"}]}));

    let (_, fetched) = send_json(&app, empty_request("GET", "/places/2")?).await?;
    assert_eq!(fetched, updated);
    Ok(())
}

#[tokio::test]
async fn update_errors() -> anyhow::Result<()> {
    let app = build_app().await?;
    seed(&app).await?;
    let unknown = json!({
        "id": 77,
        "label": "X",
        "location": "Y",
        "openingHours": {"days": {"monday": [{"start": "08:00", "end": "09:00", "type": "open"}]}}
    });
    let (status, _) = send_json(&app, json_request("PUT", "/places", &unknown.to_string())?).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let no_id = json!({
        "label": "X",
        "location": "Y",
        "openingHours": {"days": {"monday": [{"start": "08:00", "end": "09:00", "type": "open"}]}}
    });
    let (status, err) = send_json(&app, json_request("PUT", "/places", &no_id.to_string())?).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err["details"], json!(["Id is mandatory for update"]));

    let (status, _) = send_json(&app, json_request("PUT", "/places", "{")?).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn invalid_payload_reports_every_violation() -> anyhow::Result<()> {
    let app = build_app().await?;
    let (status, err) = send_json(&app, json_request("POST", "/places", BAD_REQUEST)?).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        err["details"],
        json!([
            "Label is mandatory",
            "Location is mandatory",
            "Start time is required",
            "Type is required",
            "Interval list cannot be empty"
        ])
    );
    let (_, list) = send_json(&app, empty_request("GET", "/places")?).await?;
    assert_eq!(list, json!([]));
    Ok(())
}

#[tokio::test]
async fn empty_list_is_rejected() -> anyhow::Result<()> {
    let app = build_app().await?;
    let (status, err) = send_json(&app, json_request("POST", "/places", "[]")?).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err["details"], json!(["Provide at least one location."]));
    Ok(())
}

#[tokio::test]
async fn malformed_json_is_bad_request() -> anyhow::Result<()> {
    let app = build_app().await?;
    let (status, err) = send_json(&app, json_request("POST", "/places", MALFORMED)?).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err["error"], "Bad Request");

    let unknown_day = r#"[{"label":"A","location":"B","openingHours":{"days":{"someday":[]}}}]"#;
    let (status, err) = send_json(&app, json_request("POST", "/places", unknown_day)?).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(err["message"].as_str().unwrap_or_default().contains("Invalid day of week"));
    Ok(())
}

#[tokio::test]
async fn wrong_times_are_rejected() -> anyhow::Result<()> {
    let app = build_app().await?;
    for (fixture, expected) in [
        (WRONG_TIME_1, "Start time must be in format HH:mm"),
        (WRONG_TIME_2, "Start time must be before end time"),
        (WRONG_TIME_3, "End time must be in format HH:mm"),
    ] {
        let (status, err) = send_json(&app, json_request("POST", "/places", fixture)?).await?;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(err["details"], json!([expected]));
    }
    Ok(())
}
