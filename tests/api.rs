use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sqlx::SqlitePool;
use tower::ServiceExt;

use vitalog::app::build_app;
use vitalog::state::{connect_memory, AppState};

async fn test_app() -> (Router, SqlitePool) {
    let db = connect_memory().await.unwrap();
    sqlx::migrate!().run(&db).await.unwrap();
    let app = build_app(AppState { db: db.clone() });
    (app, db)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let req = match body {
        Some(body) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };
    let res = app.clone().oneshot(req).await.unwrap();
    let status = res.status();
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

#[tokio::test]
async fn health_reports_ok() {
    let (app, _db) = test_app().await;
    let (status, body) = send(&app, "GET", "/api/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "connected");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn entries_create_list_delete() {
    let (app, _db) = test_app().await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/entries/2024-01-15",
        Some(json!({
            "meal_type": "breakfast",
            "food_name": "Oats",
            "calories": 300,
            "protein": 13,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    let id = body["id"].as_i64().unwrap();

    let (status, body) = send(&app, "GET", "/api/v1/entries/2024-01-15", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["date"], "2024-01-15");
    let entries = body["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["food_name"], "Oats");
    assert_eq!(entries[0]["calories"], 300.0);
    // absent macros default to zero
    assert_eq!(entries[0]["fat"], 0.0);

    let (status, body) = send(&app, "DELETE", &format!("/api/v1/entries/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let (_, body) = send(&app, "GET", "/api/v1/entries/2024-01-15", None).await;
    assert!(body["entries"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn entry_without_food_name_is_rejected() {
    let (app, _db) = test_app().await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/entries/2024-01-15",
        Some(json!({ "meal_type": "lunch" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "meal_type and food_name are required");
    assert_eq!(body["received"]["meal_type"], "lunch");
    assert_eq!(body["received"]["food_name"], Value::Null);

    // nothing was written
    let (_, body) = send(&app, "GET", "/api/v1/entries/2024-01-15", None).await;
    assert!(body["entries"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn food_history_counts_repeat_uses() {
    let (app, _db) = test_app().await;
    let entry = json!({ "meal_type": "snack", "food_name": "Apple", "calories": 95 });

    send(&app, "POST", "/api/v1/entries/2024-01-15", Some(entry.clone())).await;
    send(&app, "POST", "/api/v1/entries/2024-01-16", Some(entry)).await;

    let (status, body) = send(&app, "GET", "/api/v1/food-history?limit=5", None).await;
    assert_eq!(status, StatusCode::OK);
    let foods = body["foods"].as_array().unwrap();
    assert_eq!(foods.len(), 1);
    assert_eq!(foods[0]["food_name"], "Apple");
    assert_eq!(foods[0]["use_count"], 2);
}

#[tokio::test]
async fn hydration_upserts_a_single_row() {
    let (app, db) = test_app().await;

    let (_, body) = send(&app, "GET", "/api/v1/hydration/2024-01-15", None).await;
    assert_eq!(body, json!({ "date": "2024-01-15", "cups": 0 }));

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/hydration/2024-01-15",
        Some(json!({ "cups": 4 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["cups"], 4);

    let (_, body) = send(&app, "GET", "/api/v1/hydration/2024-01-15", None).await;
    assert_eq!(body["cups"], 4);

    send(
        &app,
        "POST",
        "/api/v1/hydration/2024-01-15",
        Some(json!({ "cups": 6 })),
    )
    .await;
    let (_, body) = send(&app, "GET", "/api/v1/hydration/2024-01-15", None).await;
    assert_eq!(body["cups"], 6);

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM hydration_log WHERE date = ?")
        .bind("2024-01-15")
        .fetch_one(&db)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn oura_scores_upsert_and_fetch() {
    let (app, db) = test_app().await;

    let (status, body) = send(&app, "GET", "/api/v1/oura/2024-01-15", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({}));

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/oura/2024-01-15",
        Some(json!({ "readiness_score": 80, "sleep_score": 72 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["date"], "2024-01-15");

    let (_, body) = send(&app, "GET", "/api/v1/oura/2024-01-15", None).await;
    assert_eq!(body["readiness_score"], 80);
    assert_eq!(body["sleep_score"], 72);
    assert_eq!(body["activity_score"], Value::Null);

    send(
        &app,
        "POST",
        "/api/v1/oura/2024-01-15",
        Some(json!({ "readiness_score": 85, "steps": 10000 })),
    )
    .await;
    let (_, body) = send(&app, "GET", "/api/v1/oura/2024-01-15", None).await;
    assert_eq!(body["readiness_score"], 85);
    assert_eq!(body["steps"], 10000);

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM oura_scores WHERE date = ?")
        .bind("2024-01-15")
        .fetch_one(&db)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn workouts_are_replaced_as_a_set() {
    let (app, _db) = test_app().await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/oura/2024-01-15/workouts",
        Some(json!({
            "workouts": [
                { "activity": "Running", "calories": 320, "duration": 1500,
                  "start_time": "2024-01-15T07:00:00Z" },
                { "activity": "Walking", "calories": 120, "duration": 900,
                  "start_time": "2024-01-15T18:00:00Z" },
            ]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 2);

    let (_, body) = send(&app, "GET", "/api/v1/oura/2024-01-15/workouts", None).await;
    let workouts = body["workouts"].as_array().unwrap();
    assert_eq!(workouts.len(), 2);
    assert_eq!(workouts[0]["activity"], "Running");

    // posting again replaces the whole set
    let (_, body) = send(
        &app,
        "POST",
        "/api/v1/oura/2024-01-15/workouts",
        Some(json!({ "workouts": [ { "calories": 50 } ] })),
    )
    .await;
    assert_eq!(body["count"], 1);

    let (_, body) = send(&app, "GET", "/api/v1/oura/2024-01-15/workouts", None).await;
    let workouts = body["workouts"].as_array().unwrap();
    assert_eq!(workouts.len(), 1);
    assert_eq!(workouts[0]["activity"], "Workout");
    assert_eq!(workouts[0]["duration"], 0);
}

#[tokio::test]
async fn workouts_body_must_be_an_array() {
    let (app, _db) = test_app().await;
    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/oura/2024-01-15/workouts",
        Some(json!({ "workouts": 5 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "workouts must be an array");
}

#[tokio::test]
async fn weight_appends_and_lists_newest_first() {
    let (app, _db) = test_app().await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/weight",
        Some(json!({ "date": "2024-01-14", "weight": 81.2 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    send(
        &app,
        "POST",
        "/api/v1/weight",
        Some(json!({ "date": "2024-01-15", "weight": 80.5 })),
    )
    .await;

    let (status, body) = send(&app, "GET", "/api/v1/weight?limit=10", None).await;
    assert_eq!(status, StatusCode::OK);
    let weights = body["weights"].as_array().unwrap();
    assert_eq!(weights.len(), 2);
    assert_eq!(weights[0]["date"], "2024-01-15");
    assert_eq!(weights[1]["date"], "2024-01-14");
}
