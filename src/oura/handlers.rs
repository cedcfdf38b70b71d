use axum::extract::{Path, State};
use axum::Json;
use serde_json::{json, Value};
use tracing::instrument;

use super::dto::{SaveScoresRequest, WorkoutPayload};
use super::repo::{self, NewWorkout, ScoreFields};
use crate::error::{bad_request, internal, ApiResult};
use crate::state::AppState;

#[instrument(skip(state))]
pub async fn get_scores(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> ApiResult<Json<Value>> {
    match repo::get_scores(&state.db, &date).await.map_err(internal)? {
        Some(row) => Ok(Json(json!(row))),
        None => Ok(Json(json!({}))),
    }
}

#[instrument(skip(state, body))]
pub async fn save_scores(
    State(state): State<AppState>,
    Path(date): Path<String>,
    Json(body): Json<SaveScoresRequest>,
) -> ApiResult<Json<Value>> {
    let scores = ScoreFields {
        readiness_score: body.readiness_score,
        sleep_score: body.sleep_score,
        activity_score: body.activity_score,
        steps: body.steps,
    };
    repo::upsert_scores(&state.db, &date, &scores)
        .await
        .map_err(internal)?;
    Ok(Json(json!({ "success": true, "date": date })))
}

#[instrument(skip(state))]
pub async fn list_workouts(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> ApiResult<Json<Value>> {
    let workouts = repo::list_workouts(&state.db, &date)
        .await
        .map_err(internal)?;
    Ok(Json(json!({ "workouts": workouts })))
}

#[instrument(skip(state, body))]
pub async fn save_workouts(
    State(state): State<AppState>,
    Path(date): Path<String>,
    Json(body): Json<Value>,
) -> ApiResult<Json<Value>> {
    let Some(items) = body.get("workouts").and_then(Value::as_array) else {
        return Err(bad_request(json!({ "error": "workouts must be an array" })));
    };

    let mut workouts = Vec::with_capacity(items.len());
    for item in items {
        let w: WorkoutPayload = serde_json::from_value(item.clone())
            .map_err(|e| bad_request(json!({ "error": format!("invalid workout: {e}") })))?;
        workouts.push(NewWorkout {
            activity: w.activity.unwrap_or_else(|| "Workout".to_string()),
            calories: w.calories.unwrap_or(0.0),
            duration: w.duration.unwrap_or(0),
            distance: w.distance.unwrap_or(0.0),
            start_time: w.start_time,
        });
    }

    repo::replace_workouts(&state.db, &date, &workouts)
        .await
        .map_err(internal)?;
    Ok(Json(json!({
        "success": true,
        "date": date,
        "count": workouts.len(),
    })))
}
