use axum::extract::{Path, Query, State};
use axum::Json;
use serde_json::{json, Value};
use tracing::instrument;

use super::dto::{HistoryQuery, NewEntryRequest};
use super::repo::{self, NewEntry};
use crate::error::{bad_request, internal, ApiResult};
use crate::state::AppState;

#[instrument(skip(state))]
pub async fn list_entries(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> ApiResult<Json<Value>> {
    let entries = repo::list_for_date(&state.db, &date)
        .await
        .map_err(internal)?;
    Ok(Json(json!({ "date": date, "entries": entries })))
}

#[instrument(skip(state, body))]
pub async fn create_entry(
    State(state): State<AppState>,
    Path(date): Path<String>,
    Json(body): Json<NewEntryRequest>,
) -> ApiResult<Json<Value>> {
    let meal_type = body.meal_type.as_deref().filter(|s| !s.is_empty());
    let food_name = body.food_name.as_deref().filter(|s| !s.is_empty());
    let (Some(meal_type), Some(food_name)) = (meal_type, food_name) else {
        return Err(bad_request(json!({
            "error": "meal_type and food_name are required",
            "received": { "meal_type": &body.meal_type, "food_name": &body.food_name },
        })));
    };

    let entry = NewEntry {
        meal_type,
        food_name,
        calories: body.calories.unwrap_or(0.0),
        protein: body.protein.unwrap_or(0.0),
        carbs: body.carbs.unwrap_or(0.0),
        fat: body.fat.unwrap_or(0.0),
    };
    let id = repo::insert(&state.db, &date, &entry)
        .await
        .map_err(internal)?;
    repo::record_food_use(&state.db, &entry)
        .await
        .map_err(internal)?;

    Ok(Json(json!({ "success": true, "id": id })))
}

#[instrument(skip(state))]
pub async fn delete_entry(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Value>> {
    repo::delete(&state.db, id).await.map_err(internal)?;
    Ok(Json(json!({ "success": true })))
}

#[instrument(skip(state))]
pub async fn food_history(
    State(state): State<AppState>,
    Query(q): Query<HistoryQuery>,
) -> ApiResult<Json<Value>> {
    let foods = repo::recent_foods(&state.db, q.limit.unwrap_or(10))
        .await
        .map_err(internal)?;
    Ok(Json(json!({ "foods": foods })))
}
