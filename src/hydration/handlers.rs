use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::instrument;

use super::repo;
use crate::error::{internal, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SetHydrationRequest {
    #[serde(default)]
    pub cups: i64,
}

#[instrument(skip(state))]
pub async fn get_hydration(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> ApiResult<Json<Value>> {
    match repo::get_for_date(&state.db, &date).await.map_err(internal)? {
        Some(row) => Ok(Json(json!(row))),
        None => Ok(Json(json!({ "date": date, "cups": 0 }))),
    }
}

#[instrument(skip(state))]
pub async fn set_hydration(
    State(state): State<AppState>,
    Path(date): Path<String>,
    Json(body): Json<SetHydrationRequest>,
) -> ApiResult<Json<Value>> {
    repo::set_cups(&state.db, &date, body.cups)
        .await
        .map_err(internal)?;
    Ok(Json(json!({ "success": true, "date": date, "cups": body.cups })))
}
