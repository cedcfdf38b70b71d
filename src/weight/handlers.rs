use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::instrument;

use super::repo;
use crate::error::{internal, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct WeightQuery {
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct NewWeightRequest {
    pub date: String,
    pub weight: f64,
}

#[instrument(skip(state))]
pub async fn weight_history(
    State(state): State<AppState>,
    Query(q): Query<WeightQuery>,
) -> ApiResult<Json<Value>> {
    let weights = repo::list(&state.db, q.limit.unwrap_or(50))
        .await
        .map_err(internal)?;
    Ok(Json(json!({ "weights": weights })))
}

#[instrument(skip(state, body))]
pub async fn add_weight(
    State(state): State<AppState>,
    Json(body): Json<NewWeightRequest>,
) -> ApiResult<Json<Value>> {
    let id = repo::insert(&state.db, &body.date, body.weight)
        .await
        .map_err(internal)?;
    Ok(Json(json!({ "success": true, "id": id })))
}
