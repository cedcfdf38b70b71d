use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};

/// All handler failures surface as a status plus a `{"error": ...}` body.
pub type ApiError = (StatusCode, Json<Value>);

pub type ApiResult<T> = Result<T, ApiError>;

pub fn internal<E: std::fmt::Display>(e: E) -> ApiError {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": e.to_string() })),
    )
}

pub fn bad_request(body: Value) -> ApiError {
    (StatusCode::BAD_REQUEST, Json(body))
}
