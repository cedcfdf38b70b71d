pub mod handlers;
pub mod repo;

use axum::routing::get;
use axum::Router;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route(
        "/weight",
        get(handlers::weight_history).post(handlers::add_weight),
    )
}
