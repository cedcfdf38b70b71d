pub mod client;
mod dto;
pub mod handlers;
pub mod repo;
pub mod sync;

use axum::routing::get;
use axum::Router;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/oura/:date",
            get(handlers::get_scores).post(handlers::save_scores),
        )
        .route(
            "/oura/:date/workouts",
            get(handlers::list_workouts).post(handlers::save_workouts),
        )
}
