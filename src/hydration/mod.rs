pub mod handlers;
pub mod repo;

use axum::routing::get;
use axum::Router;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route(
        "/hydration/:date",
        get(handlers::get_hydration).post(handlers::set_hydration),
    )
}
