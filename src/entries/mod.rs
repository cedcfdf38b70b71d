mod dto;
pub mod handlers;
pub mod repo;

use axum::routing::get;
use axum::Router;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/entries/:date",
            get(handlers::list_entries)
                .post(handlers::create_entry)
                .delete(handlers::delete_entry),
        )
        .route("/food-history", get(handlers::food_history))
}
