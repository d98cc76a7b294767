//! HTTP routes for hub endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{create_hub, get_hub, join_hub, list_open_hubs, list_upcoming_hubs};
use crate::adapters::http::state::AppState;

/// Hub routes, mounted at `/bhub`.
pub fn hub_routes() -> Router<AppState> {
    Router::new()
        .route("/create", post(create_hub))
        .route("/list", get(list_open_hubs))
        .route("/upcoming", get(list_upcoming_hubs))
        .route("/:id", get(get_hub))
        .route("/:id/join", post(join_hub))
}
