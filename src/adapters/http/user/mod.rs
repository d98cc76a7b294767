//! HTTP adapter for user endpoints.
//!
//! - `GET /api/users/:id` - User profile

mod handlers;

use axum::{routing::get, Router};

use crate::adapters::http::state::AppState;

/// User routes, mounted at `/api/users`.
pub fn user_routes() -> Router<AppState> {
    Router::new().route("/:id", get(handlers::get_user))
}
