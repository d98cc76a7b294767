//! HTTP adapter for login.
//!
//! - `POST /auth/google/login` - Exchange a Google ID token for a session token

mod dto;
mod handlers;

pub use dto::{LoginRequest, LoginResponse};

use axum::{routing::post, Router};

use crate::adapters::http::state::AppState;

/// Login routes, mounted at `/auth`. No bearer token required.
pub fn auth_routes() -> Router<AppState> {
    Router::new().route("/google/login", post(handlers::google_login))
}
