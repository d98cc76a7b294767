//! HTTP adapters - REST API implementations.
//!
//! Each resource has its own router; [`router`] merges them and puts every
//! route except login and health behind the bearer-token middleware.

pub mod auth;
pub mod error;
pub mod health;
pub mod hub;
pub mod middleware;
pub mod params;
pub mod payment;
pub mod state;
pub mod user;

pub use error::{ApiError, ErrorResponse};
pub use state::AppState;

use axum::{middleware::from_fn_with_state, routing::get, Router};

/// Builds the full API router.
pub fn router(state: AppState) -> Router {
    let protected = Router::new()
        .nest("/bhub", hub::hub_routes())
        .nest("/payment", payment::payment_routes())
        .nest("/api/users", user::user_routes())
        .route_layer(from_fn_with_state(
            state.sessions.clone(),
            middleware::auth_middleware,
        ));

    Router::new()
        .route("/health", get(health::health))
        .nest("/auth", auth::auth_routes())
        .merge(protected)
        .with_state(state)
}
