//! HTTP handlers for user endpoints.

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};

use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::params::parse_user_id;
use crate::adapters::http::state::AppState;

/// GET /api/users/:id
pub async fn get_user(
    State(state): State<AppState>,
    RequireAuth(_caller): RequireAuth,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let user_id = parse_user_id(id, "id")?;
    let user = state.get_user_handler().handle(&user_id).await?;
    Ok(Json(user))
}
