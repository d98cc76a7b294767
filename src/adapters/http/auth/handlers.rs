//! HTTP handler for Google login.

use axum::{
    extract::{rejection::JsonRejection, State},
    response::IntoResponse,
    Json,
};

use crate::adapters::http::error::ApiError;
use crate::adapters::http::state::AppState;
use crate::application::handlers::LoginCommand;
use crate::domain::foundation::ValidationError;

use super::dto::{LoginRequest, LoginResponse};

/// POST /auth/google/login
pub async fn google_login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = payload?;
    if req.id_token.trim().is_empty() {
        return Err(ValidationError::empty_field("id_token").into());
    }

    let result = state
        .login_handler()
        .handle(LoginCommand {
            credential: req.id_token,
        })
        .await?;
    Ok(Json(LoginResponse::from(result)))
}
