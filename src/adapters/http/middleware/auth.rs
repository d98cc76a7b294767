//! Bearer-token gate for the protected routes.
//!
//! [`auth_middleware`] resolves `Authorization: Bearer <token>` through the
//! `SessionValidator` port and stores the resulting [`AuthenticatedUser`] in
//! the request extensions. Handlers take [`RequireAuth`] to read it back.
//! Missing, malformed and rejected tokens never reach a handler.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::adapters::http::error::ApiError;
use crate::domain::foundation::AuthenticatedUser;
use crate::ports::SessionValidator;

pub type AuthState = Arc<dyn SessionValidator>;

pub const MISSING_HEADER: &str = "Authorization header is required";
pub const MALFORMED_HEADER: &str = "Authorization header format must be Bearer {token}";

/// Pulls the token out of `Authorization: Bearer <token>`.
fn bearer_token(header: Option<&str>) -> Result<&str, ApiError> {
    let header = header
        .map(str::trim)
        .filter(|h| !h.is_empty())
        .ok_or_else(|| ApiError::unauthorized(MISSING_HEADER))?;

    let mut parts = header.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(scheme), Some(token), None) if scheme.eq_ignore_ascii_case("bearer") => Ok(token),
        _ => Err(ApiError::unauthorized(MALFORMED_HEADER)),
    }
}

pub async fn auth_middleware(
    State(validator): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Response {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match bearer_token(header) {
        Ok(token) => token.to_string(),
        Err(rejection) => return rejection.into_response(),
    };

    match validator.validate(&token).await {
        Ok(user) => {
            tracing::debug!(user_id = %user.id, "Request authenticated");
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(err) => {
            if err.is_transient() {
                tracing::error!(error = %err, "Session validation unavailable");
            }
            ApiError::from(err).into_response()
        }
    }
}

/// The caller placed in the extensions by [`auth_middleware`].
///
/// Only valid on routes behind the middleware; elsewhere it rejects with 401.
#[derive(Debug, Clone)]
pub struct RequireAuth(pub AuthenticatedUser);

impl<S> axum::extract::FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut axum::http::request::Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            parts
                .extensions
                .get::<AuthenticatedUser>()
                .cloned()
                .map(RequireAuth)
                .ok_or_else(|| ApiError::unauthorized(MISSING_HEADER))
        })
    }
}
