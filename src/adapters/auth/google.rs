//! Google ID-token verification.
//!
//! Posts nothing and caches nothing: each login asks Google's tokeninfo
//! endpoint whether the ID token is genuine, then checks that it was minted
//! for our OAuth client.
//!
//! # Security
//!
//! - **Audience (aud)**: must equal the configured client id. A token issued
//!   to another application is rejected even if Google says it is valid.
//! - **Subject (sub)**: required; becomes the user id.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::foundation::{AuthError, UserId, VerifiedIdentity};
use crate::ports::IdentityProvider;

pub const DEFAULT_TOKENINFO_URL: &str = "https://oauth2.googleapis.com/tokeninfo";

/// Subset of the tokeninfo response we read. Google returns every claim as
/// a string, including booleans.
#[derive(Debug, Deserialize)]
struct TokenInfo {
    aud: String,
    sub: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    email_verified: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    picture: Option<String>,
}

impl TokenInfo {
    fn into_identity(self, expected_audience: &str) -> Result<VerifiedIdentity, AuthError> {
        if self.aud != expected_audience {
            tracing::warn!(aud = %self.aud, "Google token issued for another client");
            return Err(AuthError::AudienceMismatch);
        }

        let subject = UserId::new(self.sub).map_err(|_| AuthError::InvalidToken)?;
        let email = self.email.unwrap_or_default();
        let name = self
            .name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| email.clone());

        Ok(VerifiedIdentity {
            subject,
            name,
            email,
            photo_url: self.picture,
            email_verified: self.email_verified.as_deref() == Some("true"),
        })
    }
}

/// `IdentityProvider` backed by Google's tokeninfo endpoint.
pub struct GoogleIdentityProvider {
    client_id: String,
    tokeninfo_url: String,
    http_client: reqwest::Client,
}

impl GoogleIdentityProvider {
    pub fn new(
        client_id: impl Into<String>,
        tokeninfo_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, AuthError> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AuthError::service_unavailable(format!("http client: {}", e)))?;

        Ok(Self {
            client_id: client_id.into(),
            tokeninfo_url: tokeninfo_url.into(),
            http_client,
        })
    }
}

#[async_trait]
impl IdentityProvider for GoogleIdentityProvider {
    async fn verify(&self, credential: &str) -> Result<VerifiedIdentity, AuthError> {
        tracing::debug!("Validating Google ID token with tokeninfo endpoint");

        let response = self
            .http_client
            .get(&self.tokeninfo_url)
            .query(&[("id_token", credential)])
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "HTTP error contacting Google tokeninfo endpoint");
                AuthError::service_unavailable(format!("tokeninfo unreachable: {}", e))
            })?;

        let status = response.status();
        if status.is_client_error() {
            tracing::warn!(http_status = %status, "Google rejected the ID token");
            return Err(AuthError::InvalidToken);
        }
        if !status.is_success() {
            tracing::error!(http_status = %status, "Google tokeninfo returned error status");
            return Err(AuthError::service_unavailable(format!(
                "tokeninfo returned {}",
                status
            )));
        }

        let info: TokenInfo = response.json().await.map_err(|e| {
            tracing::warn!(error = %e, "Malformed tokeninfo response");
            AuthError::InvalidToken
        })?;

        info.into_identity(&self.client_id)
    }
}
