//! Login request and response bodies.

use serde::{Deserialize, Serialize};

use crate::application::handlers::LoginResult;
use crate::domain::user::UserRole;

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    #[serde(alias = "idToken")]
    pub id_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub user_id: String,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    pub role: UserRole,
    pub token: String,
}

impl From<LoginResult> for LoginResponse {
    fn from(result: LoginResult) -> Self {
        let user = result.user;
        Self {
            user_id: user.id.to_string(),
            name: user.name,
            email: user.email,
            photo_url: user.photo_url,
            role: user.role,
            token: result.token,
        }
    }
}
