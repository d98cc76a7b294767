//! User aggregate.
//!
//! Users are provisioned the first time the identity provider vouches for
//! them and refreshed on every later login. They are never deleted here.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{Timestamp, UserId, ValidationError, VerifiedIdentity};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[default]
    User,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::User => "user",
            UserRole::Admin => "admin",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(UserRole::User),
            "admin" => Ok(UserRole::Admin),
            other => Err(ValidationError::invalid_format(
                "role",
                format!("unknown role '{}'", other),
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    pub role: UserRole,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl User {
    /// Builds the record for a first-time login.
    pub fn provision(identity: &VerifiedIdentity, now: Timestamp) -> Self {
        Self {
            id: identity.subject.clone(),
            name: identity.name.clone(),
            email: identity.email.clone(),
            photo_url: identity.photo_url.clone(),
            role: UserRole::default(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Copies the provider's current profile and touches `updated_at`.
    /// Role and creation time are ours and stay put.
    pub fn refresh_from(&mut self, identity: &VerifiedIdentity, now: Timestamp) {
        self.name = identity.name.clone();
        self.email = identity.email.clone();
        self.photo_url = identity.photo_url.clone();
        self.updated_at = now;
    }

    /// Name shown to other users, falling back to the email address.
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            &self.email
        } else {
            &self.name
        }
    }
}
