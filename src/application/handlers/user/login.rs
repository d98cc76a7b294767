//! LoginHandler - exchange an identity-provider credential for a session token.
//!
//! First login provisions the user; later logins refresh the stored profile
//! from the provider. The refresh write is best-effort: a stale profile
//! never blocks a login.

use std::sync::Arc;

use crate::application::handlers::retry::retry_transient;
use crate::domain::foundation::{AuthError, DomainError, Timestamp, VerifiedIdentity};
use crate::domain::user::{User, UserError};
use crate::ports::{IdentityProvider, TokenIssuer, UserRepository};

#[derive(Debug, Clone)]
pub struct LoginCommand {
    /// Provider credential, e.g. a Google ID token.
    pub credential: String,
}

#[derive(Debug, Clone)]
pub struct LoginResult {
    pub user: User,
    pub token: String,
    /// True when this login provisioned the account.
    pub created: bool,
}

pub struct LoginHandler {
    identity: Arc<dyn IdentityProvider>,
    users: Arc<dyn UserRepository>,
    tokens: Arc<dyn TokenIssuer>,
}

impl LoginHandler {
    pub fn new(
        identity: Arc<dyn IdentityProvider>,
        users: Arc<dyn UserRepository>,
        tokens: Arc<dyn TokenIssuer>,
    ) -> Self {
        Self {
            identity,
            users,
            tokens,
        }
    }

    pub async fn handle(&self, cmd: LoginCommand) -> Result<LoginResult, UserError> {
        // 1. Verify the credential
        let credential = cmd.credential.trim();
        if credential.is_empty() {
            return Err(AuthError::InvalidToken.into());
        }
        let identity = self.identity.verify(credential).await?;
        let now = Timestamp::now();

        // 2. Provision or refresh
        let existing = retry_transient("find_user", || self.users.find_by_id(&identity.subject)).await?;
        let (user, created) = match existing {
            Some(user) => (self.refresh(user, &identity, now).await, false),
            None => self.provision(&identity, now).await?,
        };

        // 3. Issue session token
        let token = self.tokens.issue(&user)?;

        tracing::info!(user_id = %user.id, created, "User logged in");

        Ok(LoginResult {
            user,
            token,
            created,
        })
    }

    async fn provision(
        &self,
        identity: &VerifiedIdentity,
        now: Timestamp,
    ) -> Result<(User, bool), UserError> {
        let user = User::provision(identity, now);
        let inserted =
            retry_transient("insert_user", || self.users.insert_if_absent(&user)).await?;
        if inserted {
            return Ok((user, true));
        }

        // A concurrent first login won the insert; continue with its record.
        let winner = retry_transient("find_user", || self.users.find_by_id(&identity.subject))
            .await?
            .ok_or_else(|| {
                DomainError::database(format!("user {} vanished after insert", identity.subject))
            })?;
        Ok((self.refresh(winner, identity, now).await, false))
    }

    async fn refresh(&self, mut user: User, identity: &VerifiedIdentity, now: Timestamp) -> User {
        user.refresh_from(identity, now);
        if let Err(err) = self.users.update(&user).await {
            tracing::warn!(user_id = %user.id, error = %err, "Profile refresh on login failed");
        }
        user
    }
}
