//! User and login errors.

use thiserror::Error;

use crate::domain::foundation::{AuthError, DomainError, ErrorCode, ErrorKind, UserId};

#[derive(Debug, Clone, Error)]
pub enum UserError {
    #[error("User {0} not found")]
    NotFound(UserId),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Store(#[from] DomainError),
}

impl UserError {
    pub fn code(&self) -> ErrorCode {
        match self {
            UserError::NotFound(_) => ErrorCode::UserNotFound,
            UserError::Auth(err) if err.is_transient() => ErrorCode::IdentityProviderError,
            UserError::Auth(_) => ErrorCode::Unauthorized,
            UserError::Store(err) => err.code,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.code().kind()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_credentials_are_unauthorized() {
        assert_eq!(UserError::from(AuthError::InvalidToken).kind(), ErrorKind::Unauthorized);
        assert_eq!(
            UserError::from(AuthError::AudienceMismatch).kind(),
            ErrorKind::Unauthorized
        );
    }

    #[test]
    fn provider_outage_is_upstream() {
        let err = UserError::from(AuthError::service_unavailable("tokeninfo 503"));
        assert_eq!(err.code(), ErrorCode::IdentityProviderError);
        assert_eq!(err.kind(), ErrorKind::Upstream);
    }

    #[test]
    fn missing_user_is_not_found() {
        let err = UserError::NotFound(UserId::new("ghost").unwrap());
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }
}
