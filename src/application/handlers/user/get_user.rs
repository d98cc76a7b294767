//! GetUserHandler - a user profile by id.

use std::sync::Arc;

use crate::application::handlers::retry::retry_transient;
use crate::domain::foundation::UserId;
use crate::domain::user::{User, UserError};
use crate::ports::UserRepository;

pub struct GetUserHandler {
    users: Arc<dyn UserRepository>,
}

impl GetUserHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn handle(&self, user_id: &UserId) -> Result<User, UserError> {
        retry_transient("find_user", || self.users.find_by_id(user_id))
            .await?
            .ok_or_else(|| UserError::NotFound(user_id.clone()))
    }
}
