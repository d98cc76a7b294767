//! User handlers: login provisioning and profile lookup.

mod get_user;
mod login;

pub use get_user::GetUserHandler;
pub use login::{LoginCommand, LoginHandler, LoginResult};
