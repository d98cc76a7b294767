//! Authentication adapters.
//!
//! Implementations of the `IdentityProvider`, `TokenIssuer` and
//! `SessionValidator` ports:
//!
//! - `google` - Google ID-token verification through the tokeninfo endpoint
//! - `jwt` - HS256 session tokens issued at login and checked per request
//! - `mock` - Test implementations that don't require external services

mod google;
mod jwt;
mod mock;

pub use google::{GoogleIdentityProvider, DEFAULT_TOKENINFO_URL};
pub use jwt::JwtTokenService;
pub use mock::{MockIdentityProvider, MockSessionValidator, MockTokenIssuer};
