//! Path and body identifier parsing.

use crate::adapters::http::error::ApiError;
use crate::domain::foundation::{HubId, UserId, ValidationError};

pub fn parse_hub_id(raw: &str) -> Result<HubId, ApiError> {
    raw.trim()
        .parse::<HubId>()
        .map_err(|_| ApiError::bad_request("Invalid BHub ID").with_field("bhub_id"))
}

pub fn parse_user_id(raw: String, field: &str) -> Result<UserId, ApiError> {
    UserId::new(raw).map_err(|_| ValidationError::empty_field(field).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn malformed_hub_id_is_bad_request() {
        let err = parse_hub_id("not-a-uuid").unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn hub_id_parses_uuid() {
        let id = HubId::new();
        assert_eq!(parse_hub_id(&id.to_string()).unwrap(), id);
    }

    #[test]
    fn blank_user_id_is_bad_request() {
        let err = parse_user_id("  ".to_string(), "user_id").unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }
}
