//! Request and response bodies for hub endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::application::handlers::JoinHubResult;
use crate::domain::foundation::HubId;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateHubRequest {
    #[serde(alias = "hostId")]
    pub host_id: String,
    pub location: String,
    #[serde(alias = "timeSlot")]
    pub time_slot: DateTime<Utc>,
    #[serde(alias = "minMembers")]
    pub min_members: i64,
    #[serde(alias = "maxMembers")]
    pub max_members: i64,
    #[serde(alias = "priceTotal")]
    pub price_total: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateHubResponse {
    pub bhub_id: HubId,
    pub price_per_person: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JoinHubRequest {
    #[serde(alias = "userId")]
    pub user_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JoinHubResponse {
    pub message: String,
    pub total_price: f64,
    pub current_members: usize,
}

impl From<JoinHubResult> for JoinHubResponse {
    fn from(result: JoinHubResult) -> Self {
        Self {
            message: result.message().to_string(),
            total_price: result.total_price,
            current_members: result.current_members,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpcomingQuery {
    pub within_hours: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_request_accepts_camel_case() {
        let req: CreateHubRequest = serde_json::from_value(serde_json::json!({
            "hostId": "u1",
            "location": "Ba Dinh court 3",
            "timeSlot": "2030-01-01T18:00:00Z",
            "minMembers": 2,
            "maxMembers": 4,
            "priceTotal": 400.0
        }))
        .unwrap();
        assert_eq!(req.host_id, "u1");
        assert_eq!(req.max_members, 4);
    }

    #[test]
    fn create_request_requires_time_slot() {
        let result: Result<CreateHubRequest, _> = serde_json::from_value(serde_json::json!({
            "host_id": "u1",
            "location": "x",
            "min_members": 1,
            "max_members": 2,
            "price_total": 10.0
        }));
        assert!(result.is_err());
    }
}
