//! ListUpcomingHubsHandler - open hubs starting within a time window.

use std::sync::Arc;

use super::summaries::summarize;
use crate::application::handlers::retry::retry_transient;
use crate::domain::foundation::{Timestamp, ValidationError};
use crate::domain::hub::{HubError, HubSummary};
use crate::ports::{HubRepository, UserRepository};

pub const DEFAULT_WINDOW_HOURS: i64 = 24;
pub const MAX_WINDOW_HOURS: i64 = 168;

#[derive(Debug, Clone)]
pub struct ListUpcomingHubsQuery {
    pub now: Timestamp,
    pub within_hours: i64,
}

pub struct ListUpcomingHubsHandler {
    users: Arc<dyn UserRepository>,
    hubs: Arc<dyn HubRepository>,
}

impl ListUpcomingHubsHandler {
    pub fn new(users: Arc<dyn UserRepository>, hubs: Arc<dyn HubRepository>) -> Self {
        Self { users, hubs }
    }

    pub async fn handle(&self, query: ListUpcomingHubsQuery) -> Result<Vec<HubSummary>, HubError> {
        if !(1..=MAX_WINDOW_HOURS).contains(&query.within_hours) {
            return Err(ValidationError::out_of_range(
                "within_hours",
                1,
                MAX_WINDOW_HOURS,
                query.within_hours,
            )
            .into());
        }

        let until = query.now.plus_hours(query.within_hours);
        let hubs =
            retry_transient("list_upcoming_hubs", || self.hubs.list_upcoming(query.now, until))
                .await?;
        Ok(summarize(self.users.as_ref(), hubs).await)
    }
}
