//! CreateHubHandler - opens a new hub with the host seated.

use std::sync::Arc;

use crate::application::handlers::retry::retry_transient;
use crate::domain::foundation::{Timestamp, UserId};
use crate::domain::hub::{Hub, HubError, HubParams};
use crate::ports::{HubRepository, UserRepository};

#[derive(Debug, Clone)]
pub struct CreateHubCommand {
    pub host_id: UserId,
    pub location: String,
    pub time_slot: Timestamp,
    pub min_members: i64,
    pub max_members: i64,
    pub price_total: f64,
}

pub struct CreateHubHandler {
    users: Arc<dyn UserRepository>,
    hubs: Arc<dyn HubRepository>,
}

impl CreateHubHandler {
    pub fn new(users: Arc<dyn UserRepository>, hubs: Arc<dyn HubRepository>) -> Self {
        Self { users, hubs }
    }

    pub async fn handle(&self, cmd: CreateHubCommand) -> Result<Hub, HubError> {
        // 1. Host must be a known user
        let host = retry_transient("find_user", || self.users.find_by_id(&cmd.host_id)).await?;
        if host.is_none() {
            return Err(HubError::InvalidHost(cmd.host_id));
        }

        // 2. Validate and build
        let hub = Hub::create(
            HubParams {
                host_id: cmd.host_id,
                location: cmd.location,
                time_slot: cmd.time_slot,
                min_members: cmd.min_members,
                max_members: cmd.max_members,
                price_total: cmd.price_total,
            },
            Timestamp::now(),
        )?;

        // 3. Persist
        self.hubs.save(&hub).await?;

        tracing::info!(
            hub_id = %hub.id,
            host_id = %hub.host_id,
            max_members = hub.max_members,
            price_per_person = hub.price_per_person,
            "Hub created"
        );

        Ok(hub)
    }
}
