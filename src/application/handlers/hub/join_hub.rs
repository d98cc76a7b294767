//! JoinHubHandler - membership admission under concurrency.
//!
//! Admission is a load, admit, compare-and-set loop. When the hub changed
//! between load and write the store refuses the write; we reload and decide
//! again against fresh state. Each refusal means another writer made progress,
//! and a hub accepts at most `max_members` joins plus one cancellation, so the
//! loop ends once the hub is full, cancelled or holds this user.

use std::sync::Arc;

use crate::application::handlers::retry::retry_transient;
use crate::domain::foundation::{ErrorCode, HubId, Timestamp, UserId};
use crate::domain::hub::{Admission, Hub, HubError};
use crate::ports::{HubRepository, UserRepository};

#[derive(Debug, Clone)]
pub struct JoinHubCommand {
    pub hub_id: HubId,
    pub user_id: UserId,
}

#[derive(Debug, Clone, PartialEq)]
pub struct JoinHubResult {
    pub hub_id: HubId,
    pub admission: Admission,
    /// What this member owes: the hub's frozen per-person price.
    pub total_price: f64,
    pub current_members: usize,
}

impl JoinHubResult {
    pub fn message(&self) -> &'static str {
        match self.admission {
            Admission::Joined => "Successfully joined BHub",
            Admission::AlreadyMember => "Already a member of this BHub",
        }
    }
}

pub struct JoinHubHandler {
    users: Arc<dyn UserRepository>,
    hubs: Arc<dyn HubRepository>,
}

impl JoinHubHandler {
    pub fn new(users: Arc<dyn UserRepository>, hubs: Arc<dyn HubRepository>) -> Self {
        Self { users, hubs }
    }

    async fn load(&self, id: &HubId) -> Result<Hub, HubError> {
        retry_transient("find_hub", || self.hubs.find_by_id(id))
            .await?
            .ok_or(HubError::NotFound(*id))
    }

    pub async fn handle(&self, cmd: JoinHubCommand) -> Result<JoinHubResult, HubError> {
        // 1. Hub, then user
        let mut hub = self.load(&cmd.hub_id).await?;

        let user = retry_transient("find_user", || self.users.find_by_id(&cmd.user_id)).await?;
        if user.is_none() {
            return Err(HubError::InvalidUser(cmd.user_id));
        }

        // 2. Admit and write back, re-deciding on every conflict
        let mut attempt = 0usize;
        loop {
            attempt += 1;
            let admission = hub.admit(&cmd.user_id, Timestamp::now())?;

            if admission == Admission::AlreadyMember {
                return Ok(Self::result(&hub, admission));
            }

            match self.hubs.update(&hub).await {
                Ok(version) => {
                    hub.version = version;
                    tracing::info!(
                        hub_id = %hub.id,
                        user_id = %cmd.user_id,
                        current_members = hub.current_members(),
                        status = %hub.status,
                        "User joined hub"
                    );
                    return Ok(Self::result(&hub, admission));
                }
                Err(err) if err.code == ErrorCode::ConcurrencyConflict => {
                    tracing::debug!(hub_id = %cmd.hub_id, attempt, "Join lost a version race, reloading");
                    hub = self.load(&cmd.hub_id).await?;
                }
                Err(err) => return Err(HubError::from_store(cmd.hub_id, err)),
            }
        }
    }

    fn result(hub: &Hub, admission: Admission) -> JoinHubResult {
        JoinHubResult {
            hub_id: hub.id,
            admission,
            total_price: hub.price_per_person,
            current_members: hub.current_members(),
        }
    }
}
