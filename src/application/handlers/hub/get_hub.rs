//! GetHubHandler - one hub's summary.

use std::sync::Arc;

use crate::application::handlers::retry::retry_transient;
use crate::domain::foundation::HubId;
use crate::domain::hub::{HubError, HubSummary};
use crate::ports::{HubRepository, UserRepository};

#[derive(Debug, Clone)]
pub struct GetHubQuery {
    pub hub_id: HubId,
}

pub struct GetHubHandler {
    users: Arc<dyn UserRepository>,
    hubs: Arc<dyn HubRepository>,
}

impl GetHubHandler {
    pub fn new(users: Arc<dyn UserRepository>, hubs: Arc<dyn HubRepository>) -> Self {
        Self { users, hubs }
    }

    /// A hub whose host cannot be resolved is reported as not found.
    pub async fn handle(&self, query: GetHubQuery) -> Result<HubSummary, HubError> {
        let hub = retry_transient("find_hub", || self.hubs.find_by_id(&query.hub_id))
            .await?
            .ok_or(HubError::NotFound(query.hub_id))?;

        match retry_transient("find_user", || self.users.find_by_id(&hub.host_id)).await {
            Ok(Some(host)) => Ok(HubSummary::new(&hub, host.display_name())),
            Ok(None) => {
                tracing::warn!(hub_id = %hub.id, host_id = %hub.host_id, "Hub host missing");
                Err(HubError::NotFound(query.hub_id))
            }
            Err(err) => {
                tracing::warn!(hub_id = %hub.id, error = %err, "Hub host lookup failed");
                Err(HubError::NotFound(query.hub_id))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryHubRepository, InMemoryUserRepository};
    use crate::domain::foundation::{Timestamp, UserId, VerifiedIdentity};
    use crate::domain::hub::{Hub, HubParams, HubStatus};
    use crate::domain::user::User;

    fn hub(host: &str) -> Hub {
        Hub::create(
            HubParams {
                host_id: UserId::new(host).unwrap(),
                location: "Hai Ba Trung".to_string(),
                time_slot: Timestamp::now().plus_hours(8),
                min_members: 2,
                max_members: 3,
                price_total: 90.0,
            },
            Timestamp::now(),
        )
        .unwrap()
    }

    async fn setup() -> (GetHubHandler, InMemoryHubRepository) {
        let users = InMemoryUserRepository::new();
        users
            .insert(User::provision(
                &VerifiedIdentity {
                    subject: UserId::new("lan").unwrap(),
                    name: "Lan".to_string(),
                    email: "lan@example.com".to_string(),
                    photo_url: None,
                    email_verified: true,
                },
                Timestamp::now(),
            ))
            .await;
        let hubs = InMemoryHubRepository::new();
        (
            GetHubHandler::new(Arc::new(users), Arc::new(hubs.clone())),
            hubs,
        )
    }

    #[tokio::test]
    async fn returns_summary_for_cancelled_hubs_too() {
        let (handler, hubs) = setup().await;
        let mut h = hub("lan");
        h.cancel(Timestamp::now()).unwrap();
        hubs.save(&h).await.unwrap();

        let summary = handler.handle(GetHubQuery { hub_id: h.id }).await.unwrap();
        assert_eq!(summary.host, "Lan");
        assert_eq!(summary.status, HubStatus::Cancelled);
        assert_eq!(summary.price_per_person, 30.0);
    }

    #[tokio::test]
    async fn missing_hub_is_not_found() {
        let (handler, _) = setup().await;
        let err = handler
            .handle(GetHubQuery {
                hub_id: HubId::new(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, HubError::NotFound(_)));
    }

    #[tokio::test]
    async fn orphaned_hub_is_not_found() {
        let (handler, hubs) = setup().await;
        let h = hub("ghost");
        hubs.save(&h).await.unwrap();
        let err = handler.handle(GetHubQuery { hub_id: h.id }).await.unwrap_err();
        assert!(matches!(err, HubError::NotFound(id) if id == h.id));
    }
}
