//! ListOpenHubsHandler - joinable hubs that have not started yet.

use std::sync::Arc;

use super::summaries::summarize;
use crate::application::handlers::retry::retry_transient;
use crate::domain::foundation::Timestamp;
use crate::domain::hub::{HubError, HubSummary};
use crate::ports::{HubRepository, UserRepository};

#[derive(Debug, Clone)]
pub struct ListOpenHubsQuery {
    pub now: Timestamp,
}

pub struct ListOpenHubsHandler {
    users: Arc<dyn UserRepository>,
    hubs: Arc<dyn HubRepository>,
}

impl ListOpenHubsHandler {
    pub fn new(users: Arc<dyn UserRepository>, hubs: Arc<dyn HubRepository>) -> Self {
        Self { users, hubs }
    }

    pub async fn handle(&self, query: ListOpenHubsQuery) -> Result<Vec<HubSummary>, HubError> {
        let hubs = retry_transient("list_open_hubs", || self.hubs.list_open(query.now)).await?;
        Ok(summarize(self.users.as_ref(), hubs).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryHubRepository, InMemoryUserRepository};
    use crate::domain::foundation::{UserId, VerifiedIdentity};
    use crate::domain::hub::{Hub, HubParams};
    use crate::domain::user::User;

    fn hub_hosted_by(host: &str, hours: i64) -> Hub {
        Hub::create(
            HubParams {
                host_id: UserId::new(host).unwrap(),
                location: format!("Court of {}", host),
                time_slot: Timestamp::now().plus_hours(hours),
                min_members: 1,
                max_members: 4,
                price_total: 100.0,
            },
            Timestamp::now(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn lists_open_hubs_with_host_names_and_skips_orphans() {
        let users = InMemoryUserRepository::new();
        users
            .insert(User::provision(
                &VerifiedIdentity {
                    subject: UserId::new("thu").unwrap(),
                    name: "Thu Nguyen".to_string(),
                    email: "thu@example.com".to_string(),
                    photo_url: None,
                    email_verified: true,
                },
                Timestamp::now(),
            ))
            .await;
        let hubs = InMemoryHubRepository::new();
        let hosted = hub_hosted_by("thu", 2);
        hubs.save(&hosted).await.unwrap();
        hubs.save(&hub_hosted_by("vanished", 3)).await.unwrap();

        let handler = ListOpenHubsHandler::new(Arc::new(users), Arc::new(hubs));
        let listed = handler
            .handle(ListOpenHubsQuery {
                now: Timestamp::now(),
            })
            .await
            .unwrap();

        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, hosted.id);
        assert_eq!(listed[0].host, "Thu Nguyen");
        assert_eq!(listed[0].current_members, 1);
    }

    #[tokio::test]
    async fn empty_store_lists_nothing() {
        let handler = ListOpenHubsHandler::new(
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(InMemoryHubRepository::new()),
        );
        let listed = handler
            .handle(ListOpenHubsQuery {
                now: Timestamp::now(),
            })
            .await
            .unwrap();
        assert!(listed.is_empty());
    }
}
