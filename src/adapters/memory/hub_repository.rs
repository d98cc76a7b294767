//! In-memory hub store.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, HubId, Timestamp};
use crate::domain::hub::{Hub, HubStatus};
use crate::ports::HubRepository;

#[derive(Debug, Clone, Default)]
pub struct InMemoryHubRepository {
    hubs: Arc<RwLock<HashMap<HubId, Hub>>>,
}

impl InMemoryHubRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn count(&self) -> usize {
        self.hubs.read().await.len()
    }

    fn sorted_by_slot(mut hubs: Vec<Hub>) -> Vec<Hub> {
        hubs.sort_by(|a, b| a.time_slot.cmp(&b.time_slot));
        hubs
    }
}

#[async_trait]
impl HubRepository for InMemoryHubRepository {
    async fn save(&self, hub: &Hub) -> Result<(), DomainError> {
        let mut hubs = self.hubs.write().await;
        if hubs.contains_key(&hub.id) {
            return Err(DomainError::new(
                ErrorCode::ConcurrencyConflict,
                format!("Hub already exists: {}", hub.id),
            ));
        }
        hubs.insert(hub.id, hub.clone());
        Ok(())
    }

    async fn update(&self, hub: &Hub) -> Result<i64, DomainError> {
        let mut hubs = self.hubs.write().await;
        let stored = hubs.get_mut(&hub.id).ok_or_else(|| {
            DomainError::new(ErrorCode::HubNotFound, format!("Hub not found: {}", hub.id))
        })?;

        if stored.version != hub.version {
            return Err(DomainError::new(
                ErrorCode::ConcurrencyConflict,
                format!(
                    "Hub {} was modified (expected version {}, found {})",
                    hub.id, hub.version, stored.version
                ),
            ));
        }

        let next = hub.version + 1;
        *stored = Hub {
            version: next,
            ..hub.clone()
        };
        Ok(next)
    }

    async fn find_by_id(&self, id: &HubId) -> Result<Option<Hub>, DomainError> {
        Ok(self.hubs.read().await.get(id).cloned())
    }

    async fn list_open(&self, now: Timestamp) -> Result<Vec<Hub>, DomainError> {
        let hubs = self.hubs.read().await;
        Ok(Self::sorted_by_slot(
            hubs.values()
                .filter(|h| h.is_listed_open(&now))
                .cloned()
                .collect(),
        ))
    }

    async fn list_upcoming(
        &self,
        now: Timestamp,
        until: Timestamp,
    ) -> Result<Vec<Hub>, DomainError> {
        let hubs = self.hubs.read().await;
        Ok(Self::sorted_by_slot(
            hubs.values()
                .filter(|h| {
                    h.status == HubStatus::Open
                        && !h.time_slot.is_before(&now)
                        && !h.time_slot.is_after(&until)
                })
                .cloned()
                .collect(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::UserId;
    use crate::domain::hub::HubParams;

    fn hub_in(hours: i64) -> Hub {
        Hub::create(
            HubParams {
                host_id: UserId::new("host").unwrap(),
                location: "Long Bien".to_string(),
                time_slot: Timestamp::now().plus_hours(hours),
                min_members: 1,
                max_members: 4,
                price_total: 120.0,
            },
            Timestamp::now(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn update_bumps_version() {
        let repo = InMemoryHubRepository::new();
        let mut hub = hub_in(2);
        repo.save(&hub).await.unwrap();

        hub.location = "Hoan Kiem".to_string();
        assert_eq!(repo.update(&hub).await.unwrap(), 1);

        let stored = repo.find_by_id(&hub.id).await.unwrap().unwrap();
        assert_eq!(stored.version, 1);
        assert_eq!(stored.location, "Hoan Kiem");
    }

    #[tokio::test]
    async fn stale_update_is_refused() {
        let repo = InMemoryHubRepository::new();
        let hub = hub_in(2);
        repo.save(&hub).await.unwrap();

        let first = hub.clone();
        let second = hub.clone();
        repo.update(&first).await.unwrap();
        let err = repo.update(&second).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ConcurrencyConflict);
    }

    #[tokio::test]
    async fn update_of_unknown_hub_is_not_found() {
        let repo = InMemoryHubRepository::new();
        let err = repo.update(&hub_in(1)).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::HubNotFound);
    }

    #[tokio::test]
    async fn duplicate_save_is_rejected() {
        let repo = InMemoryHubRepository::new();
        let hub = hub_in(1);
        repo.save(&hub).await.unwrap();
        assert!(repo.save(&hub).await.is_err());
    }

    #[tokio::test]
    async fn list_open_skips_cancelled_and_sorts_by_slot() {
        let repo = InMemoryHubRepository::new();
        let late = hub_in(10);
        let early = hub_in(1);
        let mut cancelled = hub_in(5);
        cancelled.cancel(Timestamp::now()).unwrap();
        for hub in [&late, &early, &cancelled] {
            repo.save(hub).await.unwrap();
        }

        let open = repo.list_open(Timestamp::now()).await.unwrap();
        let ids: Vec<_> = open.iter().map(|h| h.id).collect();
        assert_eq!(ids, vec![early.id, late.id]);
    }

    #[tokio::test]
    async fn list_upcoming_respects_window() {
        let repo = InMemoryHubRepository::new();
        let soon = hub_in(3);
        let later = hub_in(30);
        repo.save(&soon).await.unwrap();
        repo.save(&later).await.unwrap();

        let now = Timestamp::now();
        let within_day = repo.list_upcoming(now, now.plus_hours(24)).await.unwrap();
        assert_eq!(within_day.len(), 1);
        assert_eq!(within_day[0].id, soon.id);
    }
}
