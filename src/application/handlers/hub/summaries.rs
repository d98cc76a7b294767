//! Host-name resolution shared by the hub queries.

use futures::future::join_all;

use crate::domain::hub::{Hub, HubSummary};
use crate::ports::UserRepository;

/// Projects hubs into summaries, looking hosts up concurrently.
///
/// A hub whose host cannot be resolved is dropped from the result and
/// logged. Input order is preserved for the rest.
pub(crate) async fn summarize(users: &dyn UserRepository, hubs: Vec<Hub>) -> Vec<HubSummary> {
    let lookups = hubs.iter().map(|hub| users.find_by_id(&hub.host_id));
    let hosts = join_all(lookups).await;

    hubs.iter()
        .zip(hosts)
        .filter_map(|(hub, host)| match host {
            Ok(Some(user)) => Some(HubSummary::new(hub, user.display_name())),
            Ok(None) => {
                tracing::warn!(hub_id = %hub.id, host_id = %hub.host_id, "Hub host not found, skipping");
                None
            }
            Err(err) => {
                tracing::warn!(hub_id = %hub.id, error = %err, "Hub host lookup failed, skipping");
                None
            }
        })
        .collect()
}
