//! Read model returned by the hub listing and detail queries.

use serde::Serialize;

use super::{Hub, HubStatus};
use crate::domain::foundation::{HubId, Timestamp};

/// Display projection of a hub.
///
/// Carries the host's display name instead of the raw host id and a member
/// count instead of the member list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HubSummary {
    pub id: HubId,
    pub location: String,
    pub time_slot: Timestamp,
    pub min_members: u32,
    pub max_members: u32,
    pub current_members: usize,
    pub price_total: f64,
    pub price_per_person: f64,
    pub host: String,
    pub status: HubStatus,
    pub created_at: Timestamp,
}

impl HubSummary {
    pub fn new(hub: &Hub, host_name: impl Into<String>) -> Self {
        Self {
            id: hub.id,
            location: hub.location.clone(),
            time_slot: hub.time_slot,
            min_members: hub.min_members,
            max_members: hub.max_members,
            current_members: hub.current_members(),
            price_total: hub.price_total,
            price_per_person: hub.price_per_person,
            host: host_name.into(),
            status: hub.status,
            created_at: hub.created_at,
        }
    }
}
