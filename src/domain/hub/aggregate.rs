//! Hub aggregate.
//!
//! A hub is a scheduled activity whose total cost is split evenly across
//! `max_members` seats. The host always holds the first seat.
//!
//! # Invariants
//!
//! - `members.len() <= max_members`
//! - `host_id` is `members[0]` and is never removed
//! - `members` has no duplicates and keeps first-join order
//! - `price_per_person == price_total / max_members`, fixed at creation
//! - `status == Full` exactly when the hub is not cancelled and every seat is taken
//!
//! `version` is owned by the store. Domain mutations never touch it; a
//! repository `update` only succeeds when the stored version still matches.

use serde::{Deserialize, Serialize};

use super::{HubError, HubStatus};
use crate::domain::foundation::{HubId, StateMachine, Timestamp, UserId, ValidationError};

/// Input for creating a hub. Capacities are signed so that non-positive
/// values can be reported as a domain error instead of a decode failure.
#[derive(Debug, Clone)]
pub struct HubParams {
    pub host_id: UserId,
    pub location: String,
    pub time_slot: Timestamp,
    pub min_members: i64,
    pub max_members: i64,
    pub price_total: f64,
}

/// Outcome of an admission attempt that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    Joined,
    AlreadyMember,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hub {
    pub id: HubId,
    pub host_id: UserId,
    pub location: String,
    pub time_slot: Timestamp,
    pub min_members: u32,
    pub max_members: u32,
    pub price_total: f64,
    pub price_per_person: f64,
    pub status: HubStatus,
    pub members: Vec<UserId>,
    pub version: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Hub {
    /// Validates `params` and opens a new hub with the host seated.
    ///
    /// Host existence is checked by the caller; this only covers rules the
    /// aggregate can decide on its own.
    pub fn create(params: HubParams, now: Timestamp) -> Result<Self, HubError> {
        let location = params.location.trim().to_string();
        if location.is_empty() {
            return Err(ValidationError::empty_field("location").into());
        }

        if params.min_members <= 0
            || params.max_members <= 0
            || params.min_members > params.max_members
            || params.max_members > i64::from(u32::MAX)
        {
            return Err(HubError::InvalidCapacity {
                min: params.min_members,
                max: params.max_members,
            });
        }

        if !params.price_total.is_finite() || params.price_total <= 0.0 {
            return Err(HubError::InvalidPrice);
        }

        if params.time_slot.is_before(&now) {
            return Err(HubError::InvalidTimeSlot);
        }

        let max_members = params.max_members as u32;
        let status = if max_members == 1 {
            HubStatus::Full
        } else {
            HubStatus::Open
        };

        Ok(Self {
            id: HubId::new(),
            members: vec![params.host_id.clone()],
            host_id: params.host_id,
            location,
            time_slot: params.time_slot,
            min_members: params.min_members as u32,
            max_members,
            price_total: params.price_total,
            price_per_person: params.price_total / f64::from(max_members),
            status,
            version: 0,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn current_members(&self) -> usize {
        self.members.len()
    }

    pub fn is_member(&self, user_id: &UserId) -> bool {
        self.members.iter().any(|m| m == user_id)
    }

    fn seats_taken(&self) -> bool {
        self.members.len() >= self.max_members as usize
    }

    /// Admits `user_id`, or reports why not.
    ///
    /// Checks run in a fixed order: cancelled hubs reject everyone, existing
    /// members get an idempotent success, then capacity is enforced.
    pub fn admit(&mut self, user_id: &UserId, now: Timestamp) -> Result<Admission, HubError> {
        if self.status == HubStatus::Cancelled {
            return Err(HubError::NotOpen {
                id: self.id,
                status: self.status,
            });
        }

        if self.is_member(user_id) {
            return Ok(Admission::AlreadyMember);
        }

        if self.status == HubStatus::Full || self.seats_taken() {
            return Err(HubError::Full {
                id: self.id,
                max_members: self.max_members,
            });
        }

        self.members.push(user_id.clone());
        if self.seats_taken() {
            self.status = self.transition(HubStatus::Full)?;
        }
        self.updated_at = now;
        Ok(Admission::Joined)
    }

    /// Moves the hub to `Cancelled`. Fails if it already is.
    pub fn cancel(&mut self, now: Timestamp) -> Result<(), HubError> {
        if self.status == HubStatus::Cancelled {
            return Err(HubError::AlreadyCancelled(self.id));
        }
        self.status = self.transition(HubStatus::Cancelled)?;
        self.updated_at = now;
        Ok(())
    }

    /// True when the hub should appear in the open listing at `now`.
    pub fn is_listed_open(&self, now: &Timestamp) -> bool {
        self.status == HubStatus::Open && !self.time_slot.is_before(now)
    }

    fn transition(&self, target: HubStatus) -> Result<HubStatus, HubError> {
        self.status
            .transition_to(target)
            .map_err(|_| HubError::InvalidTransition {
                from: self.status,
                to: target,
            })
    }
}
