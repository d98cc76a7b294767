//! Hub status state machine.

use crate::domain::foundation::{StateMachine, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle status of a hub.
///
/// `Full` is persisted explicitly so nothing downstream recomputes fullness
/// from the member count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HubStatus {
    /// Accepting members.
    Open,

    /// Member count reached `max_members`.
    Full,

    /// Called off. Terminal.
    Cancelled,
}

impl HubStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            HubStatus::Open => "open",
            HubStatus::Full => "full",
            HubStatus::Cancelled => "cancelled",
        }
    }
}

impl StateMachine for HubStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use HubStatus::*;
        matches!(
            (self, target),
            (Open, Full) | (Open, Cancelled) | (Full, Cancelled)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use HubStatus::*;
        match self {
            Open => vec![Full, Cancelled],
            Full => vec![Cancelled],
            Cancelled => vec![],
        }
    }
}

impl fmt::Display for HubStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HubStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(HubStatus::Open),
            "full" => Ok(HubStatus::Full),
            "cancelled" => Ok(HubStatus::Cancelled),
            other => Err(ValidationError::invalid_format(
                "status",
                format!("unknown hub status '{}'", other),
            )),
        }
    }
}
