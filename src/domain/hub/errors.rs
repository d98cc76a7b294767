//! Hub lifecycle errors.
//!
//! | Error | Kind |
//! |-------|------|
//! | InvalidHost, InvalidUser, NotFound | NotFound |
//! | InvalidCapacity, InvalidPrice, InvalidTimeSlot, Validation | Validation |
//! | NotOpen, Full, AlreadyCancelled, InvalidTransition, ConcurrencyConflict | Conflict |
//! | Store | whatever the store reported |

use thiserror::Error;

use super::HubStatus;
use crate::domain::foundation::{DomainError, ErrorCode, ErrorKind, HubId, UserId, ValidationError};

#[derive(Debug, Clone, Error)]
pub enum HubError {
    #[error("Host {0} does not exist")]
    InvalidHost(UserId),

    #[error("User {0} does not exist")]
    InvalidUser(UserId),

    #[error("Hub {0} not found")]
    NotFound(HubId),

    #[error("Invalid capacity: min_members={min}, max_members={max}")]
    InvalidCapacity { min: i64, max: i64 },

    #[error("Total price must be a positive amount")]
    InvalidPrice,

    #[error("Time slot must be in the future")]
    InvalidTimeSlot,

    #[error("Hub {id} is not open for joining (status: {status})")]
    NotOpen { id: HubId, status: HubStatus },

    #[error("Hub {id} is full ({max_members} members)")]
    Full { id: HubId, max_members: u32 },

    #[error("Hub {0} is already cancelled")]
    AlreadyCancelled(HubId),

    #[error("Hub cannot move from {from} to {to}")]
    InvalidTransition { from: HubStatus, to: HubStatus },

    #[error("Hub {0} was modified concurrently, please retry")]
    ConcurrencyConflict(HubId),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] DomainError),
}

impl HubError {
    pub fn code(&self) -> ErrorCode {
        match self {
            HubError::InvalidHost(_) => ErrorCode::InvalidHost,
            HubError::InvalidUser(_) => ErrorCode::InvalidUser,
            HubError::NotFound(_) => ErrorCode::HubNotFound,
            HubError::InvalidCapacity { .. } => ErrorCode::InvalidCapacity,
            HubError::InvalidPrice => ErrorCode::InvalidPrice,
            HubError::InvalidTimeSlot => ErrorCode::InvalidTimeSlot,
            HubError::NotOpen { .. } => ErrorCode::HubNotOpen,
            HubError::Full { .. } => ErrorCode::HubFull,
            HubError::AlreadyCancelled(_) => ErrorCode::AlreadyCancelled,
            HubError::InvalidTransition { .. } => ErrorCode::InvalidStateTransition,
            HubError::ConcurrencyConflict(_) => ErrorCode::ConcurrencyConflict,
            HubError::Validation(_) => ErrorCode::ValidationFailed,
            HubError::Store(err) => err.code,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.code().kind()
    }

    /// Field-level detail for validation failures.
    pub fn field(&self) -> Option<&str> {
        match self {
            HubError::InvalidCapacity { .. } => Some("max_members"),
            HubError::InvalidPrice => Some("price_total"),
            HubError::InvalidTimeSlot => Some("time_slot"),
            HubError::Validation(err) => Some(err.field()),
            _ => None,
        }
    }

    /// Maps a store error, turning "not found" and version conflicts into
    /// their hub-specific variants.
    pub fn from_store(id: HubId, err: DomainError) -> Self {
        match err.code {
            ErrorCode::HubNotFound => HubError::NotFound(id),
            ErrorCode::ConcurrencyConflict => HubError::ConcurrencyConflict(id),
            _ => HubError::Store(err),
        }
    }
}
