//! Hub module - lifecycle and membership admission.
//!
//! # Lifecycle
//!
//! ```text
//! open ──(last seat taken)──> full
//!   │                          │
//!   └────────> cancelled <─────┘
//! ```

mod aggregate;
mod errors;
mod status;
mod summary;

pub use aggregate::{Admission, Hub, HubParams};
pub use errors::HubError;
pub use status::HubStatus;
pub use summary::HubSummary;
