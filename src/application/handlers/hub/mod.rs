//! Hub lifecycle handlers.
//!
//! ## Commands
//! - Create a hub
//! - Join a hub
//!
//! ## Queries
//! - List open hubs
//! - List hubs starting soon
//! - Get one hub

mod create_hub;
mod get_hub;
mod join_hub;
mod list_open_hubs;
mod list_upcoming_hubs;
mod summaries;

// Commands
pub use create_hub::{CreateHubCommand, CreateHubHandler};
pub use join_hub::{JoinHubCommand, JoinHubHandler, JoinHubResult};

// Queries
pub use get_hub::{GetHubHandler, GetHubQuery};
pub use list_open_hubs::{ListOpenHubsHandler, ListOpenHubsQuery};
pub use list_upcoming_hubs::{
    ListUpcomingHubsHandler, ListUpcomingHubsQuery, DEFAULT_WINDOW_HOURS, MAX_WINDOW_HOURS,
};
