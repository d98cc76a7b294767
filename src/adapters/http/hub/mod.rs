//! HTTP adapter for hub endpoints.
//!
//! - `POST /bhub/create` - Create a hub
//! - `GET /bhub/list` - Open hubs, soonest first
//! - `GET /bhub/upcoming` - Open hubs starting within a window
//! - `GET /bhub/:id` - One hub
//! - `POST /bhub/:id/join` - Join a hub

mod dto;
mod handlers;
mod routes;

pub use dto::{CreateHubRequest, CreateHubResponse, JoinHubRequest, JoinHubResponse, UpcomingQuery};
pub use routes::hub_routes;
