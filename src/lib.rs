//! BHub - group formation for shared-cost scheduled activities.
//!
//! Hosts publish a hub (a location, a time slot, a member range and a total
//! price), other users join until it fills, and each member pays their share
//! through an external payment gateway. Cancelling a hub refunds everyone who
//! paid.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
