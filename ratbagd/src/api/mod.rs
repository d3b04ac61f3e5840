//! Public API module.
//!
//! This module contains the typed object model for the `ratbagd` crate:
//! the proxies, their models and events, the client configuration, and
//! the transport seam they are built on.

pub mod button;
pub mod config;
pub mod device;
pub mod events;
pub mod led;
pub mod manager;
pub mod models;
pub mod profile;
pub mod resolution;
pub mod transport;
