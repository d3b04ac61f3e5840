//! D-Bus transport for ratbagd.
//!
//! This module contains the system bus implementation of the
//! [`Transport`](crate::Transport) seam, built on `zbus`.

mod object;
mod transport;

pub use transport::DbusTransport;
