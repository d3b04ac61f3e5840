//! Type definitions and constants.
//!
//! This module contains ratbagd constants shared by the proxies.

pub(crate) mod constants;
