//! A Rust client for ratbagd, the gaming mouse configuration daemon.
//!
//! ratbagd exposes a tree of objects over D-Bus: one manager, the devices
//! it supports, and below each device its profiles, each holding
//! resolutions, buttons and LEDs. This crate wraps each object kind in a
//! typed proxy:
//!
//! - [`Manager`] lists devices and SVG themes, and reports hotplug events
//! - [`Device`] lists profiles and commits changes to the hardware
//! - [`Profile`] lists resolutions, buttons and LEDs
//! - [`Resolution`], [`Button`] and [`Led`] read and change settings
//!
//! # Example
//!
//! ```no_run
//! use ratbagd::{Manager, Rgb};
//!
//! # async fn example() -> ratbagd::Result<()> {
//! let manager = Manager::new().await?;
//!
//! for device in manager.devices().await? {
//!     println!("{}", device.name().unwrap_or_default());
//!
//!     if let Some(profile) = device.active_profile().await? {
//!         for led in profile.leds().await? {
//!             led.set_color(Rgb::new(255, 0, 0)).await;
//!         }
//!     }
//!     device.commit().await;
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Cached properties and navigation
//!
//! Property getters read the values the D-Bus proxy keeps cached and never
//! make a round trip. Navigation (`devices()`, `profiles()`, ...) re-reads
//! the current address list and wraps fresh proxies every time; nothing in
//! the tree is memoized, so a proxy is never more than one read behind the
//! daemon. Proxies compare equal when their addresses are equal.
//!
//! # Error Handling
//!
//! Constructing a proxy returns `Result<T, RatbagdError>` and fails only
//! with `RatbagdError::ServiceUnavailable` when ratbagd is not reachable.
//! Remote calls are bounded by a timeout (500 ms by default) and never
//! fail hard: a failed or timed-out call is logged and reported as `None`.
//! Setters return the daemon's [`ErrorCode`] on completion.
//!
//! # Signals
//!
//! The manager, profiles and resolutions translate ratbagd's signals into
//! typed events ([`ManagerEvent`], [`ProfileEvent`], [`ResolutionEvent`])
//! exposed as streams through their `receive_events()` methods. Unknown
//! signals are ignored.
//!
//! # Logging
//!
//! This crate uses the [`log`](https://docs.rs/log) facade for logging. To see
//! log output, add a logging implementation like `env_logger`. For example:
//!
//! ```no_run,ignore
//! env_logger::init();
//! // ...
//! ```

// Internal implementation modules
mod core;
mod dbus;
mod types;
mod util;

// Public API modules
pub mod api;

// Re-exported public API
pub use api::button::Button;
pub use api::config::ClientConfig;
pub use api::device::Device;
pub use api::events::{ManagerEvent, ProfileEvent, ResolutionEvent, SignalEvent};
pub use api::led::Led;
pub use api::manager::Manager;
pub use api::models::{
    ActionType, ButtonAction, DeviceCapability, ErrorCode, KeyMapping, LedMode, RatbagdError,
    ResolutionCapability, Rgb,
};
pub use api::profile::Profile;
pub use api::resolution::Resolution;
pub use api::transport::{CallArgs, ProxyHandle, RawSignal, SignalStream, Transport};
pub use crate::core::context::Context;
pub use crate::core::object::EventStream;
pub use dbus::DbusTransport;

/// A specialized `Result` type for ratbagd operations.
pub type Result<T> = std::result::Result<T, RatbagdError>;
