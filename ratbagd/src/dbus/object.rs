//! Bare ratbagd object proxy.

use zbus::proxy;

/// Proxy over any ratbagd object.
///
/// ratbagd's interface names depend on the service name, which can be
/// overridden for development instances, so the proxies are always built
/// with an explicit destination, path and interface. Properties, methods
/// and signals are accessed dynamically through the inner `zbus::Proxy`.
#[proxy(
    interface = "org.freedesktop.ratbag1.Manager",
    default_service = "org.freedesktop.ratbag1",
    default_path = "/org/freedesktop/ratbag1"
)]
pub trait RatbagdObject {}
