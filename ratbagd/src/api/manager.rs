use futures::StreamExt;
use log::{debug, warn};

use crate::Result;
use crate::api::device::Device;
use crate::api::events::ManagerEvent;
use crate::api::models::RatbagdError;
use crate::core::context::Context;
use crate::core::object::{EventStream, RatbagdObject};
use crate::types::constants::{interface, property};
use crate::util::decode;

/// The ratbagd top-level object.
///
/// This is the main entry point. It lists the devices ratbagd supports;
/// actual interaction with a device goes through [`Device`] and the
/// profile, resolution, button and LED proxies below it.
///
/// # Creating an Instance
///
/// ```no_run
/// use ratbagd::Manager;
///
/// # async fn example() -> ratbagd::Result<()> {
/// let manager = Manager::new().await?;
///
/// for device in manager.devices().await? {
///     println!("{}", device.name().unwrap_or_default());
/// }
/// # Ok(())
/// # }
/// ```
///
/// # Staleness
///
/// Nothing below the manager is cached by this crate. Every call to
/// [`Manager::devices`] re-reads the address list and wraps fresh proxies,
/// so callers holding on to a `Device` should re-navigate after a
/// [`ManagerEvent`] to observe the current tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manager {
    object: RatbagdObject,
}

impl Manager {
    /// Connects to ratbagd on the system bus.
    ///
    /// The bus connection is shared process-wide and set up on first use.
    /// The service name honors the `RATBAGCTL_DEVEL` override.
    ///
    /// # Errors
    ///
    /// Returns `RatbagdError::ServiceUnavailable` if the bus is unreachable
    /// or ratbagd is not running.
    pub async fn new() -> Result<Self> {
        let ctx = Context::system().await?;
        Self::with_context(&ctx).await
    }

    /// Binds the manager through an explicit context.
    pub async fn with_context(ctx: &Context) -> Result<Self> {
        let object = RatbagdObject::new(ctx, interface::MANAGER, None).await?;
        Ok(Self { object })
    }

    /// The manager's address.
    pub fn path(&self) -> &zvariant::OwnedObjectPath {
        self.object.path()
    }

    /// The devices supported by ratbagd.
    pub async fn devices(&self) -> Result<Vec<Device>> {
        let paths = self
            .object
            .property(property::DEVICES, decode::object_paths)
            .unwrap_or_default();

        let mut devices = Vec::with_capacity(paths.len());
        for path in paths {
            devices.push(Device::new(self.object.context(), path).await?);
        }
        Ok(devices)
    }

    /// The available SVG theme names. The theme `"default"` is always present.
    pub fn themes(&self) -> Option<Vec<String>> {
        self.object.property(property::THEMES, decode::string_list)
    }

    /// Subscribes to device hotplug events.
    pub async fn receive_events(&self) -> Result<EventStream<ManagerEvent>> {
        self.object.receive_events().await
    }

    /// Monitors device additions and removals.
    ///
    /// Invokes `callback` for every [`ManagerEvent`]. Runs until the signal
    /// stream ends; run it in a background task.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let manager = Manager::new().await?;
    /// manager.monitor_devices(|event| {
    ///     println!("Device list changed: {event:?}");
    /// }).await?;
    /// ```
    pub async fn monitor_devices<F>(&self, callback: F) -> Result<()>
    where
        F: Fn(ManagerEvent),
    {
        let mut events = self.receive_events().await?;

        while let Some(event) = events.next().await {
            debug!("Device event: {event:?}");
            callback(event);
        }

        warn!("Device monitoring stream ended unexpectedly");
        Err(RatbagdError::SignalStreamEnded)
    }
}
