use std::collections::HashSet;
use zvariant::OwnedObjectPath;

use crate::Result;
use crate::api::models::{DeviceCapability, ErrorCode};
use crate::api::profile::Profile;
use crate::api::transport::CallArgs;
use crate::core::context::Context;
use crate::core::object::RatbagdObject;
use crate::types::constants::{interface, method, property};
use crate::util::decode;

/// A device managed by ratbagd.
///
/// Changes made through a device's profiles, resolutions, buttons and LEDs
/// are applied by the daemon as they are made but only written to the
/// hardware on [`Device::commit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Device {
    object: RatbagdObject,
}

impl Device {
    /// Binds the device at `path`.
    ///
    /// # Errors
    ///
    /// Returns `RatbagdError::ServiceUnavailable` if ratbagd is not running.
    pub async fn new(ctx: &Context, path: OwnedObjectPath) -> Result<Self> {
        let object = RatbagdObject::new(ctx, interface::DEVICE, Some(path)).await?;
        Ok(Self { object })
    }

    pub fn path(&self) -> &OwnedObjectPath {
        self.object.path()
    }

    /// The unique identifier of this device.
    pub fn id(&self) -> Option<String> {
        self.object.property(property::ID, decode::string)
    }

    /// The device name, usually provided by the kernel.
    pub fn name(&self) -> Option<String> {
        self.object.property(property::NAME, decode::string)
    }

    /// The capabilities of this device. Capabilities the device lacks are
    /// absent from the set.
    pub fn capabilities(&self) -> Option<HashSet<DeviceCapability>> {
        let codes = self.object.property(property::CAPABILITIES, decode::u32_list)?;
        Some(codes.into_iter().map(DeviceCapability::from).collect())
    }

    /// Whether the device reports `capability`.
    pub fn has_capability(&self, capability: DeviceCapability) -> bool {
        self.capabilities()
            .is_some_and(|caps| caps.contains(&capability))
    }

    /// The profiles provided by this device.
    pub async fn profiles(&self) -> Result<Vec<Profile>> {
        let paths = self
            .object
            .property(property::PROFILES, decode::object_paths)
            .unwrap_or_default();

        let mut profiles = Vec::with_capacity(paths.len());
        for path in paths {
            profiles.push(Profile::new(self.object.context(), path).await?);
        }
        Ok(profiles)
    }

    /// The currently active profile, or `None` if the active index does not
    /// point into the current profile list.
    pub async fn active_profile(&self) -> Result<Option<Profile>> {
        let profiles = self.profiles().await?;
        let index = self.object.property(property::ACTIVE_PROFILE, decode::u32_value);
        Ok(decode::pick_index(profiles, index))
    }

    /// Full path to the device's SVG for `theme`, or an empty string if the
    /// theme has none. `theme` must be one of [`Manager::themes`](crate::Manager::themes).
    pub async fn get_svg(&self, theme: &str) -> Option<String> {
        let reply = self
            .object
            .call(method::GET_SVG, CallArgs::Str(theme.to_string()))
            .await?;
        decode::string(&reply)
    }

    /// Looks up the address of the profile at `index`.
    ///
    /// This is a low-level lookup; use [`Device::profiles`] for proxies.
    pub async fn get_profile_by_index(&self, index: u32) -> Option<OwnedObjectPath> {
        let reply = self
            .object
            .call(method::GET_PROFILE_BY_INDEX, CallArgs::U32(index))
            .await?;
        decode::object_path(&reply)
    }

    /// Writes all changes made to the device to the hardware.
    pub async fn commit(&self) -> Option<ErrorCode> {
        self.object.call_status(method::COMMIT, CallArgs::Unit).await
    }
}
