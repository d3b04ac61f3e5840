use zvariant::OwnedObjectPath;

use crate::Result;
use crate::api::button::Button;
use crate::api::events::ProfileEvent;
use crate::api::led::Led;
use crate::api::models::ErrorCode;
use crate::api::resolution::Resolution;
use crate::api::transport::CallArgs;
use crate::core::context::Context;
use crate::core::object::{EventStream, RatbagdObject};
use crate::types::constants::{interface, method, property};
use crate::util::decode;

/// A profile of a device.
///
/// Each profile holds its own set of resolutions, button mappings and LED
/// settings. The set of buttons differs between profiles but the number of
/// buttons is identical across all profiles of a device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    object: RatbagdObject,
}

impl Profile {
    pub async fn new(ctx: &Context, path: OwnedObjectPath) -> Result<Self> {
        let object = RatbagdObject::new(ctx, interface::PROFILE, Some(path)).await?;
        Ok(Self { object })
    }

    pub fn path(&self) -> &OwnedObjectPath {
        self.object.path()
    }

    pub fn index(&self) -> Option<u32> {
        self.object.property(property::INDEX, decode::u32_value)
    }

    pub async fn resolutions(&self) -> Result<Vec<Resolution>> {
        let paths = self
            .object
            .property(property::RESOLUTIONS, decode::object_paths)
            .unwrap_or_default();

        let mut resolutions = Vec::with_capacity(paths.len());
        for path in paths {
            resolutions.push(Resolution::new(self.object.context(), path).await?);
        }
        Ok(resolutions)
    }

    pub async fn buttons(&self) -> Result<Vec<Button>> {
        let paths = self
            .object
            .property(property::BUTTONS, decode::object_paths)
            .unwrap_or_default();

        let mut buttons = Vec::with_capacity(paths.len());
        for path in paths {
            buttons.push(Button::new(self.object.context(), path).await?);
        }
        Ok(buttons)
    }

    pub async fn leds(&self) -> Result<Vec<Led>> {
        let paths = self
            .object
            .property(property::LEDS, decode::object_paths)
            .unwrap_or_default();

        let mut leds = Vec::with_capacity(paths.len());
        for path in paths {
            leds.push(Led::new(self.object.context(), path).await?);
        }
        Ok(leds)
    }

    /// The currently active resolution, or `None` if the active index does
    /// not point into the current resolution list.
    pub async fn active_resolution(&self) -> Result<Option<Resolution>> {
        let resolutions = self.resolutions().await?;
        let index = self
            .object
            .property(property::ACTIVE_RESOLUTION, decode::u32_value);
        Ok(decode::pick_index(resolutions, index))
    }

    /// The default resolution, or `None` if the default index does not
    /// point into the current resolution list.
    pub async fn default_resolution(&self) -> Result<Option<Resolution>> {
        let resolutions = self.resolutions().await?;
        let index = self
            .object
            .property(property::DEFAULT_RESOLUTION, decode::u32_value);
        Ok(decode::pick_index(resolutions, index))
    }

    /// Makes this profile the active one.
    ///
    /// ratbagd answers by broadcasting `ActiveProfileChanged` to every
    /// subscriber, see [`Profile::receive_events`].
    pub async fn set_active(&self) -> Option<ErrorCode> {
        self.object.call_status(method::SET_ACTIVE, CallArgs::Unit).await
    }

    /// Looks up the address of the resolution at `index`.
    pub async fn get_resolution_by_index(&self, index: u32) -> Option<OwnedObjectPath> {
        let reply = self
            .object
            .call(method::GET_RESOLUTION_BY_INDEX, CallArgs::U32(index))
            .await?;
        decode::object_path(&reply)
    }

    pub async fn receive_events(&self) -> Result<EventStream<ProfileEvent>> {
        self.object.receive_events().await
    }
}
