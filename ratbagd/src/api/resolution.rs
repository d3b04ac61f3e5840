use std::collections::HashSet;
use zvariant::OwnedObjectPath;

use crate::Result;
use crate::api::events::ResolutionEvent;
use crate::api::models::{ErrorCode, ResolutionCapability};
use crate::api::transport::CallArgs;
use crate::core::context::Context;
use crate::core::object::{EventStream, RatbagdObject};
use crate::types::constants::{interface, method, property};
use crate::util::decode;

/// A resolution (DPI) slot of a profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    object: RatbagdObject,
}

impl Resolution {
    pub async fn new(ctx: &Context, path: OwnedObjectPath) -> Result<Self> {
        let object = RatbagdObject::new(ctx, interface::RESOLUTION, Some(path)).await?;
        Ok(Self { object })
    }

    pub fn path(&self) -> &OwnedObjectPath {
        self.object.path()
    }

    pub fn index(&self) -> Option<u32> {
        self.object.property(property::INDEX, decode::u32_value)
    }

    pub fn capabilities(&self) -> Option<HashSet<ResolutionCapability>> {
        let codes = self.object.property(property::CAPABILITIES, decode::u32_list)?;
        Some(codes.into_iter().map(ResolutionCapability::from).collect())
    }

    pub fn has_capability(&self, capability: ResolutionCapability) -> bool {
        self.capabilities()
            .is_some_and(|caps| caps.contains(&capability))
    }

    /// The `(x, y)` resolution in DPI.
    ///
    /// The two axes are separate cached properties read one after the
    /// other, so a change landing between the reads can yield a pair that
    /// never existed on the device. Re-read after a
    /// [`ResolutionEvent`] if that matters.
    pub fn resolution(&self) -> Option<(u32, u32)> {
        let x = self.object.property(property::X_RESOLUTION, decode::u32_value)?;
        let y = self.object.property(property::Y_RESOLUTION, decode::u32_value)?;
        Some((x, y))
    }

    /// Sets both axes in one call, which ratbagd applies atomically.
    pub async fn set_resolution(&self, x: u32, y: u32) -> Option<ErrorCode> {
        self.object
            .call_status(method::SET_RESOLUTION, CallArgs::U32Pair(x, y))
            .await
    }

    /// The report rate in Hz.
    pub fn report_rate(&self) -> Option<u32> {
        self.object.property(property::REPORT_RATE, decode::u32_value)
    }

    pub async fn set_report_rate(&self, rate: u32) -> Option<ErrorCode> {
        self.object
            .call_status(method::SET_REPORT_RATE, CallArgs::U32(rate))
            .await
    }

    /// The maximum possible resolution.
    pub fn maximum(&self) -> Option<u32> {
        self.object.property(property::MAXIMUM, decode::u32_value)
    }

    /// The minimum possible resolution.
    pub fn minimum(&self) -> Option<u32> {
        self.object.property(property::MINIMUM, decode::u32_value)
    }

    /// Makes this resolution the profile's default. ratbagd broadcasts
    /// `DefaultResolutionChanged` afterwards.
    pub async fn set_default(&self) -> Option<ErrorCode> {
        self.object.call_status(method::SET_DEFAULT, CallArgs::Unit).await
    }

    pub async fn receive_events(&self) -> Result<EventStream<ResolutionEvent>> {
        self.object.receive_events().await
    }
}
