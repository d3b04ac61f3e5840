use log::warn;
use zvariant::OwnedObjectPath;

use crate::Result;
use crate::api::models::{ErrorCode, LedMode, Rgb};
use crate::api::transport::CallArgs;
use crate::core::context::Context;
use crate::core::object::RatbagdObject;
use crate::types::constants::{interface, led_range, method, property};
use crate::util::decode;

/// An LED of a profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Led {
    object: RatbagdObject,
}

impl Led {
    pub async fn new(ctx: &Context, path: OwnedObjectPath) -> Result<Self> {
        let object = RatbagdObject::new(ctx, interface::LED, Some(path)).await?;
        Ok(Self { object })
    }

    pub fn path(&self) -> &OwnedObjectPath {
        self.object.path()
    }

    pub fn index(&self) -> Option<u32> {
        self.object.property(property::INDEX, decode::u32_value)
    }

    /// A string describing this LED's type, e.g. `"logo"`.
    pub fn led_type(&self) -> Option<String> {
        self.object.property(property::TYPE, decode::string)
    }

    pub fn mode(&self) -> Option<LedMode> {
        self.object
            .property(property::MODE, decode::u32_value)
            .map(LedMode::from)
    }

    pub async fn set_mode(&self, mode: LedMode) -> Option<ErrorCode> {
        self.object
            .call_status(method::SET_MODE, CallArgs::U32(mode.into()))
            .await
    }

    pub fn color(&self) -> Option<Rgb> {
        self.object.property(property::COLOR, decode::rgb)
    }

    /// Sets all three channels in one call.
    pub async fn set_color(&self, color: Rgb) -> Option<ErrorCode> {
        let (r, g, b) = color.to_channels();
        self.object
            .call_status(method::SET_COLOR, CallArgs::Triple(r, g, b))
            .await
    }

    /// The effect rate in Hz, between 100 and 20000.
    pub fn effect_rate(&self) -> Option<u32> {
        self.object.property(property::EFFECT_RATE, decode::u32_value)
    }

    /// Sets the effect rate in Hz.
    ///
    /// Rates outside 100..=20000 are refused without contacting the daemon
    /// and reported as `None`.
    pub async fn set_effect_rate(&self, rate: u32) -> Option<ErrorCode> {
        if !led_range::EFFECT_RATE.contains(&rate) {
            warn!(
                "Refusing effect rate {rate} Hz for {}: allowed range is {:?}",
                self.path(),
                led_range::EFFECT_RATE
            );
            return None;
        }

        self.object
            .call_status(method::SET_EFFECT_RATE, CallArgs::U32(rate))
            .await
    }

    /// The brightness, between 0 and 255.
    pub fn brightness(&self) -> Option<u8> {
        let value = self.object.property(property::BRIGHTNESS, decode::u32_value)?;
        u8::try_from(value).ok()
    }

    pub async fn set_brightness(&self, brightness: u8) -> Option<ErrorCode> {
        self.object
            .call_status(method::SET_BRIGHTNESS, CallArgs::U32(brightness.into()))
            .await
    }
}
