use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::time::Duration;
use thiserror::Error;

use crate::types::constants::{
    action_type, device_capability, error_code, led_mode, resolution_capability,
};

/// Errors that can occur while talking to ratbagd.
///
/// Only [`RatbagdError::ServiceUnavailable`] escapes proxy construction.
/// Getters and setters on the typed proxies never return these errors
/// directly: a failed remote call is logged and reported as `None`, so
/// callers branch on absence instead of matching error variants.
///
/// # Examples
///
/// ```no_run
/// use ratbagd::{Manager, RatbagdError};
///
/// # async fn example() -> ratbagd::Result<()> {
/// match Manager::new().await {
///     Ok(manager) => println!("{} devices", manager.devices().await?.len()),
///     Err(RatbagdError::ServiceUnavailable(reason)) => {
///         eprintln!("ratbagd is not running: {reason}");
///     }
///     Err(e) => return Err(e),
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Error)]
pub enum RatbagdError {
    /// A D-Bus communication error occurred.
    #[error("D-Bus error: {0}")]
    Dbus(#[from] zbus::Error),

    /// The bus could not be reached, the service could not be bound, or
    /// the service name currently has no owner (the daemon is not running).
    #[error("ratbagd service unavailable: {0}")]
    ServiceUnavailable(String),

    /// A remote call did not complete within the call timeout.
    #[error("call to {method} timed out after {timeout:?}")]
    Timeout { method: String, timeout: Duration },

    /// A remote call was rejected or failed in the transport.
    #[error("call to {method} failed: {reason}")]
    CallFailed { method: String, reason: String },

    /// A remote call returned a reply that could not be decoded.
    #[error("invalid reply to {method}: {detail}")]
    InvalidReply { method: String, detail: String },

    /// A signal stream ended while it was being monitored.
    #[error("signal stream ended")]
    SignalStreamEnded,
}

/// Status code returned by ratbagd's mutating calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    /// The call succeeded.
    Success,
    /// An error occurred on the device, or communication with it failed.
    Device,
    /// The requested change is beyond the device's capabilities.
    Capability,
    /// The value or value range is outside the supported range.
    Value,
    /// A low-level system error occurred on the daemon side.
    System,
    /// Implementation bug in the daemon or in the caller.
    Implementation,
    /// Code not mapped to a specific variant.
    Other(i32),
}

impl ErrorCode {
    /// Returns `true` for [`ErrorCode::Success`].
    #[must_use]
    pub fn is_success(self) -> bool {
        self == Self::Success
    }
}

impl From<i32> for ErrorCode {
    fn from(code: i32) -> Self {
        match code {
            error_code::SUCCESS => Self::Success,
            error_code::DEVICE => Self::Device,
            error_code::CAPABILITY => Self::Capability,
            error_code::VALUE => Self::Value,
            error_code::SYSTEM => Self::System,
            error_code::IMPLEMENTATION => Self::Implementation,
            v => Self::Other(v),
        }
    }
}

/// ratbagd sends negative codes as `u32`; reinterpret the bits.
impl From<u32> for ErrorCode {
    fn from(code: u32) -> Self {
        Self::from(code as i32)
    }
}

impl Display for ErrorCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Device => write!(f, "device error"),
            Self::Capability => write!(f, "insufficient capabilities"),
            Self::Value => write!(f, "invalid value"),
            Self::System => write!(f, "system error"),
            Self::Implementation => write!(f, "implementation error"),
            Self::Other(v) => write!(f, "unknown error code ({v})"),
        }
    }
}

/// A capability reported by a device.
///
/// Capabilities not present on the device are absent from the set returned
/// by [`Device::capabilities`](crate::Device::capabilities); a capability is
/// never partially present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeviceCapability {
    None,
    QueryConfiguration,
    Resolution,
    SwitchableResolution,
    Profile,
    SwitchableProfile,
    DisableProfile,
    DefaultProfile,
    Button,
    ButtonKey,
    ButtonMacros,
    Led,
    /// Capability code not known to this crate.
    Other(u32),
}

impl From<u32> for DeviceCapability {
    fn from(code: u32) -> Self {
        match code {
            device_capability::NONE => Self::None,
            device_capability::QUERY_CONFIGURATION => Self::QueryConfiguration,
            device_capability::RESOLUTION => Self::Resolution,
            device_capability::SWITCHABLE_RESOLUTION => Self::SwitchableResolution,
            device_capability::PROFILE => Self::Profile,
            device_capability::SWITCHABLE_PROFILE => Self::SwitchableProfile,
            device_capability::DISABLE_PROFILE => Self::DisableProfile,
            device_capability::DEFAULT_PROFILE => Self::DefaultProfile,
            device_capability::BUTTON => Self::Button,
            device_capability::BUTTON_KEY => Self::ButtonKey,
            device_capability::BUTTON_MACROS => Self::ButtonMacros,
            device_capability::LED => Self::Led,
            v => Self::Other(v),
        }
    }
}

impl From<DeviceCapability> for u32 {
    fn from(cap: DeviceCapability) -> Self {
        match cap {
            DeviceCapability::None => device_capability::NONE,
            DeviceCapability::QueryConfiguration => device_capability::QUERY_CONFIGURATION,
            DeviceCapability::Resolution => device_capability::RESOLUTION,
            DeviceCapability::SwitchableResolution => device_capability::SWITCHABLE_RESOLUTION,
            DeviceCapability::Profile => device_capability::PROFILE,
            DeviceCapability::SwitchableProfile => device_capability::SWITCHABLE_PROFILE,
            DeviceCapability::DisableProfile => device_capability::DISABLE_PROFILE,
            DeviceCapability::DefaultProfile => device_capability::DEFAULT_PROFILE,
            DeviceCapability::Button => device_capability::BUTTON,
            DeviceCapability::ButtonKey => device_capability::BUTTON_KEY,
            DeviceCapability::ButtonMacros => device_capability::BUTTON_MACROS,
            DeviceCapability::Led => device_capability::LED,
            DeviceCapability::Other(v) => v,
        }
    }
}

/// A capability reported by a resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResolutionCapability {
    /// The resolution has its own report rate.
    IndividualReportRate,
    /// X and Y resolution can be set independently.
    SeparateXyResolution,
    /// Capability code not known to this crate.
    Other(u32),
}

impl From<u32> for ResolutionCapability {
    fn from(code: u32) -> Self {
        match code {
            resolution_capability::INDIVIDUAL_REPORT_RATE => Self::IndividualReportRate,
            resolution_capability::SEPARATE_XY_RESOLUTION => Self::SeparateXyResolution,
            v => Self::Other(v),
        }
    }
}

/// What a button does when pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionType {
    None,
    Button,
    Special,
    Key,
    Macro,
    Unknown,
}

impl ActionType {
    /// Parses the textual form used by some daemon versions.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "none" => Some(Self::None),
            "button" => Some(Self::Button),
            "special" => Some(Self::Special),
            "key" => Some(Self::Key),
            "macro" => Some(Self::Macro),
            "unknown" => Some(Self::Unknown),
            _ => None,
        }
    }
}

impl From<u32> for ActionType {
    fn from(code: u32) -> Self {
        match code {
            action_type::NONE => Self::None,
            action_type::BUTTON => Self::Button,
            action_type::SPECIAL => Self::Special,
            action_type::KEY => Self::Key,
            action_type::MACRO => Self::Macro,
            _ => Self::Unknown,
        }
    }
}

impl From<ActionType> for u32 {
    fn from(kind: ActionType) -> Self {
        match kind {
            ActionType::None => action_type::NONE,
            ActionType::Button => action_type::BUTTON,
            ActionType::Special => action_type::SPECIAL,
            ActionType::Key => action_type::KEY,
            ActionType::Macro => action_type::MACRO,
            ActionType::Unknown => action_type::UNKNOWN,
        }
    }
}

impl Display for ActionType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Button => write!(f, "button"),
            Self::Special => write!(f, "special"),
            Self::Key => write!(f, "key"),
            Self::Macro => write!(f, "macro"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// A key mapping: one keycode followed by zero or more modifier codes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyMapping {
    pub keycode: u32,
    pub modifiers: Vec<u32>,
}

impl KeyMapping {
    /// Creates a mapping for a bare key.
    pub fn new(keycode: u32) -> Self {
        Self {
            keycode,
            modifiers: Vec::new(),
        }
    }

    /// Adds a modifier code.
    #[must_use]
    pub fn with_modifier(mut self, modifier: u32) -> Self {
        self.modifiers.push(modifier);
        self
    }

    /// Splits the wire form. Returns `None` for an empty list.
    pub fn from_codes(codes: &[u32]) -> Option<Self> {
        let (keycode, modifiers) = codes.split_first()?;
        Some(Self {
            keycode: *keycode,
            modifiers: modifiers.to_vec(),
        })
    }

    /// The wire form: keycode first, then modifiers.
    pub fn to_codes(&self) -> Vec<u32> {
        let mut codes = Vec::with_capacity(self.modifiers.len() + 1);
        codes.push(self.keycode);
        codes.extend_from_slice(&self.modifiers);
        codes
    }
}

/// The current behavior of a button, built from the one mapping payload
/// that matches its action type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ButtonAction {
    /// The button is disabled.
    None,
    /// Mapped to another button number.
    Button(u32),
    /// Mapped to a named special action.
    Special(String),
    /// Mapped to a key with optional modifiers.
    Key(KeyMapping),
    /// Mapped to a macro. Macros are not exposed by this interface.
    Macro,
    /// The daemon could not classify the current mapping.
    Unknown,
}

/// LED mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LedMode {
    Off,
    On,
    Cycle,
    Breathing,
    /// Mode code not known to this crate.
    Other(u32),
}

impl From<u32> for LedMode {
    fn from(code: u32) -> Self {
        match code {
            led_mode::OFF => Self::Off,
            led_mode::ON => Self::On,
            led_mode::CYCLE => Self::Cycle,
            led_mode::BREATHING => Self::Breathing,
            v => Self::Other(v),
        }
    }
}

impl From<LedMode> for u32 {
    fn from(mode: LedMode) -> Self {
        match mode {
            LedMode::Off => led_mode::OFF,
            LedMode::On => led_mode::ON,
            LedMode::Cycle => led_mode::CYCLE,
            LedMode::Breathing => led_mode::BREATHING,
            LedMode::Other(v) => v,
        }
    }
}

impl Display for LedMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Off => write!(f, "off"),
            Self::On => write!(f, "on"),
            Self::Cycle => write!(f, "cycle"),
            Self::Breathing => write!(f, "breathing"),
            Self::Other(v) => write!(f, "unknown mode ({v})"),
        }
    }
}

/// An RGB color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Rgb {
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Builds a color from wire channels, rejecting values above 255.
    pub fn from_channels(red: u32, green: u32, blue: u32) -> Option<Self> {
        Some(Self {
            red: u8::try_from(red).ok()?,
            green: u8::try_from(green).ok()?,
            blue: u8::try_from(blue).ok()?,
        })
    }

    /// The `(uuu)` wire form.
    pub fn to_channels(self) -> (u32, u32, u32) {
        (self.red.into(), self.green.into(), self.blue.into())
    }
}

impl From<(u8, u8, u8)> for Rgb {
    fn from((red, green, blue): (u8, u8, u8)) -> Self {
        Self { red, green, blue }
    }
}

impl Display for Rgb {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
    }
}
