//! Constants for ratbagd D-Bus interface values.
//!
//! These constants correspond to the service name, interface suffixes,
//! property and method names, and numeric codes used by ratbagd's D-Bus API.

/// Service addressing.
pub mod service {
    /// Well-known bus name of the ratbagd daemon.
    pub const DEFAULT_NAME: &str = "org.freedesktop.ratbag1";

    /// Environment variable pointing the client at a development instance.
    pub const DEVEL_ENV: &str = "RATBAGCTL_DEVEL";
}

/// Interface names, relative to the service name.
pub mod interface {
    pub const MANAGER: &str = "Manager";
    pub const DEVICE: &str = "Device";
    pub const PROFILE: &str = "Profile";
    pub const RESOLUTION: &str = "Resolution";
    pub const BUTTON: &str = "Button";
    pub const LED: &str = "Led";
}

/// Cached property names.
pub mod property {
    // Manager
    pub const DEVICES: &str = "Devices";
    pub const THEMES: &str = "Themes";

    // Shared
    pub const INDEX: &str = "Index";
    pub const CAPABILITIES: &str = "Capabilities";
    pub const TYPE: &str = "Type";

    // Device
    pub const ID: &str = "Id";
    pub const NAME: &str = "Name";
    pub const PROFILES: &str = "Profiles";
    pub const ACTIVE_PROFILE: &str = "ActiveProfile";

    // Profile
    pub const RESOLUTIONS: &str = "Resolutions";
    pub const BUTTONS: &str = "Buttons";
    pub const LEDS: &str = "Leds";
    pub const ACTIVE_RESOLUTION: &str = "ActiveResolution";
    pub const DEFAULT_RESOLUTION: &str = "DefaultResolution";

    // Resolution
    pub const X_RESOLUTION: &str = "XResolution";
    pub const Y_RESOLUTION: &str = "YResolution";
    pub const REPORT_RATE: &str = "ReportRate";
    pub const MAXIMUM: &str = "Maximum";
    pub const MINIMUM: &str = "Minimum";

    // Button
    pub const BUTTON_MAPPING: &str = "ButtonMapping";
    pub const SPECIAL_MAPPING: &str = "SpecialMapping";
    pub const KEY_MAPPING: &str = "KeyMapping";
    pub const ACTION_TYPE: &str = "ActionType";
    pub const ACTION_TYPES: &str = "ActionTypes";

    // Led
    pub const MODE: &str = "Mode";
    pub const COLOR: &str = "Color";
    pub const EFFECT_RATE: &str = "EffectRate";
    pub const BRIGHTNESS: &str = "Brightness";
}

/// Remote method names.
pub mod method {
    pub const GET_SVG: &str = "GetSvg";
    pub const GET_PROFILE_BY_INDEX: &str = "GetProfileByIndex";
    pub const GET_RESOLUTION_BY_INDEX: &str = "GetResolutionByIndex";
    pub const COMMIT: &str = "Commit";
    pub const SET_ACTIVE: &str = "SetActive";
    pub const SET_DEFAULT: &str = "SetDefault";
    pub const SET_RESOLUTION: &str = "SetResolution";
    pub const SET_REPORT_RATE: &str = "SetReportRate";
    pub const SET_BUTTON_MAPPING: &str = "SetButtonMapping";
    pub const SET_SPECIAL_MAPPING: &str = "SetSpecialMapping";
    pub const SET_KEY_MAPPING: &str = "SetKeyMapping";
    pub const DISABLE: &str = "Disable";
    pub const SET_MODE: &str = "SetMode";
    pub const SET_COLOR: &str = "SetColor";
    pub const SET_EFFECT_RATE: &str = "SetEffectRate";
    pub const SET_BRIGHTNESS: &str = "SetBrightness";
}

/// Signal names broadcast by the daemon.
pub mod signal {
    pub const DEVICE_NEW: &str = "DeviceNew";
    pub const DEVICE_REMOVED: &str = "DeviceRemoved";
    pub const ACTIVE_PROFILE_CHANGED: &str = "ActiveProfileChanged";
    pub const ACTIVE_RESOLUTION_CHANGED: &str = "ActiveResolutionChanged";
    pub const DEFAULT_RESOLUTION_CHANGED: &str = "DefaultResolutionChanged";
}

/// Device capability codes. Values are protocol-defined, not sequential.
pub mod device_capability {
    pub const NONE: u32 = 0;
    pub const QUERY_CONFIGURATION: u32 = 1;
    pub const RESOLUTION: u32 = 100;
    pub const SWITCHABLE_RESOLUTION: u32 = 101;
    pub const PROFILE: u32 = 200;
    pub const SWITCHABLE_PROFILE: u32 = 201;
    pub const DISABLE_PROFILE: u32 = 202;
    pub const DEFAULT_PROFILE: u32 = 203;
    pub const BUTTON: u32 = 300;
    pub const BUTTON_KEY: u32 = 301;
    pub const BUTTON_MACROS: u32 = 302;
    pub const LED: u32 = 400;
}

/// Resolution capability codes.
pub mod resolution_capability {
    pub const INDIVIDUAL_REPORT_RATE: u32 = 1;
    pub const SEPARATE_XY_RESOLUTION: u32 = 2;
}

/// Button action type codes.
pub mod action_type {
    pub const NONE: u32 = 0;
    pub const BUTTON: u32 = 1;
    pub const SPECIAL: u32 = 2;
    pub const KEY: u32 = 3;
    pub const MACRO: u32 = 4;
    pub const UNKNOWN: u32 = 1000;
}

/// LED mode codes.
pub mod led_mode {
    pub const OFF: u32 = 0;
    pub const ON: u32 = 1;
    pub const CYCLE: u32 = 2;
    pub const BREATHING: u32 = 3;
}

/// Legal LED value ranges.
pub mod led_range {
    use std::ops::RangeInclusive;

    /// Effect rate in Hz.
    pub const EFFECT_RATE: RangeInclusive<u32> = 100..=20000;
}

/// ratbagd status codes returned by mutating calls.
pub mod error_code {
    pub const SUCCESS: i32 = 0;
    pub const DEVICE: i32 = -1000;
    pub const CAPABILITY: i32 = -1001;
    pub const VALUE: i32 = -1002;
    pub const SYSTEM: i32 = -1003;
    pub const IMPLEMENTATION: i32 = -1004;
}

/// Timeout constants for remote calls.
pub mod timeouts {
    use std::time::Duration;

    /// Upper bound on a single remote call (500 milliseconds).
    const CALL_TIMEOUT_MS: u64 = 500;

    /// Returns the default remote call timeout.
    pub fn call_timeout() -> Duration {
        Duration::from_millis(CALL_TIMEOUT_MS)
    }
}
