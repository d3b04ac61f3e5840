//! Typed events decoded from ratbagd signals.
//!
//! ratbagd broadcasts loosely structured signals: a member name plus a
//! tuple of arguments. Each object kind that receives notifications has an
//! event enum here that maps the names it knows to typed variants. Names it
//! does not know, or known names with malformed arguments, decode to
//! `None` and are dropped.

use serde::{Deserialize, Serialize};
use zvariant::OwnedObjectPath;

use crate::api::transport::RawSignal;
use crate::types::constants::signal;
use crate::util::decode;

/// An event type decodable from a raw signal.
pub trait SignalEvent: Sized {
    /// Decodes `signal`, or returns `None` if it is not one of this
    /// type's signals.
    fn from_signal(signal: &RawSignal) -> Option<Self>;
}

fn first_u32(signal: &RawSignal) -> Option<u32> {
    signal.args.first().and_then(|v| decode::u32_value(v))
}

fn first_path(signal: &RawSignal) -> Option<OwnedObjectPath> {
    signal.args.first().and_then(|v| decode::object_path(v))
}

/// Events broadcast by the manager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManagerEvent {
    /// A device was added; carries the new device's address.
    DeviceAdded(OwnedObjectPath),
    /// A device was removed; carries the old device's address.
    DeviceRemoved(OwnedObjectPath),
}

impl SignalEvent for ManagerEvent {
    fn from_signal(raw: &RawSignal) -> Option<Self> {
        match raw.name.as_str() {
            signal::DEVICE_NEW => first_path(raw).map(Self::DeviceAdded),
            signal::DEVICE_REMOVED => first_path(raw).map(Self::DeviceRemoved),
            _ => None,
        }
    }
}

/// Events broadcast by a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProfileEvent {
    /// The device's active profile changed; carries the new index.
    ActiveProfileChanged(u32),
}

impl SignalEvent for ProfileEvent {
    fn from_signal(raw: &RawSignal) -> Option<Self> {
        match raw.name.as_str() {
            signal::ACTIVE_PROFILE_CHANGED => first_u32(raw).map(Self::ActiveProfileChanged),
            _ => None,
        }
    }
}

/// Events broadcast by a resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResolutionEvent {
    /// The profile's active resolution changed; carries the new index.
    ActiveResolutionChanged(u32),
    /// The profile's default resolution changed; carries the new index.
    DefaultResolutionChanged(u32),
}

impl SignalEvent for ResolutionEvent {
    fn from_signal(raw: &RawSignal) -> Option<Self> {
        match raw.name.as_str() {
            signal::ACTIVE_RESOLUTION_CHANGED => {
                first_u32(raw).map(Self::ActiveResolutionChanged)
            }
            signal::DEFAULT_RESOLUTION_CHANGED => {
                first_u32(raw).map(Self::DefaultResolutionChanged)
            }
            _ => None,
        }
    }
}
