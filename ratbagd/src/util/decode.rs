//! Decoding helpers for values read from the bus.
//!
//! Cached properties and call replies arrive as untyped [`Value`]s. These
//! helpers turn them into the Rust types the proxies expose, returning
//! `None` when the value has an unexpected shape. Variant-wrapped values
//! are unwrapped first.

use zvariant::{ObjectPath, OwnedObjectPath, Value};

use crate::api::models::{ActionType, ErrorCode, Rgb};

fn unwrap_variant<'a, 'v>(value: &'a Value<'v>) -> &'a Value<'v> {
    match value {
        Value::Value(inner) => unwrap_variant(inner),
        other => other,
    }
}

/// Decodes any unsigned or non-negative signed integer into a `u32`.
pub(crate) fn u32_value(value: &Value<'_>) -> Option<u32> {
    match unwrap_variant(value) {
        Value::U32(v) => Some(*v),
        Value::U8(v) => Some(u32::from(*v)),
        Value::U16(v) => Some(u32::from(*v)),
        Value::I32(v) => u32::try_from(*v).ok(),
        Value::I16(v) => u32::try_from(*v).ok(),
        Value::U64(v) => u32::try_from(*v).ok(),
        Value::I64(v) => u32::try_from(*v).ok(),
        _ => None,
    }
}

pub(crate) fn string(value: &Value<'_>) -> Option<String> {
    match unwrap_variant(value) {
        Value::Str(s) => Some(s.as_str().to_owned()),
        _ => None,
    }
}

/// Decodes an object path. Plain strings holding a valid path are
/// accepted as well.
pub(crate) fn object_path(value: &Value<'_>) -> Option<OwnedObjectPath> {
    match unwrap_variant(value) {
        Value::ObjectPath(p) => Some(OwnedObjectPath::from(p.clone())),
        Value::Str(s) => ObjectPath::try_from(s.as_str())
            .ok()
            .map(OwnedObjectPath::from),
        _ => None,
    }
}

pub(crate) fn object_paths(value: &Value<'_>) -> Option<Vec<OwnedObjectPath>> {
    match unwrap_variant(value) {
        Value::Array(items) => items.iter().map(object_path).collect(),
        _ => None,
    }
}

pub(crate) fn u32_list(value: &Value<'_>) -> Option<Vec<u32>> {
    match unwrap_variant(value) {
        Value::Array(items) => items.iter().map(u32_value).collect(),
        _ => None,
    }
}

pub(crate) fn string_list(value: &Value<'_>) -> Option<Vec<String>> {
    match unwrap_variant(value) {
        Value::Array(items) => items.iter().map(string).collect(),
        _ => None,
    }
}

/// Decodes a `(uuu)` color triple.
pub(crate) fn rgb(value: &Value<'_>) -> Option<Rgb> {
    match unwrap_variant(value) {
        Value::Structure(s) => match s.fields() {
            [r, g, b] => Rgb::from_channels(u32_value(r)?, u32_value(g)?, u32_value(b)?),
            _ => None,
        },
        _ => None,
    }
}

/// Action types are numeric on current daemons and textual on older ones.
pub(crate) fn action_type(value: &Value<'_>) -> Option<ActionType> {
    match unwrap_variant(value) {
        Value::Str(s) => ActionType::from_name(s.as_str()),
        other => u32_value(other).map(ActionType::from),
    }
}

pub(crate) fn action_types(value: &Value<'_>) -> Option<Vec<ActionType>> {
    match unwrap_variant(value) {
        Value::Array(items) => items.iter().map(action_type).collect(),
        _ => None,
    }
}

/// Interprets a call reply as a ratbagd status code. Replies that carry
/// no integer are treated as success.
pub(crate) fn error_code(value: &Value<'_>) -> ErrorCode {
    match unwrap_variant(value) {
        Value::I32(v) => ErrorCode::from(*v),
        Value::U32(v) => ErrorCode::from(*v),
        _ => ErrorCode::Success,
    }
}

/// Picks the entry at `index` from a freshly fetched list. A missing or
/// out-of-range index yields `None`.
pub(crate) fn pick_index<T>(items: Vec<T>, index: Option<u32>) -> Option<T> {
    let index = usize::try_from(index?).ok()?;
    items.into_iter().nth(index)
}
