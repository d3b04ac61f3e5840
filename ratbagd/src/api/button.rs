use zvariant::OwnedObjectPath;

use crate::Result;
use crate::api::models::{ActionType, ButtonAction, ErrorCode, KeyMapping};
use crate::api::transport::CallArgs;
use crate::core::context::Context;
use crate::core::object::RatbagdObject;
use crate::types::constants::{interface, method, property};
use crate::util::decode;

/// A button of a profile.
///
/// A button holds three mapping payloads, but only the one matching
/// [`Button::action_type`] is meaningful; the daemon may report stale or
/// zero values for the others. [`Button::action`] reads just the matching
/// one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    object: RatbagdObject,
}

impl Button {
    pub async fn new(ctx: &Context, path: OwnedObjectPath) -> Result<Self> {
        let object = RatbagdObject::new(ctx, interface::BUTTON, Some(path)).await?;
        Ok(Self { object })
    }

    pub fn path(&self) -> &OwnedObjectPath {
        self.object.path()
    }

    pub fn index(&self) -> Option<u32> {
        self.object.property(property::INDEX, decode::u32_value)
    }

    /// A string describing this button's type, e.g. `"left"`.
    pub fn button_type(&self) -> Option<String> {
        self.object.property(property::TYPE, decode::string)
    }

    /// Decides which mapping payload holds a value.
    pub fn action_type(&self) -> Option<ActionType> {
        self.object.property(property::ACTION_TYPE, decode::action_type)
    }

    /// The action types this button accepts.
    pub fn action_types(&self) -> Option<Vec<ActionType>> {
        self.object.property(property::ACTION_TYPES, decode::action_types)
    }

    /// The button number this button is mapped to, if mapped to a button.
    pub fn mapping(&self) -> Option<u32> {
        self.object.property(property::BUTTON_MAPPING, decode::u32_value)
    }

    pub async fn set_mapping(&self, button: u32) -> Option<ErrorCode> {
        self.object
            .call_status(method::SET_BUTTON_MAPPING, CallArgs::U32(button))
            .await
    }

    /// The special action name, if mapped to a special action.
    pub fn special(&self) -> Option<String> {
        self.object.property(property::SPECIAL_MAPPING, decode::string)
    }

    pub async fn set_special(&self, special: &str) -> Option<ErrorCode> {
        self.object
            .call_status(
                method::SET_SPECIAL_MAPPING,
                CallArgs::Str(special.to_string()),
            )
            .await
    }

    /// The key mapping, if mapped to a key.
    pub fn key(&self) -> Option<KeyMapping> {
        let codes = self.object.property(property::KEY_MAPPING, decode::u32_list)?;
        KeyMapping::from_codes(&codes)
    }

    pub async fn set_key(&self, keys: &KeyMapping) -> Option<ErrorCode> {
        self.object
            .call_status(method::SET_KEY_MAPPING, CallArgs::U32Array(keys.to_codes()))
            .await
    }

    /// The button's current behavior, read from the payload that matches
    /// its action type.
    pub fn action(&self) -> Option<ButtonAction> {
        let action = match self.action_type()? {
            ActionType::None => ButtonAction::None,
            ActionType::Button => ButtonAction::Button(self.mapping()?),
            ActionType::Special => ButtonAction::Special(self.special()?),
            ActionType::Key => ButtonAction::Key(self.key()?),
            ActionType::Macro => ButtonAction::Macro,
            ActionType::Unknown => ButtonAction::Unknown,
        };
        Some(action)
    }

    /// Disables this button, setting its action type to none.
    pub async fn disable(&self) -> Option<ErrorCode> {
        self.object.call_status(method::DISABLE, CallArgs::Unit).await
    }
}
