//! The transport seam between the typed proxies and the bus.
//!
//! The proxies never talk to D-Bus directly. They go through a
//! [`Transport`], which binds remote objects, and the [`ProxyHandle`]s it
//! returns, which expose the four primitives the proxies are built from:
//! an owner check, cached property reads, method calls and signal
//! subscription.
//!
//! [`DbusTransport`](crate::DbusTransport) is the system bus
//! implementation. Other implementations can be plugged in through
//! [`Context::new`](crate::Context::new), e.g. to drive the object tree
//! from an in-memory daemon.

use async_trait::async_trait;
use futures::Stream;
use std::pin::Pin;
use std::sync::Arc;
use zvariant::{OwnedObjectPath, OwnedValue};

use crate::Result;

/// Arguments of a remote call.
///
/// Each variant fixes the D-Bus signature of the call body, so a call can
/// only be issued with one of the shapes ratbagd understands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallArgs {
    /// No arguments.
    Unit,
    /// `u`
    U32(u32),
    /// `uu`
    U32Pair(u32, u32),
    /// `s`
    Str(String),
    /// `au`
    U32Array(Vec<u32>),
    /// `(uuu)`
    Triple(u32, u32, u32),
}

impl CallArgs {
    /// The D-Bus signature of the call body.
    pub fn signature(&self) -> &'static str {
        match self {
            Self::Unit => "",
            Self::U32(_) => "u",
            Self::U32Pair(..) => "uu",
            Self::Str(_) => "s",
            Self::U32Array(_) => "au",
            Self::Triple(..) => "(uuu)",
        }
    }
}

/// An undecoded signal as delivered by the transport.
#[derive(Debug)]
pub struct RawSignal {
    /// Unique bus name of the sender, when known.
    pub sender: Option<String>,
    /// Signal member name, e.g. `DeviceNew`.
    pub name: String,
    /// The signal's arguments, in order.
    pub args: Vec<OwnedValue>,
}

impl RawSignal {
    pub fn new(name: impl Into<String>, args: Vec<OwnedValue>) -> Self {
        Self {
            sender: None,
            name: name.into(),
            args,
        }
    }

    #[must_use]
    pub fn with_sender(mut self, sender: impl Into<String>) -> Self {
        self.sender = Some(sender.into());
        self
    }
}

/// Stream of raw signals for one bound object.
pub type SignalStream = Pin<Box<dyn Stream<Item = RawSignal> + Send>>;

/// A connection able to bind remote objects.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Binds the object at `path` on `service` to `interface`.
    ///
    /// Binding may succeed for a name nobody currently owns; callers
    /// check [`ProxyHandle::has_owner`] afterwards.
    async fn bind(
        &self,
        service: &str,
        path: &OwnedObjectPath,
        interface: &str,
    ) -> Result<Arc<dyn ProxyHandle>>;
}

/// One remote object bound to one interface.
#[async_trait]
pub trait ProxyHandle: Send + Sync {
    /// Whether the bound service name currently has an owner.
    async fn has_owner(&self) -> bool;

    /// The last known value of a property, without a round trip.
    fn cached_property(&self, name: &str) -> Option<OwnedValue>;

    /// Issues a method call and returns the first value of the reply,
    /// or `None` for an empty reply.
    async fn call(&self, method: &str, args: &CallArgs) -> Result<Option<OwnedValue>>;

    /// Subscribes to every signal the object emits on its interface.
    async fn subscribe(&self) -> Result<SignalStream>;
}
