//! The object proxy base.
//!
//! [`RatbagdObject`] wraps one remote object address bound to one ratbagd
//! interface. Every typed proxy is a thin layer over it: property getters
//! read the transport's cache, setters go through [`RatbagdObject::call`],
//! and event streams come from [`RatbagdObject::receive_events`].
//!
//! Objects have no identity beyond their address. Navigating the tree
//! always re-wraps fresh objects, and two objects with the same address
//! compare equal.

use futures::{FutureExt, StreamExt, future, select};
use futures_timer::Delay;
use log::{debug, trace, warn};
use std::fmt;
use std::pin::{Pin, pin};
use std::sync::Arc;
use zvariant::{OwnedObjectPath, OwnedValue, Value};

use crate::Result;
use crate::api::events::SignalEvent;
use crate::api::models::{ErrorCode, RatbagdError};
use crate::api::transport::{CallArgs, ProxyHandle};
use crate::core::context::Context;
use crate::util::decode;

/// Stream of typed events decoded from an object's signals.
pub type EventStream<E> = Pin<Box<dyn futures::Stream<Item = E> + Send>>;

#[derive(Clone)]
pub(crate) struct RatbagdObject {
    ctx: Context,
    interface: &'static str,
    path: OwnedObjectPath,
    handle: Arc<dyn ProxyHandle>,
}

impl RatbagdObject {
    /// Binds `interface` at `path`, or at the service's root address when
    /// `path` is `None`.
    ///
    /// # Errors
    ///
    /// Returns `RatbagdError::ServiceUnavailable` if binding fails or the
    /// service name has no owner. The owner check runs even after a
    /// successful bind, since binding succeeds for unowned names.
    pub(crate) async fn new(
        ctx: &Context,
        interface: &'static str,
        path: Option<OwnedObjectPath>,
    ) -> Result<Self> {
        let config = ctx.config();
        let path = match path {
            Some(path) => path,
            None => config.root_path()?,
        };
        let service = config.service_name();
        let interface_name = config.interface_name(interface);

        let handle = ctx
            .transport()
            .bind(service, &path, &interface_name)
            .await
            .map_err(|e| match e {
                RatbagdError::ServiceUnavailable(_) => e,
                other => RatbagdError::ServiceUnavailable(format!(
                    "failed to bind {interface_name} at {path}: {other}"
                )),
            })?;

        if !handle.has_owner().await {
            debug!("Service {service} has no owner");
            return Err(RatbagdError::ServiceUnavailable(format!(
                "{service} is not running"
            )));
        }

        debug!("Bound {interface_name} at {path}");
        Ok(Self {
            ctx: ctx.clone(),
            interface,
            path,
            handle,
        })
    }

    pub(crate) fn context(&self) -> &Context {
        &self.ctx
    }

    pub(crate) fn path(&self) -> &OwnedObjectPath {
        &self.path
    }

    /// Reads a cached property and decodes it. Never a round trip.
    pub(crate) fn property<T>(&self, name: &str, decode: fn(&Value<'_>) -> Option<T>) -> Option<T> {
        let value = self.handle.cached_property(name)?;
        let decoded = decode(&value);
        if decoded.is_none() {
            debug!("{} {}: unexpected value for {name}", self.interface, self.path);
        }
        decoded
    }

    /// Calls `method` with the call timeout applied.
    async fn try_call(&self, method: &str, args: &CallArgs) -> Result<Option<OwnedValue>> {
        let timeout = self.ctx.config().call_timeout();
        let mut delay = pin!(Delay::new(timeout).fuse());
        let mut reply = pin!(self.handle.call(method, args).fuse());

        select! {
            _ = delay => Err(RatbagdError::Timeout {
                method: method.to_string(),
                timeout,
            }),
            result = reply => result,
        }
    }

    /// Calls `method` and returns the first value of the reply.
    ///
    /// Failures are logged and reported as `None`; callers treat `None` as
    /// "the change may not have taken effect".
    pub(crate) async fn call(&self, method: &str, args: CallArgs) -> Option<OwnedValue> {
        match self.try_call(method, &args).await {
            Ok(value) => value,
            Err(e) => {
                warn!("{} {}: {e}", self.interface, self.path);
                None
            }
        }
    }

    /// Calls `method` and interprets the reply as a ratbagd status code.
    /// An empty reply counts as success.
    pub(crate) async fn call_status(&self, method: &str, args: CallArgs) -> Option<ErrorCode> {
        match self.try_call(method, &args).await {
            Ok(Some(value)) => {
                let code = decode::error_code(&value);
                if !code.is_success() {
                    warn!("{} {}: {method} returned {code}", self.interface, self.path);
                }
                Some(code)
            }
            Ok(None) => Some(ErrorCode::Success),
            Err(e) => {
                warn!("{} {}: {e}", self.interface, self.path);
                None
            }
        }
    }

    /// Subscribes to the object's signals and decodes them into `E`.
    /// Signals `E` does not recognize are dropped.
    pub(crate) async fn receive_events<E>(&self) -> Result<EventStream<E>>
    where
        E: SignalEvent + Send + 'static,
    {
        let raw = self.handle.subscribe().await?;
        debug!("Subscribed to {} signals at {}", self.interface, self.path);

        let interface = self.interface;
        let events = raw.filter_map(move |signal| {
            let event = E::from_signal(&signal);
            if event.is_none() {
                trace!("{interface}: ignoring signal {}", signal.name);
            }
            future::ready(event)
        });
        Ok(Box::pin(events))
    }
}

impl PartialEq for RatbagdObject {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl Eq for RatbagdObject {}

impl fmt::Debug for RatbagdObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RatbagdObject")
            .field("interface", &self.interface)
            .field("path", &self.path.as_str())
            .finish_non_exhaustive()
    }
}
