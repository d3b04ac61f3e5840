//! System bus implementation of the transport seam.

use async_trait::async_trait;
use futures::{StreamExt, TryStreamExt, future};
use log::{debug, trace, warn};
use std::fmt;
use std::pin::pin;
use std::sync::Arc;
use tokio::sync::OnceCell;
use zbus::fdo::DBusProxy;
use zbus::message::{Flags, Type};
use zbus::names::{BusName, InterfaceName};
use zbus::proxy::CacheProperties;
use zbus::{Connection, Message, MessageStream, Proxy};
use zvariant::{ObjectPath, OwnedObjectPath, OwnedValue, Structure};

use crate::Result;
use crate::api::models::RatbagdError;
use crate::api::transport::{CallArgs, ProxyHandle, RawSignal, SignalStream, Transport};
use crate::dbus::object::RatbagdObjectProxy;

/// Transport over a `zbus` connection, normally the system bus.
#[derive(Clone)]
pub struct DbusTransport {
    conn: Connection,
    /// Proxy to the bus daemon, created on the first owner check and
    /// shared by every handle bound through this transport.
    bus: Arc<OnceCell<DBusProxy<'static>>>,
}

impl DbusTransport {
    /// Connects to the system bus.
    ///
    /// # Errors
    ///
    /// Returns `RatbagdError::ServiceUnavailable` if the bus cannot be
    /// reached.
    pub async fn system() -> Result<Self> {
        let conn = Connection::system()
            .await
            .map_err(|e| RatbagdError::ServiceUnavailable(format!("system bus: {e}")))?;
        Ok(Self::from_connection(conn))
    }

    /// Wraps an existing connection, e.g. a session bus hosting a
    /// development daemon.
    pub fn from_connection(conn: Connection) -> Self {
        Self {
            conn,
            bus: Arc::new(OnceCell::new()),
        }
    }

    fn handle(&self, service: &str, proxy: Proxy<'static>) -> DbusHandle {
        DbusHandle {
            conn: self.conn.clone(),
            bus: Arc::clone(&self.bus),
            service: service.to_string(),
            proxy,
        }
    }
}

impl fmt::Debug for DbusTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbusTransport")
            .field("conn", &self.conn)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Transport for DbusTransport {
    async fn bind(
        &self,
        service: &str,
        path: &OwnedObjectPath,
        interface: &str,
    ) -> Result<Arc<dyn ProxyHandle>> {
        let proxy = RatbagdObjectProxy::builder(&self.conn)
            .destination(service.to_string())?
            .path(path.clone())?
            .interface(interface.to_string())?
            .cache_properties(CacheProperties::Yes)
            .build()
            .await?
            .into_inner();

        Ok(Arc::new(self.handle(service, proxy)))
    }
}

struct DbusHandle {
    conn: Connection,
    bus: Arc<OnceCell<DBusProxy<'static>>>,
    service: String,
    proxy: Proxy<'static>,
}

#[async_trait]
impl ProxyHandle for DbusHandle {
    async fn has_owner(&self) -> bool {
        let name = match BusName::try_from(self.service.as_str()) {
            Ok(name) => name,
            Err(e) => {
                warn!("Invalid bus name {}: {e}", self.service);
                return false;
            }
        };

        let dbus = match self
            .bus
            .get_or_try_init(|| DBusProxy::new(&self.conn))
            .await
        {
            Ok(dbus) => dbus,
            Err(e) => {
                warn!("Failed to reach the bus daemon: {e}");
                return false;
            }
        };

        match dbus.name_has_owner(name).await {
            Ok(owned) => owned,
            Err(e) => {
                debug!("NameHasOwner({}) failed: {e}", self.service);
                false
            }
        }
    }

    fn cached_property(&self, name: &str) -> Option<OwnedValue> {
        let value = self.proxy.cached_property_raw(name)?;
        value.try_to_owned().ok()
    }

    async fn call(&self, method: &str, args: &CallArgs) -> Result<Option<OwnedValue>> {
        let call_failed = |e: zbus::Error| RatbagdError::CallFailed {
            method: method.to_string(),
            reason: e.to_string(),
        };

        let msg = method_call(
            self.proxy.destination(),
            self.proxy.path(),
            self.proxy.interface(),
            method,
            args,
        )
        .map_err(call_failed)?;
        trace!("{} {}: {method}({})", self.service, self.proxy.path(), args.signature());

        let reply = send_call(&self.conn, &msg).await.map_err(call_failed)?;

        first_value(&reply).map_err(|e| RatbagdError::InvalidReply {
            method: method.to_string(),
            detail: e.to_string(),
        })
    }

    async fn subscribe(&self) -> Result<SignalStream> {
        let stream = self.proxy.receive_all_signals().await?;
        let signals = stream.filter_map(|msg| future::ready(raw_signal(&msg)));
        Ok(Box::pin(signals))
    }
}

/// Builds the message for a call to `method`.
///
/// Calls are sent with `NoAutoStart`: talking to ratbagd must never cause
/// the bus to activate it.
fn method_call(
    destination: &BusName<'_>,
    path: &ObjectPath<'_>,
    interface: &InterfaceName<'_>,
    method: &str,
    args: &CallArgs,
) -> zbus::Result<Message> {
    let builder = Message::method_call(path.clone(), method)?
        .destination(destination.clone())?
        .interface(interface.clone())?
        .with_flags(Flags::NoAutoStart)?;

    match args {
        CallArgs::Unit => builder.build(&()),
        CallArgs::U32(v) => builder.build(&(*v,)),
        CallArgs::U32Pair(x, y) => builder.build(&(*x, *y)),
        CallArgs::Str(s) => builder.build(&(s.as_str(),)),
        CallArgs::U32Array(v) => builder.build(&(v.as_slice(),)),
        CallArgs::Triple(a, b, c) => builder.build(&((*a, *b, *c),)),
    }
}

/// Sends `msg` and waits for the matching reply. Error replies become
/// `zbus::Error::MethodError`.
async fn send_call(conn: &Connection, msg: &Message) -> zbus::Result<Message> {
    let serial = msg.primary_header().serial_num();
    // Subscribe before sending so the reply cannot slip past.
    let mut replies = pin!(MessageStream::from(conn));
    conn.send(msg).await?;

    while let Some(reply) = replies.try_next().await? {
        if reply.header().reply_serial() != Some(serial) {
            continue;
        }
        return match reply.primary_header().msg_type() {
            Type::Error => Err(zbus::Error::from(reply)),
            _ => Ok(reply),
        };
    }

    Err(zbus::Error::Failure(
        "connection closed before the reply arrived".to_string(),
    ))
}

/// Returns every body field of `msg`, in order.
///
/// The body signature does not tell a lone struct argument apart from a
/// list of arguments, so a body holding a single `(uuu)` comes back as its
/// three fields. No ratbagd reply or signal has that shape.
fn body_fields(msg: &Message) -> zbus::Result<Vec<OwnedValue>> {
    let body = msg.body();
    if body.signature().to_string().is_empty() {
        return Ok(Vec::new());
    }

    let fields: Structure<'_> = body.deserialize()?;
    fields
        .into_fields()
        .into_iter()
        .map(|v| OwnedValue::try_from(v).map_err(zbus::Error::from))
        .collect()
}

fn first_value(msg: &Message) -> zbus::Result<Option<OwnedValue>> {
    Ok(body_fields(msg)?.into_iter().next())
}

fn raw_signal(msg: &Message) -> Option<RawSignal> {
    let header = msg.header();
    let name = header.member()?.to_string();
    let sender = header.sender().map(|s| s.to_string());

    let args = match body_fields(msg) {
        Ok(args) => args,
        Err(e) => {
            warn!("Failed to decode arguments of signal {name}: {e}");
            return None;
        }
    };

    Some(RawSignal { sender, name, args })
}
