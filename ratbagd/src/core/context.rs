//! The shared client context.
//!
//! A [`Context`] pairs one transport connection with the client
//! configuration. Every proxy carries a clone of the context it was built
//! from, so children reuse their parent's connection.

use log::debug;
use std::fmt;
use std::sync::{Arc, OnceLock};
use tokio::sync::OnceCell;

use crate::Result;
use crate::api::config::ClientConfig;
use crate::api::transport::Transport;
use crate::dbus::DbusTransport;

/// The process-wide system bus context, created by the first caller.
static SYSTEM_CONTEXT: OnceLock<OnceCell<Context>> = OnceLock::new();

/// A transport connection plus the configuration used to address ratbagd.
///
/// `Context` is cheap to clone; clones share the same connection.
#[derive(Clone)]
pub struct Context {
    transport: Arc<dyn Transport>,
    config: Arc<ClientConfig>,
}

impl Context {
    /// Wraps an existing transport.
    pub fn new(transport: Arc<dyn Transport>, config: ClientConfig) -> Self {
        Self {
            transport,
            config: Arc::new(config),
        }
    }

    /// Returns the process-wide context on the system bus.
    ///
    /// The connection is established on first use and shared afterwards.
    /// Concurrent first callers wait for the same initialization instead
    /// of opening a second connection. A failed attempt leaves the context
    /// uninitialized, so a later call tries again.
    ///
    /// # Errors
    ///
    /// Returns `RatbagdError::ServiceUnavailable` if the system bus cannot
    /// be reached.
    pub async fn system() -> Result<Self> {
        let cell = SYSTEM_CONTEXT.get_or_init(OnceCell::new);
        cell.get_or_try_init(connect_system).await.cloned()
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub(crate) fn transport(&self) -> &dyn Transport {
        self.transport.as_ref()
    }
}

async fn connect_system() -> Result<Context> {
    let config = ClientConfig::from_env();
    debug!(
        "Connecting to system bus for service {}",
        config.service_name()
    );
    let transport = DbusTransport::system().await?;
    Ok(Context::new(Arc::new(transport), config))
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
