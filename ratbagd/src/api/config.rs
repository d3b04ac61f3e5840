//! Client configuration.

use std::time::Duration;
use zvariant::OwnedObjectPath;

use crate::Result;
use crate::api::models::RatbagdError;
use crate::types::constants::{service, timeouts};

/// Configuration for a ratbagd client context.
///
/// Controls which bus name the client talks to and how long a single
/// remote call may take before it is reported as failed.
///
/// # Examples
///
/// ```
/// use ratbagd::ClientConfig;
/// use std::time::Duration;
///
/// let config = ClientConfig::new()
///     .with_service_name("org.freedesktop.ratbag_devel1")
///     .with_call_timeout(Duration::from_secs(2));
///
/// assert_eq!(config.service_name(), "org.freedesktop.ratbag_devel1");
/// assert_eq!(config.call_timeout(), Duration::from_secs(2));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    service_name: String,
    call_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            service_name: service::DEFAULT_NAME.to_string(),
            call_timeout: timeouts::call_timeout(),
        }
    }
}

impl ClientConfig {
    /// Creates a configuration with the default service name and timeout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Default configuration, with the service name taken from
    /// `RATBAGCTL_DEVEL` when that variable is set and non-empty.
    pub fn from_env() -> Self {
        Self::default().with_devel_override(std::env::var(service::DEVEL_ENV).ok())
    }

    fn with_devel_override(self, value: Option<String>) -> Self {
        match value {
            Some(name) if !name.is_empty() => self.with_service_name(name),
            _ => self,
        }
    }

    #[must_use]
    pub fn with_service_name(mut self, name: impl Into<String>) -> Self {
        self.service_name = name.into();
        self
    }

    #[must_use]
    pub fn with_call_timeout(mut self, timeout: Duration) -> Self {
        self.call_timeout = timeout;
        self
    }

    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    pub fn call_timeout(&self) -> Duration {
        self.call_timeout
    }

    /// The fully qualified name of one of the service's interfaces.
    pub fn interface_name(&self, interface: &str) -> String {
        format!("{}.{}", self.service_name, interface)
    }

    /// The manager's address, derived from the service name
    /// (`org.freedesktop.ratbag1` becomes `/org/freedesktop/ratbag1`).
    pub fn root_path(&self) -> Result<OwnedObjectPath> {
        let path = format!("/{}", self.service_name.replace('.', "/"));
        OwnedObjectPath::try_from(path).map_err(|e| {
            RatbagdError::ServiceUnavailable(format!(
                "invalid service name {}: {e}",
                self.service_name
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.service_name(), "org.freedesktop.ratbag1");
        assert_eq!(config.call_timeout(), Duration::from_millis(500));
    }

    #[test]
    fn root_path_replaces_separators() {
        let config = ClientConfig::default();
        assert_eq!(
            config.root_path().unwrap().as_str(),
            "/org/freedesktop/ratbag1"
        );

        let devel = ClientConfig::new().with_service_name("org.example.ratbag_devel1");
        assert_eq!(
            devel.root_path().unwrap().as_str(),
            "/org/example/ratbag_devel1"
        );
    }

    #[test]
    fn interface_name_is_qualified() {
        let config = ClientConfig::default();
        assert_eq!(
            config.interface_name("Device"),
            "org.freedesktop.ratbag1.Device"
        );
    }

    #[test]
    fn devel_override() {
        let config = ClientConfig::new().with_devel_override(Some("org.example.devel".into()));
        assert_eq!(config.service_name(), "org.example.devel");

        let config = ClientConfig::new().with_devel_override(Some(String::new()));
        assert_eq!(config.service_name(), "org.freedesktop.ratbag1");

        let config = ClientConfig::new().with_devel_override(None);
        assert_eq!(config.service_name(), "org.freedesktop.ratbag1");
    }

    #[test]
    fn invalid_service_name_is_rejected() {
        let config = ClientConfig::new().with_service_name("bad..name");
        assert!(matches!(
            config.root_path(),
            Err(RatbagdError::ServiceUnavailable(_))
        ));
    }
}
