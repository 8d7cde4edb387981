//! Optional upstream proxy the client chains its outbound connections through.
//!
//! The proxy type is persisted as a bare integer (`0` = SOCKS5, `1` = HTTP)
//! to stay readable by existing documents.  Unknown numbers are repaired back
//! to SOCKS5 by [`UpstreamProxyConfig::check_config`].

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::validation::{check_address, check_port, check_timeout, ValidationError};
use super::wire::null_as_default;

/// Largest accepted upstream proxy timeout, in seconds.
pub const MAX_PROXY_TIMEOUT_SECS: i32 = 10;

const DEFAULT_PROXY_TIMEOUT_SECS: i32 = 3;

/// Protocol spoken to the upstream proxy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProxyType {
    Socks5 = 0,
    Http = 1,
}

impl ProxyType {
    /// Maps the persisted integer, `None` for unknown values.
    pub fn from_wire(value: i32) -> Option<Self> {
        match value {
            0 => Some(ProxyType::Socks5),
            1 => Some(ProxyType::Http),
            _ => None,
        }
    }
}

/// Persisted upstream proxy settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UpstreamProxyConfig {
    pub use_proxy: bool,
    /// Wire value of [`ProxyType`].
    pub proxy_type: i32,
    #[serde(deserialize_with = "null_as_default")]
    pub proxy_server: String,
    pub proxy_port: i32,
    /// Connect timeout in seconds.
    pub proxy_timeout: i32,
}

impl Default for UpstreamProxyConfig {
    fn default() -> Self {
        Self {
            use_proxy: false,
            proxy_type: ProxyType::Socks5 as i32,
            proxy_server: String::new(),
            proxy_port: 0,
            proxy_timeout: DEFAULT_PROXY_TIMEOUT_SECS,
        }
    }
}

impl UpstreamProxyConfig {
    /// The configured proxy protocol.  Falls back to SOCKS5 for unknown values.
    pub fn kind(&self) -> ProxyType {
        ProxyType::from_wire(self.proxy_type).unwrap_or(ProxyType::Socks5)
    }

    /// Repairs an unknown proxy type back to SOCKS5.
    pub fn check_config(&mut self) {
        if ProxyType::from_wire(self.proxy_type).is_none() {
            debug!(proxy_type = self.proxy_type, "unknown upstream proxy type, resetting to SOCKS5");
            self.proxy_type = ProxyType::Socks5 as i32;
        }
    }

    /// Validates the endpoint when the proxy is enabled.
    ///
    /// A disabled proxy is always valid, whatever its stored endpoint.
    ///
    /// # Errors
    ///
    /// The first failing rule among address, port, and timeout
    /// (against [`MAX_PROXY_TIMEOUT_SECS`]).
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.use_proxy {
            return Ok(());
        }
        check_address(&self.proxy_server)?;
        check_port(self.proxy_port)?;
        check_timeout(self.proxy_timeout, MAX_PROXY_TIMEOUT_SECS)
    }
}
