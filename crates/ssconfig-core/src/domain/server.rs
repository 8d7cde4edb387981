//! A single upstream server endpoint.

use serde::{Deserialize, Serialize};

use super::wire::null_as_default;

/// Timeout assigned to freshly created profiles, in seconds.
pub const DEFAULT_SERVER_TIMEOUT_SECS: i32 = 5;

/// Largest timeout a server profile may carry, in seconds.
pub const MAX_SERVER_TIMEOUT_SECS: i32 = 20;

const DEFAULT_SERVER_PORT: i32 = 8388;
const DEFAULT_METHOD: &str = "aes-256-cfb";

/// Connection parameters for one upstream server.
///
/// Profiles have no ID of their own: a profile is identified by its position
/// in [`ConfigurationDocument::servers`](super::document::ConfigurationDocument::servers).
///
/// The default profile is deliberately incomplete (blank address and
/// password).  It is what the repair pass inserts into an empty server list,
/// so the user has something to edit; it does not pass
/// [`check_server_profile`](super::validation::check_server_profile).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerProfile {
    /// Hostname or IP address of the server.
    #[serde(rename = "server", deserialize_with = "null_as_default")]
    pub address: String,
    /// Remote port.
    #[serde(rename = "server_port")]
    pub port: i32,
    /// Shared secret used by the cipher.
    #[serde(deserialize_with = "null_as_default")]
    pub password: String,
    /// Cipher name, e.g. `aes-256-cfb`.
    #[serde(deserialize_with = "null_as_default")]
    pub method: String,
    /// Free-form label shown in server menus.
    #[serde(deserialize_with = "null_as_default")]
    pub remarks: String,
    /// Connect timeout in seconds.
    pub timeout: i32,
}

impl Default for ServerProfile {
    fn default() -> Self {
        Self {
            address: String::new(),
            port: DEFAULT_SERVER_PORT,
            password: String::new(),
            method: DEFAULT_METHOD.to_string(),
            remarks: String::new(),
            timeout: DEFAULT_SERVER_TIMEOUT_SECS,
        }
    }
}

impl ServerProfile {
    /// `address:port`, as used in log lines and duplicate detection.
    pub fn identifier(&self) -> String {
        format!("{}:{}", self.address, self.port)
    }

    /// Label for menus: the remarks when present, otherwise the endpoint.
    pub fn friendly_name(&self) -> String {
        if self.address.trim().is_empty() {
            return "New server".to_string();
        }
        if self.remarks.trim().is_empty() {
            self.identifier()
        } else {
            format!("{} ({})", self.remarks, self.identifier())
        }
    }
}
