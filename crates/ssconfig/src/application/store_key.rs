//! Per-installation store key.
//!
//! Several copies of the client can be installed side by side and share one
//! key-value store.  Each copy keeps its own document by namespacing the key
//! with a stable hash of its installation directory:
//!
//! ```text
//! config + simple(UUIDv5(URL namespace, "<install dir>"))
//! config6f1d0c3a4e0b5b8f9a3c2d1e0f9a8b7c
//! ```
//!
//! The key is computed once by whoever builds the [`ConfigManager`] and handed
//! to it, so nothing in the manager depends on process start-up state.
//!
//! [`ConfigManager`]: super::manage_config::ConfigManager

use std::fmt;
use std::path::Path;

use uuid::Uuid;

/// Fixed prefix of every document key.
pub const KEY_NAMESPACE: &str = "config";

/// Name of the stored document blob.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StoreKey(String);

impl StoreKey {
    /// Derives the key for the installation rooted at `install_dir`.
    ///
    /// The same path always yields the same key, on every run.
    pub fn for_installation(install_dir: &Path) -> Self {
        let path = install_dir.to_string_lossy();
        let id = Uuid::new_v5(&Uuid::NAMESPACE_URL, path.as_bytes());
        Self(format!("{KEY_NAMESPACE}{}", id.simple()))
    }

    /// Wraps an already derived key verbatim.
    pub fn from_raw(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StoreKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_is_stable_for_same_path() {
        let a = StoreKey::for_installation(Path::new("/opt/ssclient"));
        let b = StoreKey::for_installation(Path::new("/opt/ssclient"));
        assert_eq!(a, b);
    }

    #[test]
    fn test_key_differs_between_installations() {
        let a = StoreKey::for_installation(Path::new("/opt/ssclient"));
        let b = StoreKey::for_installation(Path::new("/home/me/ssclient"));
        assert_ne!(a, b);
    }

    #[test]
    fn test_key_has_namespace_prefix_and_hex_hash() {
        let key = StoreKey::for_installation(Path::new("C:\\Program Files\\ssclient"));

        let hash = key
            .as_str()
            .strip_prefix(KEY_NAMESPACE)
            .expect("key must start with the namespace");

        assert_eq!(hash.len(), 32);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_raw_key_round_trips() {
        let key = StoreKey::from_raw("config-test");
        assert_eq!(key.to_string(), "config-test");
    }
}
