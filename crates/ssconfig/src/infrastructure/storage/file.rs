//! File-backed settings store.
//!
//! Each key maps to one file, `<root>/<key>.json`, under the
//! platform-appropriate config directory:
//! - Windows:  `%APPDATA%\ssconfig\`
//! - Linux:    `$XDG_CONFIG_HOME/ssconfig/` or `~/.config/ssconfig/`
//! - macOS:    `~/Library/Application Support/ssconfig/`
//!
//! Every call opens, reads or writes, and closes its file; the store keeps no
//! handles between calls.  A missing file is "nothing stored yet", not an
//! error.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::application::manage_config::{PersistenceStore, StoreError};

const FILE_EXTENSION: &str = "json";

/// Stores each key as a file in one directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Creates a store rooted at `root`.  The directory is created on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Creates a store in the platform config directory.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] when the platform config base
    /// directory cannot be determined from the environment.
    pub fn in_platform_dir() -> Result<Self, StoreError> {
        platform_config_dir()
            .map(Self::new)
            .ok_or_else(|| StoreError::NotFound("platform config directory".to_string()))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file holding `key`.
    ///
    /// # Errors
    ///
    /// Rejects keys that are empty or would escape the root directory.
    pub fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        let is_plain = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !is_plain {
            return Err(StoreError::Unavailable(format!("invalid store key: {key:?}")));
        }
        Ok(self.root.join(format!("{key}.{FILE_EXTENSION}")))
    }
}

impl PersistenceStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let path = self.path_for(key)?;

        match std::fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no settings file yet");
                Ok(None)
            }
            Err(e) => Err(StoreError::Io { path, source: e }),
        }
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        let path = self.path_for(key)?;

        // Ensure directory exists before writing.
        std::fs::create_dir_all(&self.root).map_err(|source| StoreError::Io {
            path: self.root.clone(),
            source,
        })?;

        std::fs::write(&path, value).map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;
        debug!(path = %path.display(), bytes = value.len(), "settings file written");
        Ok(())
    }
}

/// Resolves the platform config directory including the `ssconfig` subdirectory.
fn platform_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        // %APPDATA% e.g. C:\Users\<user>\AppData\Roaming
        std::env::var_os("APPDATA").map(|p| PathBuf::from(p).join("ssconfig"))
    }

    #[cfg(target_os = "linux")]
    {
        // XDG_CONFIG_HOME or ~/.config
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
        Some(base.join("ssconfig"))
    }

    #[cfg(target_os = "macos")]
    {
        std::env::var_os("HOME").map(|h| {
            PathBuf::from(h)
                .join("Library")
                .join("Application Support")
                .join("ssconfig")
        })
    }

    #[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
    {
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn temp_root() -> PathBuf {
        std::env::temp_dir().join(format!("ssconfig_test_{}", Uuid::new_v4()))
    }

    #[test]
    fn test_get_missing_key_returns_none() {
        // Arrange: root directory does not even exist
        let store = FileStore::new(temp_root());

        // Act
        let result = store.get("config123").expect("missing file is not an error");

        // Assert
        assert_eq!(result, None);
    }

    #[test]
    fn test_set_creates_directory_and_get_reads_back() {
        // Arrange
        let root = temp_root();
        let store = FileStore::new(&root);

        // Act
        store.set("config123", b"{\"index\":0}").expect("write");
        let bytes = store.get("config123").expect("read");

        // Assert
        assert_eq!(bytes.as_deref(), Some(&b"{\"index\":0}"[..]));
        assert!(root.join("config123.json").is_file());

        // Cleanup
        std::fs::remove_dir_all(&root).ok();
    }

    #[test]
    fn test_set_overwrites_previous_value() {
        let root = temp_root();
        let store = FileStore::new(&root);

        store.set("k", b"first").expect("write");
        store.set("k", b"second").expect("overwrite");

        assert_eq!(store.get("k").expect("read").as_deref(), Some(&b"second"[..]));
        std::fs::remove_dir_all(&root).ok();
    }

    #[test]
    fn test_keys_are_isolated() {
        let root = temp_root();
        let store = FileStore::new(&root);

        store.set("configA", b"a").expect("write");

        assert_eq!(store.get("configB").expect("read"), None);
        std::fs::remove_dir_all(&root).ok();
    }

    #[test]
    fn test_path_for_rejects_traversal_and_empty_keys() {
        let store = FileStore::new("/tmp/ssconfig");
        for key in ["", "../escape", "a/b", "a\\b", "dot.ted"] {
            assert!(
                matches!(store.path_for(key), Err(StoreError::Unavailable(_))),
                "key {key:?} must be rejected"
            );
        }
    }

    #[test]
    fn test_get_on_directory_path_is_io_error() {
        // Arrange: a directory squats on the file name
        let root = temp_root();
        std::fs::create_dir_all(root.join("config1.json")).expect("create dir");
        let store = FileStore::new(&root);

        // Act
        let result = store.get("config1");

        // Assert
        assert!(matches!(result, Err(StoreError::Io { .. })));
        std::fs::remove_dir_all(&root).ok();
    }

    #[test]
    fn test_platform_config_dir_ends_with_app_name() {
        // May be None in a stripped container without HOME/APPDATA.
        if let Some(dir) = platform_config_dir() {
            assert!(dir.ends_with("ssconfig"), "got {dir:?}");
        }
    }
}
