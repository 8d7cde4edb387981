//! ConfigManager: the load / repair / save lifecycle of the settings document.
//!
//! # Failure policy (for beginners)
//!
//! Two very different kinds of failure meet in this module:
//!
//! - **Validation failures** are the user's to fix (a blank password, port
//!   `0`).  They are returned as [`ValidationError`] values straight to the
//!   caller so the settings form can show them.
//!
//! - **Persistence failures** are the environment's fault (unreadable store,
//!   corrupted bytes, full disk).  The user cannot fix them from a settings
//!   form, and they must never stop the client from starting.  [`load`] and
//!   [`save`] therefore log them with `tracing` and carry on: `load` falls back
//!   to a built-in baseline document, `save` leaves the previous copy in place.
//!
//! Callers that do want to react to persistence failures (the CLI, for an
//! exit code) use [`try_load`] and [`try_save`], which return them as
//! [`ConfigError`].
//!
//! # Document lifecycle
//!
//! ```text
//! Unloaded ──load()──► Loaded-Valid ──caller edits──► Dirty ──save()──► Loaded-Valid
//! ```
//!
//! There is no invalid state a caller can observe: every document leaving
//! this module has been repaired or clamped.
//!
//! [`load`]: ConfigManager::load
//! [`save`]: ConfigManager::save
//! [`try_load`]: ConfigManager::try_load
//! [`try_save`]: ConfigManager::try_save

use std::path::PathBuf;
use std::sync::Arc;

use ssconfig_core::{ConfigurationDocument, ServerProfile, ValidationError};
use thiserror::Error;
use tracing::{debug, error, info};

use super::store_key::StoreKey;

/// Error type for persistence store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store itself does not exist yet.  Treated as "nothing saved".
    #[error("settings store not found: {0}")]
    NotFound(String),

    /// A file system I/O error occurred.
    #[error("I/O error accessing settings store at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The store refused the operation for a backend-specific reason.
    #[error("settings store unavailable: {0}")]
    Unavailable(String),
}

/// Error type for a full load or save cycle.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The stored bytes are not a valid settings document.
    #[error("failed to decode settings document: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("failed to encode settings document: {0}")]
    Encode(#[source] serde_json::Error),
}

/// A key-addressed byte store holding the settings document.
///
/// Implementations open, operate, and close the backing store inside each
/// call; nothing is held open between calls.
#[cfg_attr(test, mockall::automock)]
pub trait PersistenceStore {
    /// Reads the blob stored under `key`, `Ok(None)` when there is none.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// Replaces the blob stored under `key`.
    fn set(&self, key: &str, value: &[u8]) -> Result<(), StoreError>;
}

/// Loads, repairs, and saves the settings document of one installation.
pub struct ConfigManager {
    store: Arc<dyn PersistenceStore>,
    key: StoreKey,
}

impl ConfigManager {
    /// Creates a manager reading and writing `key` in `store`.
    pub fn new(store: Arc<dyn PersistenceStore>, key: StoreKey) -> Self {
        Self { store, key }
    }

    /// The key the document is stored under.
    pub fn key(&self) -> &StoreKey {
        &self.key
    }

    /// Loads the stored document, always returning a usable one.
    ///
    /// A missing or empty blob yields a fresh, repaired default document.
    /// Any store or decode failure yields [`ConfigurationDocument::baseline`];
    /// failures other than [`StoreError::NotFound`] are logged.
    pub fn load(&self) -> ConfigurationDocument {
        match self.try_load() {
            Ok(doc) => doc,
            Err(ConfigError::Store(StoreError::NotFound(_))) => ConfigurationDocument::baseline(),
            Err(e) => {
                error!(key = %self.key, "failed to load settings, using defaults: {e}");
                ConfigurationDocument::baseline()
            }
        }
    }

    /// Loads and repairs the stored document, reporting failures.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Store`] when the store cannot be read and
    /// [`ConfigError::Decode`] when the blob is not a valid document.
    pub fn try_load(&self) -> Result<ConfigurationDocument, ConfigError> {
        let bytes = self.store.get(self.key.as_str())?.unwrap_or_default();

        let mut doc = match decode_document(&bytes)? {
            Some(mut doc) => {
                doc.is_default_document = false;
                doc
            }
            None => {
                debug!(key = %self.key, "no stored settings, starting from defaults");
                ConfigurationDocument {
                    is_default_document: true,
                    ..ConfigurationDocument::default()
                }
            }
        };

        doc.repair();
        Ok(doc)
    }

    /// Clamps and writes `document`, logging instead of returning failures.
    ///
    /// The clamped selection and the cleared default flag are applied to the
    /// caller's document even when the write fails.  Failed writes are not
    /// retried.
    pub fn save(&self, document: &mut ConfigurationDocument) {
        if let Err(e) = self.try_save(document) {
            error!(key = %self.key, "failed to save settings: {e}");
        }
    }

    /// Clamps and writes `document`, reporting failures.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Encode`] or [`ConfigError::Store`].
    pub fn try_save(&self, document: &mut ConfigurationDocument) -> Result<(), ConfigError> {
        document.clamp_selection();
        document.is_default_document = false;

        let bytes = serde_json::to_vec(document).map_err(ConfigError::Encode)?;
        self.store.set(self.key.as_str(), &bytes)?;

        info!(
            key = %self.key,
            servers = document.servers.len(),
            index = document.active_index,
            "settings saved"
        );
        Ok(())
    }

    /// Validates a candidate profile before it is added to the server list.
    ///
    /// Same rules and order as [`ssconfig_core::check_server_profile`].
    pub fn check_server_profile(profile: &ServerProfile) -> Result<(), ValidationError> {
        ssconfig_core::check_server_profile(profile)
    }
}

/// Decodes a stored blob.  Blank input and a literal `null` mean "no document".
fn decode_document(bytes: &[u8]) -> Result<Option<ConfigurationDocument>, ConfigError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    serde_json::from_slice::<Option<ConfigurationDocument>>(bytes).map_err(ConfigError::Decode)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
