//! ssconfig library entry point.
//!
//! Re-exports all public modules so that integration tests in `tests/`
//! and the binary entry point in `main.rs` share the same module tree.
//!
//! # What does ssconfig do? (for beginners)
//!
//! A proxy client needs its settings (server list, active server, local port,
//! toggles) to survive restarts.  This crate owns that lifecycle:
//!
//! 1. **Load** the stored document from a key-addressed byte store.
//! 2. **Repair** whatever came back (missing, partial, or outdated) into a
//!    document that satisfies every invariant, falling back to a built-in
//!    baseline when the stored bytes cannot be read at all.
//! 3. **Validate** candidate server profiles and ports the user types in.
//! 4. **Save** the document back after the user changes something.
//!
//! Load and save never crash the host: persistence failures are logged and
//! absorbed.  Validation failures are returned to the caller, who shows them
//! to the user.

/// Application layer: the configuration manager and its storage abstraction.
pub mod application;

/// Infrastructure layer: concrete persistence stores.
pub mod infrastructure;

pub use application::manage_config::{ConfigError, ConfigManager, PersistenceStore, StoreError};
pub use application::store_key::StoreKey;
pub use ssconfig_core::{
    check_local_port, check_port, check_server_profile, check_timeout, ConfigurationDocument,
    ServerProfile, ValidationError,
};
