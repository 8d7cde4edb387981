//! Storage infrastructure: settings document persistence.
//!
//! This module provides thin adapters between the configuration manager and
//! whatever actually keeps the bytes.  The manager only sees the
//! `PersistenceStore` trait; it never knows which adapter is behind it.
//!
//! - **`file`** – One file per key in the platform-appropriate config
//!   directory.  Used by the `ssconfig` binary.
//! - **`memory`** – A `HashMap` behind a `Mutex`, with switches that make
//!   reads or writes fail.  Used by tests and the CLI's `--ephemeral` mode.
//!
//! Keeping storage concerns here means the backend can change (registry,
//! embedded KV store) without touching the manager or the document model.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;
