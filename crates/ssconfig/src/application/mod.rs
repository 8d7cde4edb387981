//! Application layer for the settings lifecycle.
//!
//! # Sub-modules
//!
//! - **`manage_config`** – `ConfigManager`: load with repair and fallback,
//!   save with selection clamping, and the standalone validators settings
//!   forms call for live feedback.  Also defines the `PersistenceStore` trait
//!   the infrastructure layer implements.
//!
//! - **`store_key`** – Derivation of the per-installation key the document is
//!   stored under.
//!
//! Nothing here touches the file system directly; all I/O goes through the
//! `PersistenceStore` abstraction so the manager can be tested against
//! in-memory doubles.

pub mod manage_config;
pub mod store_key;
