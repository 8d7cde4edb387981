//! Infrastructure layer: OS-facing adapters.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `ssconfig_core`, but MUST NOT be imported by the `application` or domain
//! layers.
//!
//! # Sub-modules
//!
//! - **`storage`** – `PersistenceStore` implementations: a file-per-key store
//!   in the platform config directory, and an in-memory store for tests and
//!   throwaway sessions.
//!
//! - **`installation`** – Locates the running installation, whose path seeds
//!   the store key.

pub mod installation;
pub mod storage;
