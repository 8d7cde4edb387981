//! # ssconfig-core
//!
//! Pure domain layer for the proxy client's persisted settings: the document
//! model, its repair rules, and the validation rule set used by settings
//! forms.
//!
//! This crate performs no I/O.  Reading and writing the document belongs to
//! the `ssconfig` crate, which layers a `ConfigManager` and storage adapters
//! on top of the types defined here.
//!
//! # Architecture overview (for beginners)
//!
//! The proxy client keeps exactly one settings document per installation.
//! It holds a list of upstream servers, which of them is active, the local
//! listening port, a handful of feature toggles, and two nested
//! sub-documents (log viewer appearance and an optional upstream proxy).
//!
//! - **`domain::validation`** – Side-effect-free checks for user input
//!   (ports, credentials, addresses, timeouts).  Each check returns a
//!   [`ValidationError`] naming the offending field.
//!
//! - **`domain::server`** – A single [`ServerProfile`] endpoint.
//!
//! - **`domain::document`** – The aggregate [`ConfigurationDocument`] and the
//!   repair pass that turns any decoded document into a usable one.
//!
//! - **`domain::log_viewer`** / **`domain::proxy`** – Nested sub-documents
//!   that default and repair themselves.

pub mod domain;

pub use domain::document::{ConfigurationDocument, DEFAULT_LOCAL_PORT};
pub use domain::log_viewer::LogViewerConfig;
pub use domain::proxy::{ProxyType, UpstreamProxyConfig, MAX_PROXY_TIMEOUT_SECS};
pub use domain::server::{ServerProfile, DEFAULT_SERVER_TIMEOUT_SECS, MAX_SERVER_TIMEOUT_SECS};
pub use domain::validation::{
    check_address, check_credential, check_local_port, check_port, check_server_profile,
    check_timeout, Field, ValidationError, RESERVED_LOCAL_PORT,
};
