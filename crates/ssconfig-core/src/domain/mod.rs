//! Domain entities for the settings document.
//!
//! Everything here is plain data plus pure functions.  Nothing in this module
//! touches the file system, the registry, or the network, so every rule can be
//! unit-tested on any platform without setup.
//!
//! Code in outer layers (the `ssconfig` manager and its storage adapters)
//! depends on these types; the domain never depends on them.

/// Aggregate settings document and its repair pass.
pub mod document;
pub mod log_viewer;
pub mod proxy;
pub mod server;
/// Input validation rules shared by the manager and settings forms.
pub mod validation;
mod wire;
