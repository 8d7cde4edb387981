//! Validation rules for user-supplied connection parameters.
//!
//! Every check is a pure function returning `Result<(), ValidationError>`.
//! Settings forms call the single-field checks for live feedback while the
//! user types; [`check_server_profile`] runs the full chain before a profile
//! is accepted into the server list.
//!
//! Validation never corrects input.  A failing value is reported back to the
//! caller, which decides how to present it.
//!
//! # Why `i32` for ports and timeouts?
//!
//! Form fields can hold any integer the user types, including `0`, negatives,
//! and values above 65535.  Using a signed type keeps those values
//! representable so they can be rejected with a precise message instead of
//! failing earlier in parsing.

use std::fmt;

use thiserror::Error;

use super::server::{ServerProfile, MAX_SERVER_TIMEOUT_SECS};

/// Local port that the listener must never bind to.
///
/// Another component of the deployment already owns this port.
pub const RESERVED_LOCAL_PORT: i32 = 8123;

const MAX_PORT: i32 = 65535;

/// The input field a [`ValidationError`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Port,
    LocalPort,
    Credential,
    Address,
    Timeout,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Port => "port",
            Field::LocalPort => "local port",
            Field::Credential => "password",
            Field::Address => "server address",
            Field::Timeout => "timeout",
        };
        f.write_str(name)
    }
}

/// User input outside its contractual bounds.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A port outside `1..=65535`.
    #[error("port out of range: {0} (must be between 1 and 65535)")]
    PortOutOfRange(i32),

    /// The local listener was asked to use [`RESERVED_LOCAL_PORT`].
    #[error("local port can't be {0}")]
    ReservedLocalPort(i32),

    /// The password is empty or whitespace only.
    #[error("password can not be blank")]
    BlankCredential,

    /// The server address is empty or whitespace only.
    #[error("server address can not be blank")]
    BlankAddress,

    /// A timeout that is non-positive or above its maximum.
    #[error("timeout {timeout} is invalid, it should be between 1 and {max} seconds")]
    TimeoutOutOfRange { timeout: i32, max: i32 },
}

impl ValidationError {
    /// Returns the field that failed validation.
    pub fn field(&self) -> Field {
        match self {
            ValidationError::PortOutOfRange(_) => Field::Port,
            ValidationError::ReservedLocalPort(_) => Field::LocalPort,
            ValidationError::BlankCredential => Field::Credential,
            ValidationError::BlankAddress => Field::Address,
            ValidationError::TimeoutOutOfRange { .. } => Field::Timeout,
        }
    }
}

/// Checks that `port` is a usable TCP/UDP port number.
///
/// # Errors
///
/// Returns [`ValidationError::PortOutOfRange`] when `port <= 0 || port > 65535`.
pub fn check_port(port: i32) -> Result<(), ValidationError> {
    if port <= 0 || port > MAX_PORT {
        return Err(ValidationError::PortOutOfRange(port));
    }
    Ok(())
}

/// Checks the port the local listener binds to.
///
/// Applies [`check_port`] first, then rejects [`RESERVED_LOCAL_PORT`].
///
/// # Errors
///
/// Returns [`ValidationError::PortOutOfRange`] or
/// [`ValidationError::ReservedLocalPort`].
pub fn check_local_port(port: i32) -> Result<(), ValidationError> {
    check_port(port)?;
    if port == RESERVED_LOCAL_PORT {
        return Err(ValidationError::ReservedLocalPort(port));
    }
    Ok(())
}

/// Checks that a password is present.
pub fn check_credential(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::BlankCredential);
    }
    Ok(())
}

/// Checks that a server address is present.
pub fn check_address(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::BlankAddress);
    }
    Ok(())
}

/// Checks that `timeout` lies in `1..=max_timeout` seconds.
///
/// # Errors
///
/// Returns [`ValidationError::TimeoutOutOfRange`] carrying both values.
pub fn check_timeout(timeout: i32, max_timeout: i32) -> Result<(), ValidationError> {
    if timeout <= 0 || timeout > max_timeout {
        return Err(ValidationError::TimeoutOutOfRange {
            timeout,
            max: max_timeout,
        });
    }
    Ok(())
}

/// Validates a complete server profile.
///
/// Checks run in a fixed order and stop at the first failure:
/// port, password, address, timeout (against [`MAX_SERVER_TIMEOUT_SECS`]).
/// When several fields are wrong only the first in that order is reported.
pub fn check_server_profile(profile: &ServerProfile) -> Result<(), ValidationError> {
    check_port(profile.port)?;
    check_credential(&profile.password)?;
    check_address(&profile.address)?;
    check_timeout(profile.timeout, MAX_SERVER_TIMEOUT_SECS)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
