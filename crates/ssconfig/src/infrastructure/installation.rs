//! Locating the running installation.

use std::path::PathBuf;

use crate::application::store_key::StoreKey;

/// Directory containing the running executable.
///
/// # Errors
///
/// Returns the underlying I/O error when the executable path cannot be
/// resolved, or `NotFound` when it has no parent directory.
pub fn current_installation_dir() -> std::io::Result<PathBuf> {
    let exe = std::env::current_exe()?;
    exe.parent().map(PathBuf::from).ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("executable path has no parent: {}", exe.display()),
        )
    })
}

/// Store key for the running installation.
pub fn current_store_key() -> std::io::Result<StoreKey> {
    Ok(StoreKey::for_installation(&current_installation_dir()?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_installation_dir_contains_test_binary() {
        let dir = current_installation_dir().expect("test binary has a directory");
        let exe = std::env::current_exe().expect("current exe");
        assert!(exe.starts_with(&dir));
    }

    #[test]
    fn test_current_store_key_is_stable_within_process() {
        let a = current_store_key().expect("key");
        let b = current_store_key().expect("key");
        assert_eq!(a, b);
    }
}
