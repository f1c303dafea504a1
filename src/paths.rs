//! Deterministic location of the local store.

use crate::errors::{Error, Result};
use std::path::PathBuf;

/// Environment variable overriding the store root.
pub const ROOT_ENV: &str = "SECRETS_STASH_ROOT";

const STORE_DIR_NAME: &str = "secrets-stash";

/// Root directory for the local store.
///
/// `SECRETS_STASH_ROOT` takes precedence; otherwise the store lives under
/// the platform configuration directory.
pub fn default_store_root() -> Result<PathBuf> {
    if let Ok(root) = std::env::var(ROOT_ENV) {
        if !root.trim().is_empty() {
            return Ok(PathBuf::from(root));
        }
    }
    dirs::config_dir()
        .map(|dir| dir.join(STORE_DIR_NAME))
        .ok_or_else(|| Error::Storage("no configuration directory available".to_string()))
}
