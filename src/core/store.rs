//! Persistence for the three secrets files.
//!
//! Thin wrappers over JSON read/write. The two source files use
//! load-or-`None` semantics: missing and unparsable are indistinguishable
//! first-run cases that degrade to "generate fresh". The derived local file
//! is load-or-error, since reading it before generation is a usage mistake.

use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::core::constants::{FRAMEWORK_SECRETS_FILE, LOCAL_SECRETS_FILE, USER_SECRETS_FILE};
use crate::core::model::SecretsFile;
use crate::error::{Result, StoreError};

/// The three secrets files, in prune order.
pub const SECRETS_FILES: &[&str] = &[
    FRAMEWORK_SECRETS_FILE,
    USER_SECRETS_FILE,
    LOCAL_SECRETS_FILE,
];

/// Load the framework file, or `None` if absent or unreadable.
pub fn load_framework(root: &Path) -> Option<SecretsFile> {
    load_optional(&root.join(FRAMEWORK_SECRETS_FILE))
}

/// Load the user file, or `None` if absent or unreadable.
pub fn load_user(root: &Path) -> Option<SecretsFile> {
    load_optional(&root.join(USER_SECRETS_FILE))
}

/// Load the derived local file.
///
/// # Errors
///
/// Returns `StoreError::NotGenerated` when the file is missing or not a JSON
/// object; both mean generation hasn't produced a usable file yet.
pub fn load_local(root: &Path) -> Result<SecretsFile> {
    let path = root.join(LOCAL_SECRETS_FILE);
    let contents = std::fs::read_to_string(&path).map_err(|_| StoreError::NotGenerated)?;
    let value: Value = serde_json::from_str(&contents).map_err(|_| StoreError::NotGenerated)?;
    SecretsFile::from_value(&value).ok_or_else(|| StoreError::NotGenerated.into())
}

pub fn write_framework(root: &Path, file: &SecretsFile) -> Result<()> {
    write_file(&root.join(FRAMEWORK_SECRETS_FILE), file)
}

pub fn write_user(root: &Path, file: &SecretsFile) -> Result<()> {
    write_file(&root.join(USER_SECRETS_FILE), file)
}

pub fn write_local(root: &Path, file: &SecretsFile) -> Result<()> {
    write_file(&root.join(LOCAL_SECRETS_FILE), file)
}

/// Load any of the secrets files as a raw JSON tree, for generic transforms
/// like deep deletion. `None` if absent or unparsable.
pub fn load_raw(path: &Path) -> Option<Value> {
    let contents = std::fs::read_to_string(path).ok()?;
    serde_json::from_str(&contents).ok()
}

/// Write a raw JSON tree back to disk, pretty-printed.
pub fn write_raw(path: &Path, value: &Value) -> Result<()> {
    let contents = serde_json::to_string_pretty(value).map_err(|e| StoreError::Serialize {
        path: display(path),
        source: e,
    })?;
    std::fs::write(path, contents + "\n").map_err(|e| StoreError::WriteFile {
        path: display(path),
        source: e,
    })?;
    debug!(path = %path.display(), "file written");
    Ok(())
}

fn load_optional(path: &Path) -> Option<SecretsFile> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(_) => {
            debug!(path = %path.display(), "file absent, treating as first run");
            return None;
        }
    };
    let value: Value = match serde_json::from_str(&contents) {
        Ok(value) => value,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "file unparsable, treating as absent");
            return None;
        }
    };
    SecretsFile::from_value(&value)
}

fn write_file(path: &Path, file: &SecretsFile) -> Result<()> {
    write_raw(path, &file.to_value())
}

fn display(path: &Path) -> String {
    path.display().to_string()
}
