//! Error types for warren operations.
//!
//! Errors are grouped by concern so callers can match on the category
//! (`Error::Config`, `Error::Resolve`, `Error::Store`) without enumerating
//! every variant. The CLI layer translates these into remediation text.

use thiserror::Error;

/// Top-level error wrapping all category errors.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("key generation failed: {0}")]
    KeyGeneration(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Project configuration errors. Fatal: generation aborts before any write.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("service '{service}' has no port; add `port` to it in warren.json")]
    MissingPort { service: String },

    #[error("invalid service name '{name}': {reason}")]
    InvalidServiceName { name: String, reason: String },

    #[error("no project config found: warren.json missing")]
    NotInitialized,

    #[error("failed to read warren.json: {0}")]
    ReadFile(std::io::Error),

    #[error("failed to parse warren.json: {0}")]
    Parse(serde_json::Error),
}

/// Referential integrity errors raised while resolving merged secrets.
///
/// A missing reference means a service would boot without a credential it
/// expects, so resolution fails loudly instead of dropping the entry.
#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("service '{service}' references unknown secret '{reference}'")]
    MissingReference { service: String, reference: String },
}

/// Secrets file persistence errors.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("failed to read {path}: {source}")]
    ReadFile {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    WriteFile {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to serialize {path}: {source}")]
    Serialize {
        path: String,
        source: serde_json::Error,
    },

    #[error("{path} does not contain a JSON object")]
    NotAnObject { path: String },

    #[error("secrets.local.json not found: run `warren generate` first")]
    NotGenerated,
}

pub type Result<T> = std::result::Result<T, Error>;
