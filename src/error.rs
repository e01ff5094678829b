//! Error types. Nothing here is fatal: callers degrade to defaults.

use thiserror::Error;

/// Failure reported by a key/value preference store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("storage is unavailable in this session")]
    Unavailable,
    #[error("storage quota exceeded while writing {key}")]
    QuotaExceeded { key: String },
    #[error("storage rejected {key}: {reason}")]
    Rejected { key: String, reason: String },
}

/// Failure parsing the host-supplied dashboard configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid dashboard config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A request body the worker could not decode.
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("malformed JSON body: {0}")]
    Json(#[from] serde_json::Error),
    #[error("missing parameter `{0}`")]
    Missing(&'static str),
}
