//! Store error types.
//!
//! All store operations return structured errors that provide
//! user-friendly messages and optional remediation hints.

use std::path::PathBuf;
use thiserror::Error;

/// Store operation error.
#[derive(Debug, Error)]
pub enum StoreError {
    /// File I/O error.
    #[error("Failed to {operation} file: {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File content is not valid base64.
    #[error("Invalid data file format: {path}")]
    InvalidFormat { path: PathBuf, reason: String },

    /// Serialization error.
    #[error("Failed to serialize {collection}")]
    Serialization {
        collection: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// Deserialization error.
    #[error("Failed to deserialize {path}")]
    Deserialization {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Atomic write failed (temp file couldn't be renamed).
    #[error("Failed to complete save operation")]
    AtomicWriteFailed {
        temp_path: PathBuf,
        target_path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Username already taken by another user.
    #[error("duplicate username: {username}")]
    DuplicateUsername { username: String },

    /// No user with the given id.
    #[error("user not found: {id}")]
    UserNotFound { id: String },
}

impl StoreError {
    pub(crate) fn io(operation: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            operation,
            path: path.into(),
            source,
        }
    }

    /// Get a user-friendly message for this error.
    pub fn user_message(&self) -> String {
        match self {
            Self::Io {
                operation, path, ..
            } => {
                format!("Could not {} the file at {}", operation, path.display())
            }
            Self::InvalidFormat { path, reason } => {
                format!(
                    "The file at {} is not a valid data file: {}",
                    path.display(),
                    reason
                )
            }
            Self::Serialization { collection, .. } => {
                format!("An error occurred while saving the {collection}.")
            }
            Self::Deserialization { path, .. } => {
                format!(
                    "An error occurred while reading {}. The file may be corrupted.",
                    path.display()
                )
            }
            Self::AtomicWriteFailed { target_path, .. } => {
                format!(
                    "Could not save the file to {}. Please check disk space and permissions.",
                    target_path.display()
                )
            }
            Self::DuplicateUsername { username } => {
                format!("The username '{username}' is already taken.")
            }
            Self::UserNotFound { id } => format!("No user exists with id '{id}'."),
        }
    }

    /// Get a suggestion for how to resolve this error.
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::Io { operation, .. } => {
                if *operation == "read" {
                    Some("Check that the file exists and you have permission to read it.".into())
                } else {
                    Some("Check that you have permission to write to this location.".into())
                }
            }
            Self::InvalidFormat { .. } | Self::Deserialization { .. } => {
                Some("Restore the data directory from a backup or remove the damaged file.".into())
            }
            Self::Serialization { .. } => None,
            Self::AtomicWriteFailed { .. } => {
                Some("Free up disk space or choose a different data directory.".into())
            }
            Self::DuplicateUsername { .. } => Some("Choose a different username.".into()),
            Self::UserNotFound { .. } => None,
        }
    }
}

/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
