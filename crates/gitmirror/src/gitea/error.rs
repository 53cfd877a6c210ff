//! Error types for Gitea API operations.

use thiserror::Error;

use crate::retry::RetryError;

/// Errors that can occur when interacting with the Gitea API.
#[derive(Debug, Error)]
pub enum GiteaError {
    /// The retried HTTP call failed (transport, fatal status, or exhausted).
    #[error(transparent)]
    Retry(#[from] RetryError),

    /// JSON parsing failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Organization not found during owner resolution.
    #[error("Organization not found: {0}")]
    OrgNotFound(String),

    /// User not found during owner resolution.
    #[error("User not found: {0}")]
    UserNotFound(String),
}
