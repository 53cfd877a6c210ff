//! Error types for GitHub API operations.

use thiserror::Error;

use crate::retry::RetryError;

/// Errors that can occur when fetching from the GitHub API.
#[derive(Debug, Error)]
pub enum GitHubError {
    /// The retried HTTP call failed (transport, fatal status, or exhausted).
    #[error(transparent)]
    Retry(#[from] RetryError),

    /// JSON parsing failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Repository not found (strict single-repo lookup only).
    #[error("Repository not found: {0}")]
    RepoNotFound(String),

    /// Writing a page body to the scratch directory failed.
    #[error("scratch I/O error: {0}")]
    Scratch(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retry_error_converts_and_keeps_its_message() {
        let err: GitHubError = RetryError::Exhausted {
            attempts: 3,
            last_status: 503,
        }
        .into();
        assert_eq!(
            err.to_string(),
            "giving up after 3 attempts (last status 503)"
        );
    }

    #[test]
    fn repo_not_found_names_the_repository() {
        let err = GitHubError::RepoNotFound("acme/widget".to_string());
        assert_eq!(err.to_string(), "Repository not found: acme/widget");
    }
}
