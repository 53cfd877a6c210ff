//! Run-level errors for the mode orchestrator.

use thiserror::Error;

use crate::gitea::GiteaError;
use crate::github::GitHubError;

/// Errors that halt a migration run.
#[derive(Debug, Error)]
pub enum MirrorError {
    /// Fetching from the source API failed.
    #[error(transparent)]
    GitHub(#[from] GitHubError),

    /// Owner resolution or submission against the destination failed.
    #[error(transparent)]
    Gitea(#[from] GiteaError),

    /// Org mode found nothing to mirror. The source list endpoint answers an
    /// empty array for both an empty and an unknown organization, so this is
    /// surfaced loudly instead of completing a run that did no work.
    #[error("no repositories found for organization '{0}' (empty or unknown)")]
    NoRepositories(String),

    /// The single-repo reference could not be reduced to owner/name.
    #[error("invalid repository reference '{0}', expected owner/name or a GitHub URL")]
    InvalidRepoReference(String),

    /// Creating the run's scratch directory failed.
    #[error("scratch directory error: {0}")]
    Scratch(#[from] std::io::Error),
}
