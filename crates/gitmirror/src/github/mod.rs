//! GitHub API client (source side of the migration).

pub mod client;
pub mod error;
pub mod types;

pub use client::{GitHubClient, PAGE_SIZE};
pub use error::GitHubError;
pub use types::{GitHubOwner, GitHubRepo, SourceCredentials};
