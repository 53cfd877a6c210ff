//! Gitmirror - mirror GitHub repositories into a self-hosted Gitea.
//!
//! This library drives both REST APIs to set up pull mirrors on a Gitea
//! instance: it fetches repository records from GitHub (a single repository,
//! everything an organization or user owns, or everything a user has
//! starred), transforms each record into a Gitea migration payload, and
//! submits them one at a time. Submissions are idempotent: a mirror that
//! already exists on the destination is skipped, not an error.
//!
//! All HTTP goes through the [`http::HttpTransport`] seam and the shared
//! retrier in [`retry`], so transient upstream failures and rate limiting
//! are handled uniformly.
//!
//! # Example
//!
//! ```ignore
//! use std::time::Duration;
//! use gitmirror::{GitHubClient, GiteaClient, MirrorOptions, Mirrorer};
//!
//! let github = GitHubClient::new(None, Duration::from_secs(30))?;
//! let gitea = GiteaClient::new("https://gitea.example.com", "token", Duration::from_secs(30))?;
//! let mirrorer = Mirrorer::new(github, gitea, None, MirrorOptions::default());
//!
//! let summary = mirrorer.mirror_org("rust-lang", "public").await?;
//! println!("{} mirrored, {} already present", summary.submitted, summary.already_existing);
//! ```

pub mod gitea;
pub mod github;
pub mod http;
pub mod mirror;
pub mod retry;
pub mod scratch;

pub use gitea::{GiteaClient, GiteaError, MigrationRequest};
pub use github::{GitHubClient, GitHubError, GitHubRepo, SourceCredentials};
pub use mirror::{
    DestOwner, MirrorError, MirrorOptions, MirrorSummary, Mirrorer, parse_repo_ref,
};
