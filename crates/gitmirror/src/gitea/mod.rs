//! Gitea API client (destination side of the migration).

pub mod client;
pub mod error;
pub mod types;

pub use client::GiteaClient;
pub use error::GiteaError;
pub use types::{GiteaOrg, GiteaUser, MigrationRequest};
