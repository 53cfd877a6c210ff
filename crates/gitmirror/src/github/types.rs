//! GitHub API data types.

use serde::Deserialize;

/// GitHub repository - fields we need from the API response.
///
/// Only the fields this tool consumes are declared, which keeps
/// deserialization resilient to API additions.
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubRepo {
    /// Repository name.
    pub name: String,
    /// HTTP clone URL, copied verbatim into the migration payload.
    pub clone_url: String,
    /// Repository description (may be null).
    pub description: Option<String>,
    /// Whether the repository is private.
    pub private: bool,
    /// Owner information.
    pub owner: GitHubOwner,
}

/// Repository owner.
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubOwner {
    /// Username/login.
    pub login: String,
}

/// Operator-supplied source credentials.
///
/// Used both for basic auth against the source API and, for private
/// repositories, forwarded in the migration payload so the destination can
/// pull from the source.
#[derive(Debug, Clone)]
pub struct SourceCredentials {
    pub username: String,
    pub token: String,
}
