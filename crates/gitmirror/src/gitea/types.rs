//! Gitea API data types.

use serde::{Deserialize, Serialize};

/// Gitea organization - fields we need from the API response.
#[derive(Debug, Clone, Deserialize)]
pub struct GiteaOrg {
    /// Organization ID, used as the migration target uid.
    pub id: i64,
    /// Organization username.
    pub username: String,
}

/// Gitea user.
#[derive(Debug, Clone, Deserialize)]
pub struct GiteaUser {
    /// User ID, used as the migration target uid.
    pub id: i64,
    /// Username/login.
    pub login: String,
}

/// Body of `POST /api/v1/orgs`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateOrgRequest {
    pub username: String,
    pub visibility: String,
}

/// Body of `POST /api/v1/repos/migrate`.
///
/// Constructed once per source record by the transformer and consumed exactly
/// once by the submitter. Optional fields are omitted from the wire payload
/// entirely rather than sent empty: credentials never leak for public
/// repositories and the destination sees only the owner shape it was given.
#[derive(Debug, Clone, Serialize)]
pub struct MigrationRequest {
    /// Source clone URL, copied verbatim.
    pub clone_addr: String,
    /// Destination repository name.
    pub repo_name: String,
    /// Always true: this tool only ever creates mirrors.
    pub mirror: bool,
    pub private: bool,
    /// At most 255 characters; the destination schema rejects longer values.
    pub description: String,
    /// Destination owner id (bulk modes).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uid: Option<i64>,
    /// Destination owner name (single-repo mode).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repo_owner: Option<String>,
    /// Source credentials, present only for private repositories.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_password: Option<String>,
    pub wiki: bool,
    pub issues: bool,
    pub pull_requests: bool,
    pub releases: bool,
    pub labels: bool,
    pub milestones: bool,
    pub lfs: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lfs_endpoint: Option<String>,
}
