//! Gitea API client: owner resolution and idempotent creation calls.

use std::sync::Arc;
use std::time::Duration;

use super::error::GiteaError;
use super::types::{CreateOrgRequest, GiteaOrg, GiteaUser, MigrationRequest};
use crate::http::{HttpRequest, HttpTransport, ReqwestTransport};
use crate::retry::{RetryError, RetryPolicy, send_with_retry};

/// Gitea API client.
///
/// Compatible with self-hosted Gitea and Forgejo instances. Both creation
/// calls succeed silently when the resource already exists, so whole runs can
/// be re-invoked safely without any local bookkeeping of what was migrated.
#[derive(Clone)]
pub struct GiteaClient {
    transport: Arc<dyn HttpTransport>,
    host: String,
    token: String,
    policy: RetryPolicy,
}

impl GiteaClient {
    /// Create a new client.
    ///
    /// # Arguments
    ///
    /// * `host` - Gitea base URL (e.g., "https://git.example.com")
    /// * `token` - personal access token, sent on every call
    pub fn new(host: &str, token: &str, timeout: Duration) -> Result<Self, GiteaError> {
        let transport = ReqwestTransport::with_timeout(timeout)
            .map_err(|e| GiteaError::Retry(RetryError::Transport(e)))?;
        Ok(Self::new_with_transport(
            host,
            token,
            RetryPolicy::default(),
            Arc::new(transport),
        ))
    }

    pub fn new_with_transport(
        host: &str,
        token: &str,
        policy: RetryPolicy,
        transport: Arc<dyn HttpTransport>,
    ) -> Self {
        Self {
            transport,
            host: host.trim_end_matches('/').to_string(),
            token: token.to_string(),
            policy,
        }
    }

    /// Get the host URL.
    pub fn host(&self) -> &str {
        &self.host
    }

    fn headers(&self) -> Vec<(String, String)> {
        vec![
            ("Accept".to_string(), "application/json".to_string()),
            ("User-Agent".to_string(), "gitmirror".to_string()),
            ("Authorization".to_string(), format!("token {}", self.token)),
        ]
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/v1{}", self.host, path)
    }

    /// Resolve an organization to its id.
    pub async fn get_org(&self, org: &str) -> Result<GiteaOrg, GiteaError> {
        let out = send_with_retry(
            self.transport.as_ref(),
            HttpRequest::get(self.url(&format!("/orgs/{org}")), self.headers()),
            &self.policy,
        )
        .await
        .map_err(|e| match e {
            RetryError::Fatal { status: 404, .. } => GiteaError::OrgNotFound(org.to_string()),
            other => GiteaError::Retry(other),
        })?;
        Ok(serde_json::from_slice(&out.body)?)
    }

    /// Resolve a user to their id.
    pub async fn get_user(&self, user: &str) -> Result<GiteaUser, GiteaError> {
        let out = send_with_retry(
            self.transport.as_ref(),
            HttpRequest::get(self.url(&format!("/users/{user}")), self.headers()),
            &self.policy,
        )
        .await
        .map_err(|e| match e {
            RetryError::Fatal { status: 404, .. } => GiteaError::UserNotFound(user.to_string()),
            other => GiteaError::Retry(other),
        })?;
        Ok(serde_json::from_slice(&out.body)?)
    }

    /// Create an organization, tolerating one that already exists.
    ///
    /// Returns `true` when the organization was created, `false` when the
    /// destination answered 422 because it was already there.
    pub async fn create_org(&self, name: &str, visibility: &str) -> Result<bool, GiteaError> {
        let body = serde_json::to_vec(&CreateOrgRequest {
            username: name.to_string(),
            visibility: visibility.to_string(),
        })?;

        let out = send_with_retry(
            self.transport.as_ref(),
            HttpRequest::post_json(self.url("/orgs"), self.headers(), body),
            &self.policy,
        )
        .await?;

        if out.already_existed {
            tracing::info!(org = name, "destination organization already exists");
        } else {
            tracing::info!(org = name, visibility, "created destination organization");
        }
        Ok(!out.already_existed)
    }

    /// Submit one migration request, tolerating an already-mirrored repo.
    ///
    /// Returns `true` when a new mirror was created, `false` when the
    /// destination answered 409 because the repository already exists.
    pub async fn migrate_repo(&self, request: &MigrationRequest) -> Result<bool, GiteaError> {
        tracing::info!(repo = %request.repo_name, "submitting migration");

        let body = serde_json::to_vec(request)?;
        let out = send_with_retry(
            self.transport.as_ref(),
            HttpRequest::post_json(self.url("/repos/migrate"), self.headers(), body),
            &self.policy,
        )
        .await?;

        if out.already_existed {
            tracing::info!(repo = %request.repo_name, "repository already mirrored, skipping");
        }
        Ok(!out.already_existed)
    }
}
