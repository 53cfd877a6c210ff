//! GitHub API client and pagination loop.

use std::sync::Arc;
use std::time::Duration;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::de::DeserializeOwned;

use super::error::GitHubError;
use super::types::{GitHubRepo, SourceCredentials};
use crate::http::{HttpRequest, HttpTransport, ReqwestTransport};
use crate::retry::{RetryError, RetryPolicy, send_with_retry};
use crate::scratch::RunContext;

/// Default GitHub API host.
pub const GITHUB_API_HOST: &str = "https://api.github.com";

/// Records requested per page. A page shorter than this terminates the loop.
pub const PAGE_SIZE: u32 = 100;

/// GitHub API client.
///
/// All calls go through the shared retrier; list endpoints page through
/// results until a short page is seen.
#[derive(Clone)]
pub struct GitHubClient {
    transport: Arc<dyn HttpTransport>,
    host: String,
    credentials: Option<SourceCredentials>,
    policy: RetryPolicy,
}

impl GitHubClient {
    /// Create a client against api.github.com.
    ///
    /// `credentials` are optional: fully public reads work without them.
    pub fn new(
        credentials: Option<SourceCredentials>,
        timeout: Duration,
    ) -> Result<Self, GitHubError> {
        let transport = ReqwestTransport::with_timeout(timeout)
            .map_err(|e| GitHubError::Retry(RetryError::Transport(e)))?;
        Ok(Self::new_with_transport(
            GITHUB_API_HOST,
            credentials,
            RetryPolicy::default(),
            Arc::new(transport),
        ))
    }

    pub fn new_with_transport(
        host: &str,
        credentials: Option<SourceCredentials>,
        policy: RetryPolicy,
        transport: Arc<dyn HttpTransport>,
    ) -> Self {
        Self {
            transport,
            host: host.trim_end_matches('/').to_string(),
            credentials,
            policy,
        }
    }

    /// Get the host URL.
    pub fn host(&self) -> &str {
        &self.host
    }

    fn headers(&self) -> Vec<(String, String)> {
        let mut headers = vec![
            ("Accept".to_string(), "application/vnd.github+json".to_string()),
            ("User-Agent".to_string(), "gitmirror".to_string()),
        ];
        if let Some(creds) = &self.credentials {
            let encoded = BASE64.encode(format!("{}:{}", creds.username, creds.token));
            headers.push(("Authorization".to_string(), format!("Basic {encoded}")));
        }
        headers
    }

    /// Issue one retried GET and return the raw body.
    async fn get_raw(&self, path: &str) -> Result<Vec<u8>, GitHubError> {
        let url = format!("{}{}", self.host, path);
        let out = send_with_retry(
            self.transport.as_ref(),
            HttpRequest::get(url, self.headers()),
            &self.policy,
        )
        .await?;
        Ok(out.body)
    }

    /// Fetch all pages of a list endpoint.
    ///
    /// Pages are requested sequentially starting at 1; a page with fewer than
    /// [`PAGE_SIZE`] records is the last one. Each raw page body is written to
    /// the run's scratch directory when one is provided, and a running total
    /// is logged after every page for operator visibility during long runs.
    pub async fn fetch_pages<T: DeserializeOwned>(
        &self,
        namespace: &str,
        route_fn: impl Fn(u32) -> String,
        ctx: Option<&RunContext>,
    ) -> Result<Vec<T>, GitHubError> {
        let mut all_items: Vec<T> = Vec::new();
        let mut page = 1u32;

        loop {
            let body = self.get_raw(&route_fn(page)).await?;
            if let Some(ctx) = ctx {
                ctx.write_page(namespace, page, &body)?;
            }

            let items: Vec<T> = serde_json::from_slice(&body)?;
            let count = items.len();
            all_items.extend(items);

            tracing::info!(
                namespace,
                page,
                count,
                total = all_items.len(),
                "fetched page"
            );

            if count < PAGE_SIZE as usize {
                break;
            }
            page += 1;
        }

        Ok(all_items)
    }

    /// Fetch a single repository by owner and name.
    ///
    /// Unlike the list endpoints, absence here is a real error: a 404 maps to
    /// [`GitHubError::RepoNotFound`].
    pub async fn get_repo(&self, owner: &str, name: &str) -> Result<GitHubRepo, GitHubError> {
        let body = self
            .get_raw(&format!("/repos/{owner}/{name}"))
            .await
            .map_err(|e| match e {
                GitHubError::Retry(RetryError::Fatal { status: 404, .. }) => {
                    GitHubError::RepoNotFound(format!("{owner}/{name}"))
                }
                other => other,
            })?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// List all repositories of an organization.
    ///
    /// The endpoint answers an empty array both for an empty org and for an
    /// unknown one, so an empty result is reported as a distinct outcome here
    /// and interpreted by the caller per mode.
    pub async fn list_org_repos(
        &self,
        org: &str,
        ctx: Option<&RunContext>,
    ) -> Result<Vec<GitHubRepo>, GitHubError> {
        let repos = self
            .fetch_pages(
                org,
                |page| format!("/orgs/{org}/repos?page={page}&per_page={PAGE_SIZE}"),
                ctx,
            )
            .await?;
        if repos.is_empty() {
            tracing::warn!(org, "no repositories found (organization empty or unknown)");
        }
        Ok(repos)
    }

    /// List all repositories owned by the authenticated user.
    pub async fn list_own_repos(
        &self,
        ctx: Option<&RunContext>,
    ) -> Result<Vec<GitHubRepo>, GitHubError> {
        let repos = self
            .fetch_pages(
                "own-repos",
                |page| format!("/user/repos?affiliation=owner&page={page}&per_page={PAGE_SIZE}"),
                ctx,
            )
            .await?;
        if repos.is_empty() {
            tracing::warn!("authenticated user owns no repositories");
        }
        Ok(repos)
    }

    /// List all repositories starred by `user`.
    pub async fn list_starred_repos(
        &self,
        user: &str,
        ctx: Option<&RunContext>,
    ) -> Result<Vec<GitHubRepo>, GitHubError> {
        let repos = self
            .fetch_pages(
                user,
                |page| format!("/users/{user}/starred?page={page}&per_page={PAGE_SIZE}"),
                ctx,
            )
            .await?;
        if repos.is_empty() {
            tracing::warn!(user, "no starred repositories found");
        }
        Ok(repos)
    }
}
