//! Mode orchestrator.
//!
//! Each mode runs the same strictly sequential pipeline: resolve the
//! destination owner, fetch the source records, transform and submit them one
//! at a time. Any fetch or resolution failure aborts the run before any
//! further submission; serial execution plus the retrier's backoff is the
//! rate-limit strategy, so nothing here is parallel.

use crate::gitea::GiteaClient;
use crate::github::{GitHubClient, GitHubRepo, SourceCredentials};
use crate::mirror::error::MirrorError;
use crate::mirror::request::{DestOwner, MirrorOptions, build_migration_request};
use crate::scratch::RunContext;

/// Outcome of a completed run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MirrorSummary {
    /// Mirrors newly created on the destination.
    pub submitted: usize,
    /// Records skipped because the destination already had them.
    pub already_existing: usize,
}

impl MirrorSummary {
    /// Total records attempted.
    #[must_use]
    pub fn total(&self) -> usize {
        self.submitted + self.already_existing
    }
}

/// Reduce a repository reference to an owner/name pair.
///
/// Accepts `owner/name`, a full `https://github.com/owner/name` URL, or
/// either of those with a trailing `.git` or `/`.
pub fn parse_repo_ref(reference: &str) -> Result<(String, String), MirrorError> {
    let trimmed = reference.trim().trim_end_matches('/');
    let path = match trimmed.find("github.com/") {
        Some(idx) => &trimmed[idx + "github.com/".len()..],
        None => trimmed,
    };
    let path = path.strip_suffix(".git").unwrap_or(path);

    let mut segments = path.split('/');
    match (segments.next(), segments.next(), segments.next()) {
        (Some(owner), Some(name), None) if !owner.is_empty() && !name.is_empty() => {
            Ok((owner.to_string(), name.to_string()))
        }
        _ => Err(MirrorError::InvalidRepoReference(reference.to_string())),
    }
}

/// Drives one migration run against both APIs.
pub struct Mirrorer {
    github: GitHubClient,
    gitea: GiteaClient,
    credentials: Option<SourceCredentials>,
    options: MirrorOptions,
}

impl Mirrorer {
    pub fn new(
        github: GitHubClient,
        gitea: GiteaClient,
        credentials: Option<SourceCredentials>,
        options: MirrorOptions,
    ) -> Self {
        Self {
            github,
            gitea,
            credentials,
            options,
        }
    }

    /// Transform and submit the fetched records one at a time.
    async fn submit_all(
        &self,
        repos: &[GitHubRepo],
        owner: &DestOwner,
        options: &MirrorOptions,
    ) -> Result<MirrorSummary, MirrorError> {
        let mut summary = MirrorSummary::default();
        for repo in repos {
            let request =
                build_migration_request(repo, owner, self.credentials.as_ref(), options);
            if self.gitea.migrate_repo(&request).await? {
                summary.submitted += 1;
            } else {
                summary.already_existing += 1;
            }
        }
        Ok(summary)
    }

    /// Mirror every repository of a source organization into a destination
    /// organization of the same name, creating it if needed.
    ///
    /// Finding zero repositories aborts the run: the source endpoint cannot
    /// distinguish an empty organization from a misspelled one.
    pub async fn mirror_org(&self, org: &str, visibility: &str) -> Result<MirrorSummary, MirrorError> {
        let ctx = RunContext::new()?;

        self.gitea.create_org(org, visibility).await?;
        let owner = self.gitea.get_org(org).await?;
        let repos = self.github.list_org_repos(org, Some(&ctx)).await?;
        if repos.is_empty() {
            return Err(MirrorError::NoRepositories(org.to_string()));
        }

        let summary = self
            .submit_all(
                &repos,
                &DestOwner::Uid(owner.id),
                &self.options.without_lfs_endpoint(),
            )
            .await?;
        tracing::info!(
            org,
            submitted = summary.submitted,
            already_existing = summary.already_existing,
            "organization run complete"
        );
        Ok(summary)
    }

    /// Mirror a single repository, addressed by URL or `owner/name`.
    ///
    /// Uses the owner-name payload shape; this is the one mode where an LFS
    /// endpoint override is forwarded.
    pub async fn mirror_repo(&self, reference: &str) -> Result<MirrorSummary, MirrorError> {
        let (owner, name) = parse_repo_ref(reference)?;
        let repo = self.github.get_repo(&owner, &name).await?;

        let summary = self
            .submit_all(
                std::slice::from_ref(&repo),
                &DestOwner::Name(owner),
                &self.options,
            )
            .await?;
        tracing::info!(repo = %reference, "single-repository run complete");
        Ok(summary)
    }

    /// Mirror every repository owned by the authenticated source user into
    /// the destination account named `user`.
    ///
    /// An empty result is a legitimate zero-work run, not an error.
    pub async fn mirror_user(&self, user: &str) -> Result<MirrorSummary, MirrorError> {
        let ctx = RunContext::new()?;

        let owner = self.gitea.get_user(user).await?;
        let repos = self.github.list_own_repos(Some(&ctx)).await?;

        let summary = self
            .submit_all(
                &repos,
                &DestOwner::Uid(owner.id),
                &self.options.without_lfs_endpoint(),
            )
            .await?;
        tracing::info!(
            user,
            submitted = summary.submitted,
            already_existing = summary.already_existing,
            "user run complete"
        );
        Ok(summary)
    }

    /// Mirror every repository starred by the given source user into the
    /// destination account of the same name.
    ///
    /// An empty star list is a legitimate zero-work run, not an error.
    pub async fn mirror_starred(&self, user: &str) -> Result<MirrorSummary, MirrorError> {
        let ctx = RunContext::new()?;

        let owner = self.gitea.get_user(user).await?;
        let repos = self.github.list_starred_repos(user, Some(&ctx)).await?;

        let summary = self
            .submit_all(
                &repos,
                &DestOwner::Uid(owner.id),
                &self.options.without_lfs_endpoint(),
            )
            .await?;
        tracing::info!(
            user,
            submitted = summary.submitted,
            already_existing = summary.already_existing,
            "starred run complete"
        );
        Ok(summary)
    }
}
