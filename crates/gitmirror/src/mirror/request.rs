//! Transformation of one source record into one migration payload.

use crate::gitea::types::MigrationRequest;
use crate::github::types::{GitHubRepo, SourceCredentials};

/// Hard limit imposed by the destination schema on repo descriptions.
pub const MAX_DESCRIPTION_CHARS: usize = 255;

/// The resolved destination owner, in the shape the invoked migration
/// variant expects: a numeric id in bulk modes, an owner name in single-repo
/// mode.
#[derive(Debug, Clone)]
pub enum DestOwner {
    Uid(i64),
    Name(String),
}

/// Operator-selected feature toggles for the migration payload.
///
/// Everything defaults to off; `mirror` and `wiki` are not toggles, they are
/// always requested.
#[derive(Debug, Clone, Default)]
pub struct MirrorOptions {
    pub issues: bool,
    pub pull_requests: bool,
    pub releases: bool,
    pub labels: bool,
    pub milestones: bool,
    pub lfs: bool,
    /// Accepted by the destination only on the single-repo migration
    /// variant; bulk modes clear it before transforming.
    pub lfs_endpoint: Option<String>,
}

impl MirrorOptions {
    /// Copy of these options with the LFS endpoint override removed.
    #[must_use]
    pub fn without_lfs_endpoint(&self) -> Self {
        Self {
            lfs_endpoint: None,
            ..self.clone()
        }
    }
}

/// Build the migration payload for one source record.
///
/// Pure: no I/O, no mutation of inputs. Credentials are attached only when
/// the source repository is private, so public mirrors never carry them.
#[must_use]
pub fn build_migration_request(
    repo: &GitHubRepo,
    owner: &DestOwner,
    credentials: Option<&SourceCredentials>,
    options: &MirrorOptions,
) -> MigrationRequest {
    let (uid, repo_owner) = match owner {
        DestOwner::Uid(id) => (Some(*id), None),
        DestOwner::Name(name) => (None, Some(name.clone())),
    };

    let (auth_username, auth_password) = if repo.private {
        match credentials {
            Some(creds) => (Some(creds.username.clone()), Some(creds.token.clone())),
            None => (None, None),
        }
    } else {
        (None, None)
    };

    MigrationRequest {
        clone_addr: repo.clone_url.clone(),
        repo_name: repo.name.clone(),
        mirror: true,
        private: repo.private,
        description: truncate_description(repo.description.as_deref().unwrap_or_default()),
        uid,
        repo_owner,
        auth_username,
        auth_password,
        wiki: true,
        issues: options.issues,
        pull_requests: options.pull_requests,
        releases: options.releases,
        labels: options.labels,
        milestones: options.milestones,
        lfs: options.lfs,
        lfs_endpoint: options.lfs_endpoint.clone(),
    }
}

/// Truncate to the destination's 255-character limit. Character-based so a
/// multi-byte boundary can never split, and no ellipsis is appended.
fn truncate_description(description: &str) -> String {
    description.chars().take(MAX_DESCRIPTION_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::types::GitHubOwner;

    fn source_repo(private: bool, description: &str) -> GitHubRepo {
        GitHubRepo {
            name: "widget".to_string(),
            clone_url: "https://github.com/acme/widget.git".to_string(),
            description: Some(description.to_string()),
            private,
            owner: GitHubOwner {
                login: "acme".to_string(),
            },
        }
    }

    fn creds() -> SourceCredentials {
        SourceCredentials {
            username: "alice".to_string(),
            token: "secret".to_string(),
        }
    }

    #[test]
    fn private_repo_gets_auth_and_truncated_description() {
        let long = "d".repeat(300);
        let repo = source_repo(true, &long);

        let req = build_migration_request(
            &repo,
            &DestOwner::Uid(42),
            Some(&creds()),
            &MirrorOptions::default(),
        );

        assert!(req.private);
        assert_eq!(req.auth_username.as_deref(), Some("alice"));
        assert_eq!(req.auth_password.as_deref(), Some("secret"));
        assert_eq!(req.description.chars().count(), 255);
        assert!(!req.description.ends_with('…'));
    }

    #[test]
    fn public_repo_omits_auth_fields_entirely() {
        let repo = source_repo(false, "a public repo");

        let req = build_migration_request(
            &repo,
            &DestOwner::Uid(42),
            Some(&creds()),
            &MirrorOptions::default(),
        );

        assert!(!req.private);
        assert!(req.auth_username.is_none());
        assert!(req.auth_password.is_none());

        let value = serde_json::to_value(&req).expect("payload should serialize");
        let obj = value.as_object().expect("payload is an object");
        assert!(!obj.contains_key("auth_username"));
        assert!(!obj.contains_key("auth_password"));
    }

    #[test]
    fn mirror_and_wiki_are_always_requested() {
        let req = build_migration_request(
            &source_repo(false, ""),
            &DestOwner::Uid(1),
            None,
            &MirrorOptions::default(),
        );
        assert!(req.mirror);
        assert!(req.wiki);
        assert!(!req.issues);
        assert!(!req.pull_requests);
        assert!(!req.releases);
        assert!(!req.lfs);
    }

    #[test]
    fn owner_shape_follows_the_mode() {
        let repo = source_repo(false, "");

        let bulk =
            build_migration_request(&repo, &DestOwner::Uid(42), None, &MirrorOptions::default());
        assert_eq!(bulk.uid, Some(42));
        assert!(bulk.repo_owner.is_none());

        let single = build_migration_request(
            &repo,
            &DestOwner::Name("acme".to_string()),
            None,
            &MirrorOptions::default(),
        );
        assert!(single.uid.is_none());
        assert_eq!(single.repo_owner.as_deref(), Some("acme"));
    }

    #[test]
    fn clone_addr_is_copied_verbatim() {
        let req = build_migration_request(
            &source_repo(false, ""),
            &DestOwner::Uid(1),
            None,
            &MirrorOptions::default(),
        );
        assert_eq!(req.clone_addr, "https://github.com/acme/widget.git");
    }

    #[test]
    fn multibyte_description_truncates_on_character_boundary() {
        let long = "é".repeat(300);
        let req = build_migration_request(
            &source_repo(false, &long),
            &DestOwner::Uid(1),
            None,
            &MirrorOptions::default(),
        );
        assert_eq!(req.description.chars().count(), 255);
        assert!(req.description.chars().all(|c| c == 'é'));
    }

    #[test]
    fn option_toggles_flow_through() {
        let options = MirrorOptions {
            issues: true,
            pull_requests: true,
            releases: true,
            labels: true,
            milestones: true,
            lfs: true,
            lfs_endpoint: Some("https://lfs.example.com".to_string()),
        };
        let req = build_migration_request(
            &source_repo(false, ""),
            &DestOwner::Name("acme".to_string()),
            None,
            &options,
        );
        assert!(req.issues && req.pull_requests && req.releases);
        assert!(req.labels && req.milestones && req.lfs);
        assert_eq!(req.lfs_endpoint.as_deref(), Some("https://lfs.example.com"));
    }

    #[test]
    fn without_lfs_endpoint_clears_only_the_endpoint() {
        let options = MirrorOptions {
            lfs: true,
            lfs_endpoint: Some("https://lfs.example.com".to_string()),
            ..Default::default()
        };
        let bulk = options.without_lfs_endpoint();
        assert!(bulk.lfs);
        assert!(bulk.lfs_endpoint.is_none());
    }
}
