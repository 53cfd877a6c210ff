//! Handlers for the four migration modes.

use std::time::Duration;

use gitmirror::{GitHubClient, GiteaClient, MirrorOptions, MirrorSummary, Mirrorer};

use crate::MirrorFlags;
use crate::config::Config;

const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

fn mirror_options(flags: &MirrorFlags, lfs_endpoint: Option<String>) -> MirrorOptions {
    MirrorOptions {
        issues: flags.issues,
        pull_requests: flags.pull_requests,
        releases: flags.releases,
        labels: flags.labels,
        milestones: flags.milestones,
        lfs: flags.lfs,
        lfs_endpoint,
    }
}

fn build_mirrorer(
    config: &Config,
    flags: &MirrorFlags,
    lfs_endpoint: Option<String>,
) -> Result<Mirrorer, Box<dyn std::error::Error>> {
    let (gitea_url, gitea_token) = config.destination()?;
    let credentials = config.source_credentials();

    let github = GitHubClient::new(credentials.clone(), HTTP_TIMEOUT)?;
    let gitea = GiteaClient::new(&gitea_url, &gitea_token, HTTP_TIMEOUT)?;

    Ok(Mirrorer::new(
        github,
        gitea,
        credentials,
        mirror_options(flags, lfs_endpoint),
    ))
}

fn report(summary: MirrorSummary) {
    println!(
        "Done: {} mirrored, {} already present ({} total)",
        summary.submitted,
        summary.already_existing,
        summary.total()
    );
}

pub(crate) async fn handle_repo(
    config: &Config,
    reference: &str,
    lfs_endpoint: Option<String>,
    flags: &MirrorFlags,
) -> Result<(), Box<dyn std::error::Error>> {
    let mirrorer = build_mirrorer(config, flags, lfs_endpoint)?;
    report(mirrorer.mirror_repo(reference).await?);
    Ok(())
}

pub(crate) async fn handle_org(
    config: &Config,
    name: &str,
    visibility: &str,
    flags: &MirrorFlags,
) -> Result<(), Box<dyn std::error::Error>> {
    let mirrorer = build_mirrorer(config, flags, None)?;
    report(mirrorer.mirror_org(name, visibility).await?);
    Ok(())
}

pub(crate) async fn handle_user(
    config: &Config,
    name: &str,
    flags: &MirrorFlags,
) -> Result<(), Box<dyn std::error::Error>> {
    let mirrorer = build_mirrorer(config, flags, None)?;
    report(mirrorer.mirror_user(name).await?);
    Ok(())
}

pub(crate) async fn handle_star(
    config: &Config,
    user: &str,
    flags: &MirrorFlags,
) -> Result<(), Box<dyn std::error::Error>> {
    let mirrorer = build_mirrorer(config, flags, None)?;
    report(mirrorer.mirror_starred(user).await?);
    Ok(())
}
