//! Gitmirror CLI - mirror GitHub repositories into a self-hosted Gitea.

mod commands;
mod config;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "gitmirror")]
#[command(version)]
#[command(about = "Mirror GitHub repositories into a self-hosted Gitea instance")]
#[command(
    long_about = "Gitmirror sets up pull mirrors on a Gitea instance from GitHub: a single \
repository, everything an organization or user owns, or everything a user has \
starred. Submissions are idempotent, so re-running a mode skips repositories \
that are already mirrored."
)]
#[command(after_long_help = r#"EXAMPLES
    Mirror a single repository:
        $ gitmirror repo https://github.com/rust-lang/rust

    Mirror every repository of an organization:
        $ gitmirror org rust-lang

    Mirror everything you own, with issues and releases:
        $ gitmirror user alice --issues --releases

    Mirror everything a user has starred:
        $ gitmirror star alice

    Generate shell completions:
        $ gitmirror completions bash > ~/.local/share/bash-completion/completions/gitmirror

CONFIGURATION
    Gitmirror reads configuration from:
      1. ~/.config/gitmirror/config.toml (or $XDG_CONFIG_HOME/gitmirror/config.toml)
      2. ./gitmirror.toml
      3. Environment variables (GITMIRROR_* prefix)
      4. .env file in current directory

ENVIRONMENT VARIABLES
    GITMIRROR_GITEA_URL          Gitea base URL (e.g. https://gitea.example.com)
    GITMIRROR_GITEA_TOKEN        Gitea API token
    GITMIRROR_GITHUB_TOKEN       GitHub personal access token (needed for private repos)
    GITMIRROR_GITHUB_USERNAME    GitHub username paired with the token
"#)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Mirror a single repository (URL or owner/name)
    Repo {
        /// Repository reference: https://github.com/owner/name or owner/name
        reference: String,

        /// LFS server endpoint override for this repository
        #[arg(long)]
        lfs_endpoint: Option<String>,

        #[command(flatten)]
        opts: MirrorFlags,
    },
    /// Mirror every repository of a GitHub organization
    Org {
        /// Organization name
        name: String,

        /// Visibility of the destination organization if it has to be created
        #[arg(long, default_value = "public")]
        visibility: String,

        #[command(flatten)]
        opts: MirrorFlags,
    },
    /// Mirror every repository owned by the configured GitHub user
    User {
        /// Destination Gitea account to own the mirrors
        name: String,

        #[command(flatten)]
        opts: MirrorFlags,
    },
    /// Mirror every repository starred by a GitHub user
    Star {
        /// GitHub user whose stars to mirror; also the destination account
        user: String,

        #[command(flatten)]
        opts: MirrorFlags,
    },
    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        shell: clap_complete::Shell,
    },
}

/// Migration content toggles shared across all modes.
#[derive(Debug, Clone, clap::Args)]
struct MirrorFlags {
    /// Also migrate issues
    #[arg(long)]
    issues: bool,

    /// Also migrate pull requests
    #[arg(long)]
    pull_requests: bool,

    /// Also migrate releases
    #[arg(long)]
    releases: bool,

    /// Also migrate labels
    #[arg(long)]
    labels: bool,

    /// Also migrate milestones
    #[arg(long)]
    milestones: bool,

    /// Also mirror LFS objects
    #[arg(long)]
    lfs: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::new("gitmirror=info,gitmirror_cli=info"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    // Completions need no configuration or network access
    if let Commands::Completions { shell } = &cli.command {
        commands::meta::handle_completions(*shell)?;
        return Ok(());
    }

    let config = config::Config::load();

    match cli.command {
        Commands::Repo {
            reference,
            lfs_endpoint,
            opts,
        } => commands::mirror::handle_repo(&config, &reference, lfs_endpoint, &opts).await?,
        Commands::Org {
            name,
            visibility,
            opts,
        } => commands::mirror::handle_org(&config, &name, &visibility, &opts).await?,
        Commands::User { name, opts } => {
            commands::mirror::handle_user(&config, &name, &opts).await?;
        }
        Commands::Star { user, opts } => {
            commands::mirror::handle_star(&config, &user, &opts).await?;
        }
        Commands::Completions { .. } => unreachable!("handled above"),
    }

    Ok(())
}
