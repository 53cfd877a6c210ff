//! Configuration file support for gitmirror.
//!
//! Configuration is loaded with the following precedence (highest to lowest):
//! 1. Environment variables (prefixed with `GITMIRROR_`, e.g. `GITMIRROR_GITEA_TOKEN`)
//! 2. Local config file (./gitmirror.toml)
//! 3. XDG config file (~/.config/gitmirror/config.toml)
//!
//! Example config file:
//! ```toml
//! [gitea]
//! url = "https://gitea.example.com"
//! token = "..."      # or use GITMIRROR_GITEA_TOKEN env var
//!
//! [github]
//! token = "ghp_..."  # or use GITMIRROR_GITHUB_TOKEN env var
//! username = "alice" # or use GITMIRROR_GITHUB_USERNAME env var
//! ```

use std::io;
use std::path::PathBuf;

use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use directories::ProjectDirs;
use gitmirror::SourceCredentials;
use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Destination Gitea instance.
    pub gitea: GiteaConfig,
    /// Source GitHub credentials.
    pub github: GitHubConfig,
}

/// Destination Gitea configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct GiteaConfig {
    /// Gitea base URL (e.g. "https://gitea.example.com").
    /// Can also be set via GITMIRROR_GITEA_URL environment variable.
    pub url: Option<String>,
    /// Gitea API token.
    /// Can also be set via GITMIRROR_GITEA_TOKEN environment variable.
    pub token: Option<String>,
}

/// Source GitHub configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct GitHubConfig {
    /// GitHub personal access token.
    /// Can also be set via GITMIRROR_GITHUB_TOKEN environment variable.
    pub token: Option<String>,
    /// GitHub username paired with the token.
    /// Can also be set via GITMIRROR_GITHUB_USERNAME environment variable.
    pub username: Option<String>,
}

impl Config {
    /// Load configuration using the config crate's layered approach.
    ///
    /// Sources are loaded in order (later sources override earlier):
    /// 1. XDG config file (~/.config/gitmirror/config.toml)
    /// 2. Local config file (./gitmirror.toml)
    /// 3. Environment variables with GITMIRROR_ prefix
    pub fn load() -> Self {
        let mut builder = ConfigBuilder::builder();

        if let Some(proj_dirs) = ProjectDirs::from("", "", "gitmirror") {
            let xdg_config = proj_dirs.config_dir().join("config.toml");
            if xdg_config.exists() {
                tracing::debug!("Loading config from {:?}", xdg_config);
                builder = builder.add_source(
                    File::from(xdg_config)
                        .format(FileFormat::Toml)
                        .required(false),
                );
            }
        }

        let local_config = PathBuf::from("gitmirror.toml");
        if local_config.exists() {
            tracing::debug!("Loading config from ./gitmirror.toml");
            builder = builder.add_source(
                File::from(local_config)
                    .format(FileFormat::Toml)
                    .required(false),
            );
        }

        // e.g. GITMIRROR_GITEA_URL -> gitea.url
        builder = builder.add_source(
            Environment::with_prefix("GITMIRROR")
                .separator("_")
                .try_parsing(true),
        );

        match builder.build() {
            Ok(settings) => match settings.try_deserialize::<Config>() {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!("Failed to deserialize config: {}", e);
                    Config::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to build config: {}", e);
                Config::default()
            }
        }
    }

    /// Destination URL and token, both of which are required before any
    /// network call is made.
    pub fn destination(&self) -> io::Result<(String, String)> {
        let url = self.gitea.url.clone().ok_or_else(|| {
            io::Error::other(
                "Gitea URL is not configured (set GITMIRROR_GITEA_URL or [gitea] url)",
            )
        })?;
        let token = self.gitea.token.clone().ok_or_else(|| {
            io::Error::other(
                "Gitea token is not configured (set GITMIRROR_GITEA_TOKEN or [gitea] token)",
            )
        })?;
        Ok((url, token))
    }

    /// Source credentials, present only when both the token and the username
    /// are configured. Public repositories migrate fine without them.
    pub fn source_credentials(&self) -> Option<SourceCredentials> {
        match (&self.github.username, &self.github.token) {
            (Some(username), Some(token)) => Some(SourceCredentials {
                username: username.clone(),
                token: token.clone(),
            }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_nothing_configured() {
        let config = Config::default();
        assert!(config.gitea.url.is_none());
        assert!(config.gitea.token.is_none());
        assert!(config.github.token.is_none());
        assert!(config.github.username.is_none());
    }

    #[test]
    fn toml_content_parses_into_all_fields() {
        let toml_content = r#"
            [gitea]
            url = "https://gitea.example.com"
            token = "dest-token"

            [github]
            token = "ghp_test123"
            username = "alice"
        "#;

        let settings = ConfigBuilder::builder()
            .add_source(config::File::from_str(toml_content, FileFormat::Toml))
            .build()
            .unwrap();

        let config: Config = settings.try_deserialize().unwrap();

        assert_eq!(
            config.gitea.url,
            Some("https://gitea.example.com".to_string())
        );
        assert_eq!(config.gitea.token, Some("dest-token".to_string()));
        assert_eq!(config.github.token, Some("ghp_test123".to_string()));
        assert_eq!(config.github.username, Some("alice".to_string()));
    }

    #[test]
    fn partial_toml_leaves_other_fields_defaulted() {
        let toml_content = r#"
            [gitea]
            url = "https://gitea.example.com"
        "#;

        let settings = ConfigBuilder::builder()
            .add_source(config::File::from_str(toml_content, FileFormat::Toml))
            .build()
            .unwrap();

        let config: Config = settings.try_deserialize().unwrap();

        assert_eq!(
            config.gitea.url,
            Some("https://gitea.example.com".to_string())
        );
        assert!(config.gitea.token.is_none());
        assert!(config.github.token.is_none());
    }

    #[test]
    fn destination_requires_url_and_token() {
        let config = Config::default();
        assert!(config.destination().is_err());

        let config = Config {
            gitea: GiteaConfig {
                url: Some("https://gitea.example.com".to_string()),
                token: None,
            },
            ..Default::default()
        };
        assert!(config.destination().is_err());

        let config = Config {
            gitea: GiteaConfig {
                url: Some("https://gitea.example.com".to_string()),
                token: Some("tok".to_string()),
            },
            ..Default::default()
        };
        let (url, token) = config.destination().unwrap();
        assert_eq!(url, "https://gitea.example.com");
        assert_eq!(token, "tok");
    }

    #[test]
    fn source_credentials_need_both_username_and_token() {
        let config = Config {
            github: GitHubConfig {
                token: Some("ghp_test".to_string()),
                username: None,
            },
            ..Default::default()
        };
        assert!(config.source_credentials().is_none());

        let config = Config {
            github: GitHubConfig {
                token: Some("ghp_test".to_string()),
                username: Some("alice".to_string()),
            },
            ..Default::default()
        };
        let creds = config.source_credentials().unwrap();
        assert_eq!(creds.username, "alice");
        assert_eq!(creds.token, "ghp_test");
    }

    #[test]
    fn environment_prefix_builder_is_valid() {
        let env_source = Environment::with_prefix("GITMIRROR")
            .separator("_")
            .prefix_separator("_");
        let _builder = ConfigBuilder::builder().add_source(env_source);
    }
}
