//! core::config::schema
//!
//! Configuration schema types.
//!
//! # Global Config
//!
//! Located at (in order of precedence):
//! 1. `$WEBFLOW_SCRIPTS_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/webflow-scripts/config.toml`
//! 3. `~/.webflow-scripts/config.toml` (canonical write location)
//!
//! # Project Config
//!
//! Located at `.webflow-scripts.json` in the project root. The file is JSON
//! with camelCase keys so it stays readable by the JS side of a project.
//!
//! # Validation
//!
//! Config values are validated after parsing (e.g., URLs must be http(s),
//! the staging domain must be a Webflow staging domain).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::router::resolve::DEFAULT_STAGING_MARKER;

/// Global configuration (user scope).
///
/// # Example
///
/// ```toml
/// dev_server_url = "http://localhost:3000/src"
/// staging_marker = ".webflow.io"
/// load_timeout_ms = 10000
/// interactive = true
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Base URL of the local dev server used on staging hosts
    pub dev_server_url: Option<String>,

    /// Hostname substring identifying the staging domain
    pub staging_marker: Option<String>,

    /// Per-resource load timeout in milliseconds
    pub load_timeout_ms: Option<u64>,

    /// Default interactive mode
    pub interactive: Option<bool>,
}

impl GlobalConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(url) = &self.dev_server_url {
            validate_http_url("dev_server_url", url)?;
        }

        if let Some(marker) = &self.staging_marker {
            if marker.trim().is_empty() {
                return Err(ConfigError::InvalidValue(
                    "staging_marker cannot be empty".to_string(),
                ));
            }
        }

        if self.load_timeout_ms == Some(0) {
            return Err(ConfigError::InvalidValue(
                "load_timeout_ms must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}

/// Project configuration, written by `init`.
///
/// # Example
///
/// ```json
/// {
///   "githubUsername": "octocat",
///   "repoName": "site-scripts",
///   "webflowDomain": "my-site.webflow.io",
///   "customDomain": "",
///   "useGitHubPages": true,
///   "setupDate": "2026-01-01T00:00:00Z"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectConfig {
    /// GitHub account hosting the repository
    pub github_username: String,

    /// Repository name (also the GitHub Pages path)
    pub repo_name: String,

    /// Webflow staging domain, e.g. `my-site.webflow.io`
    pub webflow_domain: String,

    /// Optional production domain
    #[serde(default)]
    pub custom_domain: String,

    /// Whether GitHub Pages hosts the built assets
    #[serde(default = "default_true", rename = "useGitHubPages")]
    pub use_github_pages: bool,

    /// When the project was scaffolded
    pub setup_date: DateTime<Utc>,
}

fn default_true() -> bool {
    true
}

impl ProjectConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.github_username.trim().is_empty() {
            return Err(ConfigError::InvalidValue(
                "githubUsername cannot be empty".to_string(),
            ));
        }

        if self.repo_name.trim().is_empty() {
            return Err(ConfigError::InvalidValue(
                "repoName cannot be empty".to_string(),
            ));
        }

        if self.github_username.contains('/') || self.repo_name.contains('/') {
            return Err(ConfigError::InvalidValue(
                "githubUsername and repoName cannot contain '/'".to_string(),
            ));
        }

        Ok(())
    }

    /// Whether the staging domain looks like a Webflow staging host.
    pub fn is_staging_domain(&self) -> bool {
        self.webflow_domain.contains(DEFAULT_STAGING_MARKER)
    }

    /// GitHub Pages site URL: `https://{user}.github.io/{repo}`.
    pub fn github_pages_url(&self) -> String {
        format!(
            "https://{}.github.io/{}",
            self.github_username, self.repo_name
        )
    }

    /// URL production assets are served from (the build output under `/dist`).
    pub fn production_script_url(&self) -> String {
        format!("{}/dist", self.github_pages_url())
    }
}

fn validate_http_url(key: &str, url: &str) -> Result<(), ConfigError> {
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue(format!(
            "{} must be an http(s) URL, got '{}'",
            key, url
        )))
    }
}
