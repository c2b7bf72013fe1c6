//! router::resolve
//!
//! Base URL resolution.
//!
//! The base URL is a pure function of an optional override and the page
//! hostname. The router computes it once at construction and every later
//! operation reuses that value, so the environment cannot change mid-load.

use std::time::Duration;

use crate::core::types::Environment;

/// Default local dev server base URL.
pub const DEFAULT_DEV_SERVER_URL: &str = "http://localhost:3000/src";

/// Hostname substring identifying a Webflow staging domain.
pub const DEFAULT_STAGING_MARKER: &str = ".webflow.io";

/// Settings the resolver and loader need.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouterSettings {
    /// Base URL used on staging hosts.
    pub dev_server_url: String,
    /// Base URL used everywhere else.
    pub production_url: String,
    /// Hostname substring that selects the dev server.
    pub staging_marker: String,
    /// Per-resource load timeout. `None` waits indefinitely.
    pub load_timeout: Option<Duration>,
}

impl RouterSettings {
    /// Settings with the default dev server and staging marker.
    pub fn new(production_url: impl Into<String>) -> Self {
        Self {
            dev_server_url: DEFAULT_DEV_SERVER_URL.to_string(),
            production_url: production_url.into(),
            staging_marker: DEFAULT_STAGING_MARKER.to_string(),
            load_timeout: None,
        }
    }

    /// Set the per-resource load timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.load_timeout = Some(timeout);
        self
    }
}

/// The resolved base URL and environment for one page load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedBase {
    pub base_url: String,
    pub environment: Environment,
}

/// Classify a hostname.
pub fn classify(hostname: &str, staging_marker: &str) -> Environment {
    if hostname.contains(staging_marker) {
        Environment::Development
    } else {
        Environment::Production
    }
}

/// Resolve the base URL for a page.
///
/// An override (blank values are ignored) is returned verbatim. Otherwise the
/// hostname picks the dev server or the production URL. The environment is
/// always classified from the hostname.
///
/// # Example
///
/// ```
/// use webflow_scripts::core::types::Environment;
/// use webflow_scripts::router::resolve::{resolve, RouterSettings};
///
/// let settings = RouterSettings::new("https://octocat.github.io/site/dist");
///
/// let staging = resolve(None, "my-site.webflow.io", &settings);
/// assert_eq!(staging.base_url, "http://localhost:3000/src");
/// assert_eq!(staging.environment, Environment::Development);
///
/// let live = resolve(None, "example.com", &settings);
/// assert_eq!(live.base_url, "https://octocat.github.io/site/dist");
///
/// let forced = resolve(Some("https://cdn.example.com/v2"), "my-site.webflow.io", &settings);
/// assert_eq!(forced.base_url, "https://cdn.example.com/v2");
/// ```
pub fn resolve(override_url: Option<&str>, hostname: &str, settings: &RouterSettings) -> ResolvedBase {
    let environment = classify(hostname, &settings.staging_marker);

    let base_url = match override_url.filter(|url| !url.trim().is_empty()) {
        Some(url) => url.to_string(),
        None => match environment {
            Environment::Development => settings.dev_server_url.clone(),
            Environment::Production => settings.production_url.clone(),
        },
    };

    ResolvedBase {
        base_url,
        environment,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> RouterSettings {
        RouterSettings::new("https://octocat.github.io/site/dist")
    }

    #[test]
    fn staging_host_uses_dev_server() {
        let resolved = resolve(None, "foo.webflow.io", &settings());
        assert_eq!(resolved.base_url, DEFAULT_DEV_SERVER_URL);
        assert_eq!(resolved.environment, Environment::Development);
    }

    #[test]
    fn other_host_uses_production() {
        let resolved = resolve(None, "example.com", &settings());
        assert_eq!(resolved.base_url, "https://octocat.github.io/site/dist");
        assert_eq!(resolved.environment, Environment::Production);
    }

    #[test]
    fn override_wins_regardless_of_host() {
        for host in ["foo.webflow.io", "example.com", ""] {
            let resolved = resolve(Some("https://cdn.example.com/v2"), host, &settings());
            assert_eq!(resolved.base_url, "https://cdn.example.com/v2");
        }
    }

    #[test]
    fn override_keeps_host_environment() {
        let resolved = resolve(Some("https://cdn.example.com/v2"), "foo.webflow.io", &settings());
        assert_eq!(resolved.environment, Environment::Development);
    }

    #[test]
    fn blank_override_ignored() {
        let resolved = resolve(Some("  "), "example.com", &settings());
        assert_eq!(resolved.base_url, "https://octocat.github.io/site/dist");
    }

    #[test]
    fn custom_marker() {
        let settings = RouterSettings {
            staging_marker: ".staging.internal".to_string(),
            ..settings()
        };
        assert_eq!(
            classify("site.staging.internal", &settings.staging_marker),
            Environment::Development
        );
        assert_eq!(
            resolve(None, "foo.webflow.io", &settings).environment,
            Environment::Production
        );
    }
}
