//! core::config
//!
//! Configuration schema and loading.
//!
//! # Overview
//!
//! There are two configuration scopes:
//! - **Global**: User-level router defaults (TOML)
//! - **Project**: The scaffolded project's `.webflow-scripts.json`
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Global config file
//! 3. Project config file
//! 4. CLI flags (not handled here)
//!
//! # Global Config Locations
//!
//! Searched in order:
//! 1. `$WEBFLOW_SCRIPTS_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/webflow-scripts/config.toml`
//! 3. `~/.webflow-scripts/config.toml` (canonical write location)
//!
//! # Example
//!
//! ```no_run
//! use webflow_scripts::core::config::Config;
//! use std::path::Path;
//!
//! let result = Config::load(Some(Path::new("/path/to/project"))).unwrap();
//! let config = result.config;
//!
//! println!("Dev server: {}", config.dev_server_url());
//! if let Some(project) = config.project.as_ref() {
//!     println!("Production: {}", project.production_script_url());
//! }
//! ```

pub mod schema;

pub use schema::{GlobalConfig, ProjectConfig};

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::core::paths::ProjectPaths;
use crate::router::resolve::{RouterSettings, DEFAULT_DEV_SERVER_URL, DEFAULT_STAGING_MARKER};

/// Environment variable pointing at an explicit global config file.
pub const CONFIG_ENV_VAR: &str = "WEBFLOW_SCRIPTS_CONFIG";

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("failed to write config file '{path}': {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config value: {0}")]
    InvalidValue(String),

    #[error("project not initialized in '{0}'")]
    NotInitialized(PathBuf),

    #[error("home directory not found")]
    NoHomeDir,
}

/// Warnings generated during config loading.
#[derive(Debug, Clone)]
pub struct ConfigWarning {
    /// The warning message.
    pub message: String,
    /// The path that triggered the warning.
    pub path: PathBuf,
}

/// Result of loading configuration.
#[derive(Debug)]
pub struct ConfigLoadResult {
    /// The loaded configuration.
    pub config: Config,
    /// Any warnings generated during loading.
    pub warnings: Vec<ConfigWarning>,
}

/// Merged configuration from all sources.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Global configuration
    pub global: GlobalConfig,
    /// Project configuration (if in an initialized project)
    pub project: Option<ProjectConfig>,
    global_path: Option<PathBuf>,
    project_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from default locations.
    ///
    /// If `project_root` is provided, also loads the project config.
    ///
    /// # Errors
    ///
    /// Returns an error if config files exist but cannot be parsed.
    /// Missing config files are not an error (defaults are used).
    pub fn load(project_root: Option<&Path>) -> Result<ConfigLoadResult, ConfigError> {
        let global_path = Self::find_global();
        Self::load_files(global_path.as_deref(), project_root)
    }

    /// Load configuration from an explicit global config file.
    ///
    /// `global_path` may be `None` (defaults) or point at a missing file.
    pub fn load_files(
        global_path: Option<&Path>,
        project_root: Option<&Path>,
    ) -> Result<ConfigLoadResult, ConfigError> {
        let mut warnings = Vec::new();

        let (global, global_path) = match global_path {
            Some(path) if path.exists() => (Self::read_global_config(path)?, Some(path.to_path_buf())),
            _ => (GlobalConfig::default(), None),
        };
        global.validate()?;

        let (project, project_path) = match project_root {
            Some(root) => {
                let path = ProjectPaths::new(root).config_path();
                if path.exists() {
                    let project = Self::read_project_config(&path)?;
                    project.validate()?;
                    (Some(project), Some(path))
                } else {
                    (None, None)
                }
            }
            None => (None, None),
        };

        if let (Some(project), Some(path)) = (&project, &project_path) {
            let marker = global
                .staging_marker
                .as_deref()
                .unwrap_or(DEFAULT_STAGING_MARKER);
            if !project.webflow_domain.contains(marker) {
                warnings.push(ConfigWarning {
                    message: format!(
                        "webflow domain '{}' does not contain the staging marker '{}'; \
                         pages there will load production assets",
                        project.webflow_domain, marker
                    ),
                    path: path.clone(),
                });
            }
        }

        Ok(ConfigLoadResult {
            config: Config {
                global,
                project,
                global_path,
                project_path,
            },
            warnings,
        })
    }

    /// Locate the global config file, if any.
    fn find_global() -> Option<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
        }

        if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_home).join("webflow-scripts/config.toml");
            if path.exists() {
                return Some(path);
            }
        }

        dirs::home_dir()
            .map(|home| home.join(".webflow-scripts/config.toml"))
            .filter(|path| path.exists())
    }

    fn read_global_config(path: &Path) -> Result<GlobalConfig, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    fn read_project_config(path: &Path) -> Result<ProjectConfig, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        serde_json::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Read the project config, failing if the project is not initialized.
    pub fn require_project(project_root: &Path) -> Result<ProjectConfig, ConfigError> {
        let path = ProjectPaths::new(project_root).config_path();
        if !path.exists() {
            return Err(ConfigError::NotInitialized(project_root.to_path_buf()));
        }
        let project = Self::read_project_config(&path)?;
        project.validate()?;
        Ok(project)
    }

    /// Get the path global config is written to.
    ///
    /// Returns `$WEBFLOW_SCRIPTS_CONFIG` if set, else `~/.webflow-scripts/config.toml`.
    pub fn global_config_path() -> Result<PathBuf, ConfigError> {
        if let Some(path) = std::env::var_os(CONFIG_ENV_VAR).filter(|p| !p.is_empty()) {
            return Ok(PathBuf::from(path));
        }
        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
        Ok(home.join(".webflow-scripts/config.toml"))
    }

    /// Write global config atomically.
    pub fn write_global(path: &Path, config: &GlobalConfig) -> Result<(), ConfigError> {
        config.validate()?;
        let contents =
            toml::to_string_pretty(config).map_err(|e| ConfigError::InvalidValue(e.to_string()))?;
        write_atomic(path, &contents)
    }

    /// Write project config atomically.
    pub fn write_project(project_root: &Path, config: &ProjectConfig) -> Result<PathBuf, ConfigError> {
        let path = ProjectPaths::new(project_root).config_path();
        let mut contents = serde_json::to_string_pretty(config)
            .map_err(|e| ConfigError::InvalidValue(e.to_string()))?;
        contents.push('\n');
        write_atomic(&path, &contents)?;
        Ok(path)
    }

    // =========================================================================
    // Accessor methods with precedence
    // =========================================================================

    /// Get the dev server base URL.
    ///
    /// Defaults to `http://localhost:3000/src`.
    pub fn dev_server_url(&self) -> &str {
        self.global
            .dev_server_url
            .as_deref()
            .unwrap_or(DEFAULT_DEV_SERVER_URL)
    }

    /// Get the staging hostname marker.
    ///
    /// Defaults to `.webflow.io`.
    pub fn staging_marker(&self) -> &str {
        self.global
            .staging_marker
            .as_deref()
            .unwrap_or(DEFAULT_STAGING_MARKER)
    }

    /// Get the per-resource load timeout. `None` waits indefinitely.
    pub fn load_timeout(&self) -> Option<Duration> {
        self.global.load_timeout_ms.map(Duration::from_millis)
    }

    /// Check if interactive mode is enabled by default.
    ///
    /// Defaults to `true` if not configured.
    pub fn interactive(&self) -> bool {
        self.global.interactive.unwrap_or(true)
    }

    /// Build router settings from this configuration.
    ///
    /// `production_url` overrides the project's production URL.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if no production URL is known.
    pub fn router_settings(&self, production_url: Option<&str>) -> Result<RouterSettings, ConfigError> {
        let production_url = match (production_url, &self.project) {
            (Some(url), _) => url.to_string(),
            (None, Some(project)) => project.production_script_url(),
            (None, None) => {
                return Err(ConfigError::InvalidValue(
                    "no production URL: initialize a project or pass one explicitly".to_string(),
                ))
            }
        };

        let mut settings = RouterSettings::new(production_url);
        settings.dev_server_url = self.dev_server_url().to_string();
        settings.staging_marker = self.staging_marker().to_string();
        settings.load_timeout = self.load_timeout();
        Ok(settings)
    }

    /// Get the path to the loaded global config file.
    pub fn global_config_loaded_from(&self) -> Option<&Path> {
        self.global_path.as_deref()
    }

    /// Get the path to the loaded project config file.
    pub fn project_config_loaded_from(&self) -> Option<&Path> {
        self.project_path.as_deref()
    }
}

/// Write a file atomically: temp file in the same directory, then rename.
pub(crate) fn write_atomic(path: &Path, contents: &str) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| ConfigError::WriteError {
            path: path.to_path_buf(),
            source: e,
        })?;
    }

    let mut temp_name = path.file_name().unwrap_or_default().to_os_string();
    temp_name.push(".tmp");
    let temp_path = path.with_file_name(temp_name);

    let mut file = fs::File::create(&temp_path).map_err(|e| ConfigError::WriteError {
        path: temp_path.clone(),
        source: e,
    })?;

    file.write_all(contents.as_bytes())
        .map_err(|e| ConfigError::WriteError {
            path: temp_path.clone(),
            source: e,
        })?;

    file.sync_all().map_err(|e| ConfigError::WriteError {
        path: temp_path.clone(),
        source: e,
    })?;

    fs::rename(&temp_path, path).map_err(|e| ConfigError::WriteError {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn project() -> ProjectConfig {
        ProjectConfig {
            github_username: "octocat".to_string(),
            repo_name: "site-scripts".to_string(),
            webflow_domain: "my-site.webflow.io".to_string(),
            custom_domain: String::new(),
            use_github_pages: true,
            setup_date: "2026-01-01T00:00:00Z".parse().unwrap(),
        }
    }

    #[test]
    fn load_empty_defaults() {
        let result = Config::load_files(None, None).unwrap();
        let config = result.config;

        assert!(config.project.is_none());
        assert_eq!(config.dev_server_url(), "http://localhost:3000/src");
        assert_eq!(config.staging_marker(), ".webflow.io");
        assert!(config.load_timeout().is_none());
        assert!(config.interactive());
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn load_global_file() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("config.toml");
        fs::write(
            &config_path,
            r#"
            dev_server_url = "http://localhost:5173/src"
            load_timeout_ms = 2500
            interactive = false
            "#,
        )
        .unwrap();

        let result = Config::load_files(Some(&config_path), None).unwrap();
        let config = result.config;

        assert_eq!(config.dev_server_url(), "http://localhost:5173/src");
        assert_eq!(config.load_timeout(), Some(Duration::from_millis(2500)));
        assert!(!config.interactive());
        assert_eq!(config.global_config_loaded_from(), Some(config_path.as_path()));
    }

    #[test]
    fn missing_global_file_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope.toml");
        let result = Config::load_files(Some(&missing), None).unwrap();
        assert!(result.config.global_config_loaded_from().is_none());
    }

    #[test]
    fn unknown_global_fields_rejected() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("config.toml");
        fs::write(&config_path, "unknown_field = true").unwrap();

        let result = Config::load_files(Some(&config_path), None);
        assert!(matches!(result, Err(ConfigError::ParseError { .. })));
    }

    #[test]
    fn write_global_then_load() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested/config.toml");
        let global = GlobalConfig {
            staging_marker: Some(".staging.test".to_string()),
            ..Default::default()
        };

        Config::write_global(&path, &global).unwrap();
        let loaded = Config::load_files(Some(&path), None).unwrap();
        assert_eq!(loaded.config.global, global);
        assert_eq!(loaded.config.staging_marker(), ".staging.test");
    }

    #[test]
    fn write_global_validates() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        let global = GlobalConfig {
            dev_server_url: Some("localhost:3000".to_string()),
            ..Default::default()
        };
        assert!(Config::write_global(&path, &global).is_err());
        assert!(!path.exists());
    }

    #[test]
    fn write_and_load_project() {
        let temp = TempDir::new().unwrap();
        let path = Config::write_project(temp.path(), &project()).unwrap();
        assert!(path.exists());
        assert!(!temp.path().join(".webflow-scripts.json.tmp").exists());

        let loaded = Config::load_files(None, Some(temp.path())).unwrap();
        assert_eq!(loaded.config.project, Some(project()));
        assert!(loaded.warnings.is_empty());
    }

    #[test]
    fn non_staging_domain_warns() {
        let temp = TempDir::new().unwrap();
        let config = ProjectConfig {
            webflow_domain: "example.com".to_string(),
            ..project()
        };
        Config::write_project(temp.path(), &config).unwrap();

        let loaded = Config::load_files(None, Some(temp.path())).unwrap();
        assert_eq!(loaded.warnings.len(), 1);
        assert!(loaded.warnings[0].message.contains("staging marker"));
    }

    #[test]
    fn require_project_when_missing() {
        let temp = TempDir::new().unwrap();
        let result = Config::require_project(temp.path());
        assert!(matches!(result, Err(ConfigError::NotInitialized(_))));
    }

    #[test]
    fn malformed_project_rejected() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(".webflow-scripts.json"), "{ not json").unwrap();
        let result = Config::load_files(None, Some(temp.path()));
        assert!(matches!(result, Err(ConfigError::ParseError { .. })));
    }

    #[test]
    fn router_settings_from_project() {
        let config = Config {
            project: Some(project()),
            ..Default::default()
        };
        let settings = config.router_settings(None).unwrap();
        assert_eq!(
            settings.production_url,
            "https://octocat.github.io/site-scripts/dist"
        );
        assert_eq!(settings.dev_server_url, "http://localhost:3000/src");
    }

    #[test]
    fn router_settings_override_wins() {
        let config = Config {
            project: Some(project()),
            ..Default::default()
        };
        let settings = config
            .router_settings(Some("https://cdn.example.com/v2"))
            .unwrap();
        assert_eq!(settings.production_url, "https://cdn.example.com/v2");
    }

    #[test]
    fn router_settings_need_a_production_url() {
        let config = Config::default();
        assert!(config.router_settings(None).is_err());
    }
}
