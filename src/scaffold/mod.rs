//! scaffold
//!
//! Project and script scaffolding.
//!
//! # Invariants
//!
//! - A named target directory must be empty (or absent)
//! - Scaffolding never overwrites an existing file. Every target path is
//!   checked before the first write.
//! - The project config is written last, so an interrupted `init` leaves
//!   the directory uninitialized

pub mod templates;

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::debug;

use crate::core::config::{Config, ConfigError, ProjectConfig};
use crate::core::paths::ProjectPaths;
use crate::core::types::{Category, ResourceId, TypeError};
use crate::router::resolve::DEFAULT_STAGING_MARKER;
use templates::EmbedSettings;

/// Errors from scaffolding operations.
#[derive(Debug, Error)]
pub enum ScaffoldError {
    #[error("directory '{0}' already exists and is not empty")]
    DirectoryNotEmpty(PathBuf),

    #[error("refusing to overwrite existing file '{0}'")]
    WouldOverwrite(PathBuf),

    #[error("script '{name}' already exists at '{path}'")]
    ScriptExists { name: String, path: PathBuf },

    #[error("invalid answer for {field}: {reason}")]
    InvalidAnswer { field: &'static str, reason: String },

    #[error("invalid script name: {0}")]
    InvalidName(#[from] TypeError),

    #[error("I/O error at '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ScaffoldError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        ScaffoldError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Answers collected by `init`, from prompts or flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectAnswers {
    pub github_username: String,
    pub repo_name: String,
    pub webflow_domain: String,
    pub custom_domain: String,
    pub use_github_pages: bool,
}

impl ProjectAnswers {
    /// Validate every answer.
    pub fn validate(&self) -> Result<(), ScaffoldError> {
        validate_github_username(&self.github_username)?;
        validate_repo_name(&self.repo_name)?;
        validate_webflow_domain(&self.webflow_domain)?;
        Ok(())
    }

    /// The project config these answers produce.
    pub fn into_config(self, setup_date: DateTime<Utc>) -> ProjectConfig {
        ProjectConfig {
            github_username: self.github_username.trim().to_string(),
            repo_name: self.repo_name.trim().to_string(),
            webflow_domain: self.webflow_domain.trim().to_string(),
            custom_domain: self.custom_domain.trim().to_string(),
            use_github_pages: self.use_github_pages,
            setup_date,
        }
    }
}

pub fn validate_github_username(value: &str) -> Result<(), ScaffoldError> {
    validate_name("GitHub username", value)
}

pub fn validate_repo_name(value: &str) -> Result<(), ScaffoldError> {
    validate_name("repository name", value)
}

/// The staging domain must be a Webflow staging host.
pub fn validate_webflow_domain(value: &str) -> Result<(), ScaffoldError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ScaffoldError::InvalidAnswer {
            field: "Webflow domain",
            reason: "Please enter your Webflow domain".into(),
        });
    }
    if !value.contains(DEFAULT_STAGING_MARKER) {
        return Err(ScaffoldError::InvalidAnswer {
            field: "Webflow domain",
            reason: format!("Domain should end with {}", DEFAULT_STAGING_MARKER),
        });
    }
    Ok(())
}

fn validate_name(field: &'static str, value: &str) -> Result<(), ScaffoldError> {
    let value = value.trim();
    let reason = if value.is_empty() {
        format!("Please enter your {}", field)
    } else if value.contains('/') || value.chars().any(char::is_whitespace) {
        format!("{} cannot contain '/' or whitespace", field)
    } else {
        return Ok(());
    };
    Err(ScaffoldError::InvalidAnswer { field, reason })
}

/// Refuse a target directory that exists and has entries.
pub fn ensure_empty_target(dir: &Path) -> Result<(), ScaffoldError> {
    if !dir.exists() {
        return Ok(());
    }
    let mut entries = fs::read_dir(dir).map_err(|e| ScaffoldError::io(dir, e))?;
    if entries.next().is_some() {
        return Err(ScaffoldError::DirectoryNotEmpty(dir.to_path_buf()));
    }
    Ok(())
}

/// Files written by [`create_project`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedProject {
    pub config: ProjectConfig,
    pub files: Vec<PathBuf>,
}

/// Scaffold a project into `dir`.
///
/// `dev_server_url` and `staging_marker` come from the user's global config
/// and shape the generated embed code.
pub fn create_project(
    dir: &Path,
    answers: ProjectAnswers,
    setup_date: DateTime<Utc>,
    global: &Config,
) -> Result<CreatedProject, ScaffoldError> {
    answers.validate()?;
    let config = answers.into_config(setup_date);
    config.validate()?;

    let paths = ProjectPaths::new(dir);
    let alert_path = paths.script_path("alert");
    let router_path = paths.router_path();
    let embed_path = paths.embed_code_path();
    let readme_path = paths.readme_path();
    let config_path = paths.config_path();
    let workflow_path = config.use_github_pages.then(|| paths.deploy_workflow_path());

    let targets = [&alert_path, &router_path, &embed_path, &readme_path, &config_path];
    for path in targets.into_iter().chain(workflow_path.as_ref()) {
        if path.exists() {
            return Err(ScaffoldError::WouldOverwrite(path.clone()));
        }
    }

    let production_url = config.production_script_url();
    let settings = EmbedSettings {
        production_url: &production_url,
        dev_server_url: global.dev_server_url(),
        staging_marker: global.staging_marker(),
    };
    let embed = templates::embed_code(&settings);

    for sub in [paths.scripts_dir(), paths.pages_dir(), paths.styles_dir()] {
        fs::create_dir_all(&sub).map_err(|e| ScaffoldError::io(&sub, e))?;
    }

    write_new(&alert_path, templates::ALERT_SCRIPT)?;
    write_new(&router_path, &templates::router_script(&settings))?;
    write_new(&embed_path, &embed)?;
    write_new(&readme_path, &templates::readme(&config, &embed))?;
    if let Some(path) = &workflow_path {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ScaffoldError::io(parent, e))?;
        }
        write_new(path, templates::DEPLOY_WORKFLOW)?;
    }
    let config_path = Config::write_project(dir, &config)?;
    debug!(dir = %dir.display(), pages = config.use_github_pages, "project scaffolded");

    let mut files = vec![config_path, alert_path, router_path, embed_path, readme_path];
    files.extend(workflow_path);
    Ok(CreatedProject { config, files })
}

/// Create `src/scripts/<name>.js` from the script template.
pub fn new_script(root: &Path, name: &str) -> Result<PathBuf, ScaffoldError> {
    let name = name.trim();
    let name = name.strip_suffix(".js").unwrap_or(name);
    ResourceId::in_category(Category::Scripts, name)?;

    let path = ProjectPaths::new(root).script_path(name);
    if path.exists() {
        return Err(ScaffoldError::ScriptExists {
            name: name.to_string(),
            path,
        });
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| ScaffoldError::io(parent, e))?;
    }
    write_new(&path, &templates::script_source(name))?;
    debug!(path = %path.display(), "script created");
    Ok(path)
}

/// Regenerate `webflow-embed-code.html` for an initialized project.
///
/// Returns the embed code and the path it was written to.
pub fn write_embed_code(root: &Path, config: &Config) -> Result<(String, PathBuf), ScaffoldError> {
    let project = Config::require_project(root)?;
    let production_url = project.production_script_url();
    let embed = templates::embed_code(&EmbedSettings {
        production_url: &production_url,
        dev_server_url: config.dev_server_url(),
        staging_marker: config.staging_marker(),
    });

    let path = ProjectPaths::new(root).embed_code_path();
    fs::write(&path, &embed).map_err(|e| ScaffoldError::io(&path, e))?;
    Ok((embed, path))
}

fn write_new(path: &Path, contents: &str) -> Result<(), ScaffoldError> {
    use std::io::Write;

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|e| match e.kind() {
            std::io::ErrorKind::AlreadyExists => ScaffoldError::WouldOverwrite(path.to_path_buf()),
            _ => ScaffoldError::io(path, e),
        })?;
    file.write_all(contents.as_bytes())
        .map_err(|e| ScaffoldError::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn answers() -> ProjectAnswers {
        ProjectAnswers {
            github_username: "octocat".into(),
            repo_name: "site-scripts".into(),
            webflow_domain: "my-site.webflow.io".into(),
            custom_domain: String::new(),
            use_github_pages: true,
        }
    }

    fn date() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn answers_validation() {
        assert!(answers().validate().is_ok());

        let bad = ProjectAnswers {
            webflow_domain: "example.com".into(),
            ..answers()
        };
        assert!(matches!(
            bad.validate(),
            Err(ScaffoldError::InvalidAnswer { field: "Webflow domain", .. })
        ));

        let bad = ProjectAnswers {
            github_username: " ".into(),
            ..answers()
        };
        assert!(bad.validate().is_err());

        let bad = ProjectAnswers {
            repo_name: "a/b".into(),
            ..answers()
        };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn ensure_empty_target_cases() {
        let temp = TempDir::new().unwrap();
        assert!(ensure_empty_target(&temp.path().join("missing")).is_ok());
        assert!(ensure_empty_target(temp.path()).is_ok());

        fs::write(temp.path().join("file"), "x").unwrap();
        assert!(matches!(
            ensure_empty_target(temp.path()),
            Err(ScaffoldError::DirectoryNotEmpty(_))
        ));
    }

    #[test]
    fn create_project_writes_all_files() {
        let temp = TempDir::new().unwrap();
        let created = create_project(temp.path(), answers(), date(), &Config::default()).unwrap();

        let paths = ProjectPaths::new(temp.path());
        assert!(paths.is_initialized());
        assert!(paths.script_path("alert").is_file());
        assert!(paths.pages_dir().is_dir());
        assert!(paths.styles_dir().is_dir());
        assert!(paths.deploy_workflow_path().is_file());
        assert_eq!(created.files.len(), 6);

        let embed = fs::read_to_string(paths.embed_code_path()).unwrap();
        assert!(embed.contains("https://octocat.github.io/site-scripts/dist"));
        assert!(embed.contains("baseUrl + '/router.js'"));

        let router = fs::read_to_string(paths.router_path()).unwrap();
        assert!(router.contains("'https://octocat.github.io/site-scripts/dist'"));
        assert!(router.contains("'http://localhost:3000/src'"));

        let config = Config::require_project(temp.path()).unwrap();
        assert_eq!(config, created.config);
        assert_eq!(config.setup_date, date());
    }

    #[test]
    fn create_project_skips_workflow_without_pages() {
        let temp = TempDir::new().unwrap();
        let answers = ProjectAnswers {
            use_github_pages: false,
            ..answers()
        };
        let created = create_project(temp.path(), answers, date(), &Config::default()).unwrap();

        let paths = ProjectPaths::new(temp.path());
        assert!(paths.router_path().is_file());
        assert!(!paths.deploy_workflow_path().exists());
        assert!(!temp.path().join(".github").exists());
        assert_eq!(created.files.len(), 5);
    }

    #[test]
    fn create_project_keeps_existing_router() {
        let temp = TempDir::new().unwrap();
        let paths = ProjectPaths::new(temp.path());
        fs::create_dir_all(paths.source_dir()).unwrap();
        fs::write(paths.router_path(), "// custom").unwrap();

        let err = create_project(temp.path(), answers(), date(), &Config::default()).unwrap_err();
        assert!(matches!(err, ScaffoldError::WouldOverwrite(path) if path == paths.router_path()));
        assert_eq!(fs::read_to_string(paths.router_path()).unwrap(), "// custom");
    }

    #[test]
    fn create_project_never_overwrites() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("README.md"), "mine").unwrap();

        let err = create_project(temp.path(), answers(), date(), &Config::default()).unwrap_err();
        assert!(matches!(err, ScaffoldError::WouldOverwrite(_)));
        assert_eq!(fs::read_to_string(temp.path().join("README.md")).unwrap(), "mine");
        assert!(!ProjectPaths::new(temp.path()).is_initialized());
    }

    #[test]
    fn new_script_creates_then_refuses() {
        let temp = TempDir::new().unwrap();

        let path = new_script(temp.path(), "forms").unwrap();
        assert_eq!(path, ProjectPaths::new(temp.path()).script_path("forms"));
        assert!(fs::read_to_string(&path).unwrap().contains("forms script loaded"));

        assert!(matches!(
            new_script(temp.path(), "forms.js"),
            Err(ScaffoldError::ScriptExists { .. })
        ));
    }

    #[test]
    fn new_script_rejects_unsafe_names() {
        let temp = TempDir::new().unwrap();
        assert!(matches!(
            new_script(temp.path(), "../escape"),
            Err(ScaffoldError::InvalidName(_))
        ));
        assert!(matches!(new_script(temp.path(), ""), Err(ScaffoldError::InvalidName(_))));
    }

    #[test]
    fn embed_code_requires_project() {
        let temp = TempDir::new().unwrap();
        let err = write_embed_code(temp.path(), &Config::default()).unwrap_err();
        assert!(matches!(err, ScaffoldError::Config(ConfigError::NotInitialized(_))));

        create_project(temp.path(), answers(), date(), &Config::default()).unwrap();
        let (code, path) = write_embed_code(temp.path(), &Config::default()).unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), code);
    }
}
