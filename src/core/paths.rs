//! core::paths
//!
//! Centralized path routing for project files.
//!
//! # Project Layout
//!
//! A scaffolded project looks like:
//! - `.webflow-scripts.json` - Project configuration
//! - `webflow-embed-code.html` - Snippet to paste into Webflow site settings
//! - `README.md` - Project-specific instructions
//! - `src/router.js` - Browser router the embed code loads
//! - `src/scripts/` - Global scripts
//! - `src/pages/` - Page scripts
//! - `src/styles/` - Page stylesheets
//! - `.github/workflows/deploy.yml` - Pages deploy workflow (optional)
//!
//! # Example
//!
//! ```
//! use webflow_scripts::core::paths::ProjectPaths;
//! use std::path::PathBuf;
//!
//! let paths = ProjectPaths::new("/work/site");
//! assert_eq!(
//!     paths.config_path(),
//!     PathBuf::from("/work/site/.webflow-scripts.json")
//! );
//! assert_eq!(
//!     paths.script_path("forms"),
//!     PathBuf::from("/work/site/src/scripts/forms.js")
//! );
//! ```

use std::path::{Path, PathBuf};

/// Project configuration file name.
pub const PROJECT_CONFIG_FILE: &str = ".webflow-scripts.json";

/// Generated embed code file name.
pub const EMBED_CODE_FILE: &str = "webflow-embed-code.html";

/// Path routing for a single project directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectPaths {
    root: PathBuf,
}

impl ProjectPaths {
    /// Create path routing rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The project root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self) -> PathBuf {
        self.root.join(PROJECT_CONFIG_FILE)
    }

    pub fn embed_code_path(&self) -> PathBuf {
        self.root.join(EMBED_CODE_FILE)
    }

    pub fn readme_path(&self) -> PathBuf {
        self.root.join("README.md")
    }

    /// GitHub Pages deploy workflow, written when Pages is enabled.
    pub fn deploy_workflow_path(&self) -> PathBuf {
        self.root.join(".github").join("workflows").join("deploy.yml")
    }

    pub fn source_dir(&self) -> PathBuf {
        self.root.join("src")
    }

    pub fn router_path(&self) -> PathBuf {
        self.source_dir().join("router.js")
    }

    pub fn scripts_dir(&self) -> PathBuf {
        self.source_dir().join("scripts")
    }

    pub fn pages_dir(&self) -> PathBuf {
        self.source_dir().join("pages")
    }

    pub fn styles_dir(&self) -> PathBuf {
        self.source_dir().join("styles")
    }

    /// Path of a global script source file.
    pub fn script_path(&self, name: &str) -> PathBuf {
        self.scripts_dir().join(format!("{}.js", name))
    }

    /// Whether the project has been initialized.
    pub fn is_initialized(&self) -> bool {
        self.config_path().is_file()
    }
}
