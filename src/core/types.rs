//! core::types
//!
//! Strong types for core domain concepts.
//!
//! # Types
//!
//! - [`ResourceId`] - Validated resource identifier (`scripts/alert`)
//! - [`Category`] - Directory prefix a resource name lives under
//! - [`ResourceKind`] - Script or stylesheet
//! - [`Placement`] - Where in the document a script node is attached
//! - [`Environment`] - Development (staging) or production
//!
//! # Validation
//!
//! These types enforce validity at construction time. A resource identifier
//! is both a URL path fragment and a deduplication key, so anything that
//! would escape the base URL or break the marker lookup is rejected.
//!
//! # Examples
//!
//! ```
//! use webflow_scripts::core::types::{Category, ResourceId};
//!
//! let id = ResourceId::in_category(Category::Scripts, "alert").unwrap();
//! assert_eq!(id.as_str(), "scripts/alert");
//!
//! assert!(ResourceId::new("../secrets").is_err());
//! assert!(ResourceId::in_category(Category::Pages, "").is_err());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors from type validation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid resource id '{id}': {reason}")]
    InvalidResourceId { id: String, reason: String },
}

impl TypeError {
    fn resource(id: &str, reason: &str) -> Self {
        TypeError::InvalidResourceId {
            id: id.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// A validated resource identifier.
///
/// Identifiers are relative paths without an extension, e.g. `scripts/alert`,
/// `pages/home` or `styles/theme`. Rules:
/// - Cannot be empty
/// - Cannot start or end with `/`
/// - Cannot contain empty, `.` or `..` segments
/// - Cannot contain whitespace, control characters, `?`, `#`, `%` or `\`
///
/// `%` is refused outright: URL parsers decode `%2e` segments to dots, so an
/// escaped `..` would otherwise leave the base path.
///
/// # Example
///
/// ```
/// use webflow_scripts::core::types::ResourceId;
///
/// let id = ResourceId::new("pages/contact/form").unwrap();
/// assert_eq!(id.as_str(), "pages/contact/form");
///
/// assert!(ResourceId::new("").is_err());
/// assert!(ResourceId::new("/scripts/alert").is_err());
/// assert!(ResourceId::new("scripts//alert").is_err());
/// assert!(ResourceId::new("scripts/alert?v=2").is_err());
/// assert!(ResourceId::new("pages/%2e%2e/admin").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ResourceId(String);

impl ResourceId {
    /// Create a new validated resource identifier.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidResourceId` if the identifier would not form
    /// a safe URL path under the base URL.
    pub fn new(id: impl Into<String>) -> Result<Self, TypeError> {
        let id = id.into();
        Self::validate(&id)?;
        Ok(Self(id))
    }

    /// Build an identifier from a category prefix and a user-supplied name.
    pub fn in_category(category: Category, name: &str) -> Result<Self, TypeError> {
        if name.trim().is_empty() {
            return Err(TypeError::resource(name, "name cannot be empty"));
        }
        Self::new(format!("{}/{}", category.prefix(), name))
    }

    fn validate(id: &str) -> Result<(), TypeError> {
        if id.is_empty() {
            return Err(TypeError::resource(id, "identifier cannot be empty"));
        }

        if id.starts_with('/') || id.ends_with('/') {
            return Err(TypeError::resource(
                id,
                "identifier cannot start or end with '/'",
            ));
        }

        if let Some(c) = id
            .chars()
            .find(|c| c.is_whitespace() || c.is_control() || matches!(c, '?' | '#' | '%' | '\\'))
        {
            return Err(TypeError::resource(
                id,
                &format!("identifier cannot contain {:?}", c),
            ));
        }

        for segment in id.split('/') {
            match segment {
                "" => return Err(TypeError::resource(id, "identifier has an empty segment")),
                "." | ".." => {
                    return Err(TypeError::resource(
                        id,
                        "identifier cannot contain '.' or '..' segments",
                    ))
                }
                _ => {}
            }
        }

        Ok(())
    }

    /// Get the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for ResourceId {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl FromStr for ResourceId {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl From<ResourceId> for String {
    fn from(id: ResourceId) -> Self {
        id.0
    }
}

impl AsRef<str> for ResourceId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// The directory a resource name is resolved under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Global scripts, loaded on every page.
    Scripts,
    /// Page-specific scripts.
    Pages,
    /// Page stylesheets.
    Styles,
}

impl Category {
    /// Path prefix for identifiers in this category.
    pub fn prefix(&self) -> &'static str {
        match self {
            Category::Scripts => "scripts",
            Category::Pages => "pages",
            Category::Styles => "styles",
        }
    }
}

/// The kind of node injected for a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    /// A `<script>` element.
    Script,
    /// A `<link rel="stylesheet">` element.
    Style,
}

impl ResourceKind {
    /// File extension appended to the identifier when building the URL.
    pub fn extension(&self) -> &'static str {
        match self {
            ResourceKind::Script => "js",
            ResourceKind::Style => "css",
        }
    }

    /// Marker attribute carrying the resource identifier on the injected node.
    pub fn marker_attribute(&self) -> &'static str {
        match self {
            ResourceKind::Script => "data-script-id",
            ResourceKind::Style => "data-style-id",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKind::Script => write!(f, "script"),
            ResourceKind::Style => write!(f, "style"),
        }
    }
}

/// Where an injected node is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Placement {
    /// Appended to `<head>`.
    Head,
    /// Appended to `<body>`.
    #[default]
    Body,
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Placement::Head => write!(f, "head"),
            Placement::Body => write!(f, "body"),
        }
    }
}

/// Environment a page is served from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Webflow staging domain; assets come from the local dev server.
    Development,
    /// Any other host; assets come from static hosting.
    Production,
}

impl Environment {
    /// Get the environment name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod resource_id {
        use super::*;

        #[test]
        fn valid_identifiers() {
            for id in ["scripts/alert", "pages/home", "styles/theme", "pages/blog/post-1"] {
                assert!(ResourceId::new(id).is_ok(), "should accept {}", id);
            }
        }

        #[test]
        fn category_prefix_is_prepended() {
            let id = ResourceId::in_category(Category::Styles, "theme").unwrap();
            assert_eq!(id.as_str(), "styles/theme");

            let id = ResourceId::in_category(Category::Pages, "home").unwrap();
            assert_eq!(id.to_string(), "pages/home");
        }

        #[test]
        fn empty_name_rejected() {
            assert!(ResourceId::in_category(Category::Scripts, "").is_err());
            assert!(ResourceId::in_category(Category::Scripts, "   ").is_err());
        }

        #[test]
        fn traversal_rejected() {
            assert!(ResourceId::new("..").is_err());
            assert!(ResourceId::new("scripts/../admin").is_err());
            assert!(ResourceId::new("scripts/./alert").is_err());
            assert!(ResourceId::in_category(Category::Scripts, "../x").is_err());
        }

        #[test]
        fn escaped_traversal_rejected() {
            assert!(ResourceId::new("pages/%2e%2e/%2e%2e/admin").is_err());
            assert!(ResourceId::new("pages/%2E%2e/admin").is_err());
            assert!(ResourceId::new("scripts/%2e").is_err());
            assert!(ResourceId::in_category(Category::Pages, "%2e%2e/%2e%2e/admin").is_err());

            let err = ResourceId::new("scripts/a%20b").unwrap_err();
            assert!(err.to_string().contains("'%'"));
        }

        #[test]
        fn url_breaking_characters_rejected() {
            assert!(ResourceId::new("scripts/a b").is_err());
            assert!(ResourceId::new("scripts/a#b").is_err());
            assert!(ResourceId::new("scripts/a?b").is_err());
            assert!(ResourceId::new("scripts\\alert").is_err());
            assert!(ResourceId::new("scripts/\nalert").is_err());
        }

        #[test]
        fn slash_edges_rejected() {
            assert!(ResourceId::new("/scripts/alert").is_err());
            assert!(ResourceId::new("scripts/alert/").is_err());
        }

        #[test]
        fn serde_validates() {
            let id: ResourceId = serde_json::from_str("\"scripts/alert\"").unwrap();
            assert_eq!(id.as_str(), "scripts/alert");

            let bad: Result<ResourceId, _> = serde_json::from_str("\"../etc\"");
            assert!(bad.is_err());
        }
    }

    #[test]
    fn kind_extensions_and_markers() {
        assert_eq!(ResourceKind::Script.extension(), "js");
        assert_eq!(ResourceKind::Style.extension(), "css");
        assert_eq!(ResourceKind::Script.marker_attribute(), "data-script-id");
        assert_eq!(ResourceKind::Style.marker_attribute(), "data-style-id");
    }

    #[test]
    fn placement_defaults_to_body() {
        assert_eq!(Placement::default(), Placement::Body);
    }

    #[test]
    fn environment_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&Environment::Development).unwrap(),
            "\"development\""
        );
        assert_eq!(Environment::Production.to_string(), "production");
    }
}
