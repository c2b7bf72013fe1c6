//! router::request
//!
//! The declarative load request a page hands to the router.
//!
//! # Format
//!
//! JSON with the same keys a Webflow page sets as globals:
//!
//! ```json
//! {
//!   "global": { "head": ["analytics"], "body": ["animations", "forms"] },
//!   "pageScript": "home",
//!   "pageScripts": { "head": [], "body": ["carousel"] },
//!   "pageStyles": ["home", "carousel"],
//!   "scriptBaseUrl": "https://cdn.example.com/v2"
//! }
//! ```
//!
//! Every key is optional. Script lists accept either the structured
//! `{ head, body }` form or a flat array, which is placed in body. The flat
//! `globalScripts` array used by older embed snippets is accepted as an
//! alias for `global`. `pageStyles` accepts a single name or a list.

use serde::{Deserialize, Serialize};

/// Script names, optionally split by placement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScriptList {
    /// `[...]`, loaded in body
    Flat(Vec<String>),
    /// `{ "head": [...], "body": [...] }`
    Placed {
        #[serde(default)]
        head: Vec<String>,
        #[serde(default)]
        body: Vec<String>,
    },
}

impl ScriptList {
    /// Names placed in head.
    pub fn head(&self) -> &[String] {
        match self {
            ScriptList::Placed { head, .. } => head,
            ScriptList::Flat(_) => &[],
        }
    }

    /// Names placed in body.
    pub fn body(&self) -> &[String] {
        match self {
            ScriptList::Placed { body, .. } => body,
            ScriptList::Flat(names) => names,
        }
    }

    /// Append a name placed in body.
    pub fn push_body(&mut self, name: impl Into<String>) {
        match self {
            ScriptList::Placed { body, .. } => body.push(name.into()),
            ScriptList::Flat(names) => names.push(name.into()),
        }
    }
}

impl Default for ScriptList {
    fn default() -> Self {
        ScriptList::Flat(Vec::new())
    }
}

/// A single name or a list of names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    /// The names in order.
    pub fn names(&self) -> &[String] {
        match self {
            OneOrMany::One(name) => std::slice::from_ref(name),
            OneOrMany::Many(names) => names,
        }
    }

    /// Append names, keeping order.
    pub fn extend<I: IntoIterator<Item = String>>(&mut self, more: I) {
        let mut names = self.names().to_vec();
        names.extend(more);
        *self = OneOrMany::Many(names);
    }
}

/// The page's load request. Read once, at router construction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PageConfig {
    /// Scripts loaded on every page
    #[serde(alias = "globalScripts", skip_serializing_if = "Option::is_none")]
    pub global: Option<ScriptList>,

    /// The page's script
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_script: Option<String>,

    /// Additional page scripts
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_scripts: Option<ScriptList>,

    /// The page's stylesheets
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_styles: Option<OneOrMany>,

    /// Forces the base URL (e.g. production assets on a staging host)
    #[serde(rename = "scriptBaseUrl", skip_serializing_if = "Option::is_none")]
    pub base_url_override: Option<String>,
}

impl PageConfig {
    /// Parse a page config from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Whether the request asks for nothing at all.
    pub fn is_empty(&self) -> bool {
        let blank = |list: &Option<ScriptList>| {
            list.as_ref()
                .map_or(true, |l| l.head().is_empty() && l.body().is_empty())
        };

        blank(&self.global)
            && blank(&self.page_scripts)
            && self.page_script.as_deref().map_or(true, str::is_empty)
            && self
                .page_styles
                .as_ref()
                .map_or(true, |s| s.names().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structured_global() {
        let config = PageConfig::from_json(
            r#"{ "global": { "head": ["analytics"], "body": ["forms"] } }"#,
        )
        .unwrap();
        let global = config.global.unwrap();
        assert_eq!(global.head(), ["analytics".to_string()]);
        assert_eq!(global.body(), ["forms".to_string()]);
    }

    #[test]
    fn partial_structured_global() {
        let config = PageConfig::from_json(r#"{ "global": { "head": ["a"] } }"#).unwrap();
        let global = config.global.unwrap();
        assert_eq!(global.head(), ["a".to_string()]);
        assert!(global.body().is_empty());
    }

    #[test]
    fn flat_global_goes_to_body() {
        let config = PageConfig::from_json(r#"{ "global": ["alert", "forms"] }"#).unwrap();
        let global = config.global.unwrap();
        assert!(global.head().is_empty());
        assert_eq!(global.body(), ["alert".to_string(), "forms".to_string()]);
    }

    #[test]
    fn legacy_global_scripts_alias() {
        let config = PageConfig::from_json(r#"{ "globalScripts": ["alert"] }"#).unwrap();
        assert_eq!(config.global.unwrap().body(), ["alert".to_string()]);
    }

    #[test]
    fn push_body_keeps_head() {
        let mut list = ScriptList::Placed {
            head: vec!["a".into()],
            body: vec![],
        };
        list.push_body("b");
        assert_eq!(list.head(), ["a".to_string()]);
        assert_eq!(list.body(), ["b".to_string()]);

        let mut flat = ScriptList::default();
        flat.push_body("c");
        assert_eq!(flat.body(), ["c".to_string()]);
    }

    #[test]
    fn one_or_many_extend() {
        let mut styles = OneOrMany::One("home".into());
        styles.extend(vec!["theme".to_string()]);
        assert_eq!(styles.names(), ["home".to_string(), "theme".to_string()]);
    }

    #[test]
    fn styles_one_or_many() {
        let one = PageConfig::from_json(r#"{ "pageStyles": "home" }"#).unwrap();
        assert_eq!(one.page_styles.unwrap().names(), ["home".to_string()]);

        let many = PageConfig::from_json(r#"{ "pageStyles": ["a", "b"] }"#).unwrap();
        assert_eq!(many.page_styles.unwrap().names().len(), 2);
    }

    #[test]
    fn base_url_override_key() {
        let config =
            PageConfig::from_json(r#"{ "scriptBaseUrl": "https://cdn.example.com/v2" }"#).unwrap();
        assert_eq!(
            config.base_url_override.as_deref(),
            Some("https://cdn.example.com/v2")
        );
    }

    #[test]
    fn absent_configuration_is_empty() {
        let config = PageConfig::from_json("{}").unwrap();
        assert!(config.is_empty());
        assert_eq!(config, PageConfig::default());

        let blank = PageConfig::from_json(r#"{ "pageScript": "", "global": [] }"#).unwrap();
        assert!(blank.is_empty());
    }

    #[test]
    fn serializes_camel_case_without_nulls() {
        let config = PageConfig {
            page_script: Some("home".into()),
            ..Default::default()
        };
        assert_eq!(serde_json::to_string(&config).unwrap(), r#"{"pageScript":"home"}"#);
    }
}
