//! router::plan
//!
//! Deterministic load plan generation.
//!
//! # Ordering
//!
//! A plan drains a [`PageConfig`] into steps in this order:
//! 1. Global head scripts (`scripts/…`)
//! 2. Global body scripts (`scripts/…`)
//! 3. Page head scripts (`pages/…`, from `pageScripts.head`)
//! 4. Page body scripts (`pages/…`): `pageScript` first, then `pageScripts.body`
//! 5. Page styles (`styles/…`)
//!
//! Within each group names keep the order the page listed them in. Page
//! scripts rely on globals installed by earlier scripts, so this order is a
//! correctness requirement.
//!
//! # Invariants
//!
//! - Planner does not perform I/O
//! - Every name is validated before any step runs
//!
//! # Example
//!
//! ```
//! use webflow_scripts::router::plan::LoadPlan;
//! use webflow_scripts::router::request::PageConfig;
//!
//! let page = PageConfig::from_json(r#"{ "global": ["a", "b"], "pageScript": "c" }"#).unwrap();
//! let plan = LoadPlan::from_page(&page).unwrap();
//!
//! let ids: Vec<_> = plan.iter().map(|s| s.id.as_str()).collect();
//! assert_eq!(ids, vec!["scripts/a", "scripts/b", "pages/c"]);
//! ```

use super::request::PageConfig;
use crate::core::types::{Category, Placement, ResourceId, ResourceKind, TypeError};

/// One resource to load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadStep {
    pub id: ResourceId,
    pub kind: ResourceKind,
    pub placement: Placement,
}

impl LoadStep {
    /// Human-readable description of the step.
    pub fn description(&self) -> String {
        format!("{} {} ({})", self.kind, self.id, self.placement)
    }
}

/// Ordered load steps for one page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadPlan {
    steps: Vec<LoadStep>,
}

impl LoadPlan {
    /// Build the plan for a page.
    ///
    /// # Errors
    ///
    /// Returns `TypeError` for the first name that is not a valid identifier.
    pub fn from_page(page: &PageConfig) -> Result<Self, TypeError> {
        let mut plan = LoadPlan::default();

        if let Some(global) = &page.global {
            plan.push_all(Category::Scripts, ResourceKind::Script, Placement::Head, global.head())?;
            plan.push_all(Category::Scripts, ResourceKind::Script, Placement::Body, global.body())?;
        }

        if let Some(page_scripts) = &page.page_scripts {
            plan.push_all(Category::Pages, ResourceKind::Script, Placement::Head, page_scripts.head())?;
        }

        if let Some(name) = page.page_script.as_deref().filter(|n| !n.is_empty()) {
            plan.push(Category::Pages, ResourceKind::Script, Placement::Body, name)?;
        }

        if let Some(page_scripts) = &page.page_scripts {
            plan.push_all(Category::Pages, ResourceKind::Script, Placement::Body, page_scripts.body())?;
        }

        if let Some(styles) = &page.page_styles {
            plan.push_all(Category::Styles, ResourceKind::Style, Placement::Head, styles.names())?;
        }

        Ok(plan)
    }

    fn push(
        &mut self,
        category: Category,
        kind: ResourceKind,
        placement: Placement,
        name: &str,
    ) -> Result<(), TypeError> {
        self.steps.push(LoadStep {
            id: ResourceId::in_category(category, name)?,
            kind,
            placement,
        });
        Ok(())
    }

    fn push_all(
        &mut self,
        category: Category,
        kind: ResourceKind,
        placement: Placement,
        names: &[String],
    ) -> Result<(), TypeError> {
        names
            .iter()
            .try_for_each(|name| self.push(category, kind, placement, name))
    }

    pub fn steps(&self) -> &[LoadStep] {
        &self.steps
    }

    pub fn iter(&self) -> impl Iterator<Item = &LoadStep> {
        self.steps.iter()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}
