//! document::traits
//!
//! Document trait definition for the host a router injects resources into.
//!
//! # Design
//!
//! The `Document` trait is async because a resource settles only when the
//! host reports its load or error event. Marker lookup and event dispatch
//! are synchronous: they touch the document, not the network.
//!
//! # Example
//!
//! ```
//! use webflow_scripts::document::{Document, LoadFailure, ResourceNode};
//!
//! async fn inject(doc: &dyn Document, node: ResourceNode) -> Result<(), LoadFailure> {
//!     if doc.has_marker(node.kind, &node.id) {
//!         return Ok(());
//!     }
//!     doc.append(node).await
//! }
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::types::{Environment, Placement, ResourceId, ResourceKind};
use crate::router::resolve::ResolvedBase;

/// Name of the page-wide completion event.
pub const SCRIPTS_LOADED_EVENT: &str = "scriptsLoaded";

/// A load failure reported by the host (network error, non-success status).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct LoadFailure(pub String);

/// A `<script>` or `<link>` node about to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceNode {
    /// Identifier written to the node's marker attribute
    pub id: ResourceId,
    /// Script or stylesheet
    pub kind: ResourceKind,
    /// Absolute URL the node fetches
    pub url: String,
    /// Where the node is attached (styles always go to head)
    pub target: Placement,
}

impl ResourceNode {
    /// The marker attribute name for this node.
    pub fn marker_attribute(&self) -> &'static str {
        self.kind.marker_attribute()
    }
}

/// Payload of the completion event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScriptsLoaded {
    pub base_url: String,
    pub environment: Environment,
}

impl From<&ResolvedBase> for ScriptsLoaded {
    fn from(base: &ResolvedBase) -> Self {
        Self {
            base_url: base.base_url.clone(),
            environment: base.environment,
        }
    }
}

/// The host document resources are injected into.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`. The router serializes its own
/// check-then-insert; implementations only need interior mutability for
/// their node lists.
#[async_trait]
pub trait Document: Send + Sync {
    /// Get the document implementation name (e.g., "memory", "http").
    fn name(&self) -> &'static str;

    /// Whether a node of `kind` already carries `id` in its marker attribute.
    fn has_marker(&self, kind: ResourceKind, id: &ResourceId) -> bool;

    /// Insert a node and wait for it to settle.
    ///
    /// The node is part of the document (and carries its marker) as soon as
    /// this is polled, whether the load later succeeds or not.
    ///
    /// # Errors
    ///
    /// Returns `LoadFailure` when the host reports the resource's error event.
    async fn append(&self, node: ResourceNode) -> Result<(), LoadFailure>;

    /// Broadcast the completion event to page listeners.
    fn dispatch(&self, event: &ScriptsLoaded);
}
