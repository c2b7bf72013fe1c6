//! document::memory
//!
//! In-memory document for dry runs and deterministic testing.
//!
//! # Design
//!
//! The memory document records every inserted node in order, split into
//! head and body like a real page, and settles loads according to
//! per-resource behaviors. Unconfigured resources load successfully.
//!
//! # Example
//!
//! ```
//! use webflow_scripts::core::types::{Placement, ResourceId, ResourceKind};
//! use webflow_scripts::document::memory::{MemoryDocument, NodeBehavior};
//! use webflow_scripts::document::{Document, ResourceNode};
//!
//! # tokio_test::block_on(async {
//! let doc = MemoryDocument::new()
//!     .with_behavior("scripts/broken", NodeBehavior::Fail("404".into()));
//!
//! let node = ResourceNode {
//!     id: ResourceId::new("scripts/alert").unwrap(),
//!     kind: ResourceKind::Script,
//!     url: "https://cdn.example.com/scripts/alert.js".into(),
//!     target: Placement::Body,
//! };
//! doc.append(node).await.unwrap();
//!
//! assert_eq!(doc.inserted_ids(), vec!["scripts/alert"]);
//! # });
//! ```

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use super::traits::{Document, LoadFailure, ResourceNode, ScriptsLoaded};
use crate::core::types::{Placement, ResourceId, ResourceKind};

/// Memory document, cheap to clone.
///
/// Thread-safe via internal `Arc<Mutex<...>>` wrapping.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocument {
    inner: Arc<Mutex<MemoryDocumentInner>>,
}

#[derive(Debug, Default)]
struct MemoryDocumentInner {
    /// Every inserted node, in insertion order.
    inserted: Vec<ResourceNode>,
    /// Markers present before the router ran (server-rendered nodes).
    existing: HashSet<(ResourceKind, String)>,
    /// How specific resources settle, by identifier.
    behaviors: HashMap<String, NodeBehavior>,
    /// Dispatched completion events.
    events: Vec<ScriptsLoaded>,
}

/// How a node settles once inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeBehavior {
    /// Fire the error event with the given reason.
    Fail(String),
    /// Never settle.
    Hang,
    /// Fire the load event after a delay.
    Delay(Duration),
}

impl MemoryDocument {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure how the resource `id` settles.
    pub fn with_behavior(self, id: &str, behavior: NodeBehavior) -> Self {
        {
            let mut inner = self.lock();
            inner.behaviors.insert(id.to_string(), behavior);
        }
        self
    }

    /// Mark `id` as already present in the document.
    pub fn with_existing(self, kind: ResourceKind, id: &str) -> Self {
        {
            let mut inner = self.lock();
            inner.existing.insert((kind, id.to_string()));
        }
        self
    }

    /// All inserted nodes, in insertion order.
    pub fn inserted(&self) -> Vec<ResourceNode> {
        let inner = self.lock();
        inner.inserted.clone()
    }

    /// Identifiers of all inserted nodes, in insertion order.
    pub fn inserted_ids(&self) -> Vec<String> {
        let inner = self.lock();
        inner
            .inserted
            .iter()
            .map(|n| n.id.as_str().to_string())
            .collect()
    }

    /// URLs requested, in insertion order.
    pub fn requested_urls(&self) -> Vec<String> {
        let inner = self.lock();
        inner.inserted.iter().map(|n| n.url.clone()).collect()
    }

    /// Identifiers of nodes attached under `target`.
    pub fn ids_in(&self, target: Placement) -> Vec<String> {
        let inner = self.lock();
        inner
            .inserted
            .iter()
            .filter(|n| n.target == target)
            .map(|n| n.id.as_str().to_string())
            .collect()
    }

    /// Number of inserted nodes of `kind` carrying marker `id`.
    pub fn marker_count(&self, kind: ResourceKind, id: &str) -> usize {
        let inner = self.lock();
        inner
            .inserted
            .iter()
            .filter(|n| n.kind == kind && n.id.as_str() == id)
            .count()
    }

    /// Completion events dispatched so far.
    pub fn events(&self) -> Vec<ScriptsLoaded> {
        let inner = self.lock();
        inner.events.clone()
    }

    fn lock(&self) -> MutexGuard<'_, MemoryDocumentInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl Document for MemoryDocument {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn has_marker(&self, kind: ResourceKind, id: &ResourceId) -> bool {
        let inner = self.lock();
        inner.existing.contains(&(kind, id.as_str().to_string()))
            || inner
                .inserted
                .iter()
                .any(|n| n.kind == kind && &n.id == id)
    }

    async fn append(&self, node: ResourceNode) -> Result<(), LoadFailure> {
        let behavior = {
            let mut inner = self.lock();
            let behavior = inner.behaviors.get(node.id.as_str()).cloned();
            inner.inserted.push(node);
            behavior
        };

        match behavior {
            None => Ok(()),
            Some(NodeBehavior::Fail(reason)) => Err(LoadFailure(reason)),
            Some(NodeBehavior::Hang) => std::future::pending::<Result<(), LoadFailure>>().await,
            Some(NodeBehavior::Delay(delay)) => {
                tokio::time::sleep(delay).await;
                Ok(())
            }
        }
    }

    fn dispatch(&self, event: &ScriptsLoaded) {
        let mut inner = self.lock();
        inner.events.push(event.clone());
    }
}
