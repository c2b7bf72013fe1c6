//! router::loader
//!
//! The resource loader: one idempotent `load` per resource.
//!
//! # Invariants
//!
//! - No identifier is ever injected twice into the same document. The
//!   check against loader state and document markers, and the claim that
//!   follows, happen under one mutex. The mutex is never held across an
//!   `.await`.
//! - A resource whose load failed stays marked. Loading it again reports
//!   the original failure instead of resolving.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tracing::{debug, error, warn};

use super::error::RouterError;
use super::resolve::ResolvedBase;
use crate::core::types::{Placement, ResourceId, ResourceKind};
use crate::document::{Document, ResourceNode};

/// How a successful `load` was satisfied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A new node was inserted and fired its load event.
    Loaded,
    /// The resource was already in the document; nothing was inserted.
    AlreadyLoaded,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum EntryState {
    Pending,
    Loaded,
    Failed { url: String, reason: String },
}

/// Loads scripts and styles into a document relative to a resolved base URL.
pub struct Loader {
    base: ResolvedBase,
    document: Arc<dyn Document>,
    timeout: Option<Duration>,
    state: Mutex<HashMap<(ResourceKind, ResourceId), EntryState>>,
}

impl Loader {
    /// Create a loader for `document`.
    pub fn new(base: ResolvedBase, document: Arc<dyn Document>, timeout: Option<Duration>) -> Self {
        Self {
            base,
            document,
            timeout,
            state: Mutex::new(HashMap::new()),
        }
    }

    /// The base URL resources are fetched from.
    pub fn base(&self) -> &ResolvedBase {
        &self.base
    }

    /// URL for a resource: `{base_url}/{id}.{ext}`.
    pub fn resource_url(&self, id: &ResourceId, kind: ResourceKind) -> String {
        format!(
            "{}/{}.{}",
            self.base.base_url.trim_end_matches('/'),
            id,
            kind.extension()
        )
    }

    /// Load a resource, inserting it at most once.
    ///
    /// Styles always attach to head; `placement` only applies to scripts.
    ///
    /// # Errors
    ///
    /// - `ResourceLoad` if the document reports the node's error event, or
    ///   if this resource already failed earlier
    /// - `Timeout` if a timeout is configured and the node does not settle
    pub async fn load(
        &self,
        id: &ResourceId,
        kind: ResourceKind,
        placement: Placement,
    ) -> Result<LoadOutcome, RouterError> {
        if let Some(outcome) = self.claim(id, kind)? {
            debug!(%id, %kind, "already loaded");
            return Ok(outcome);
        }

        let url = self.resource_url(id, kind);
        let target = match kind {
            ResourceKind::Style => Placement::Head,
            ResourceKind::Script => placement,
        };
        let node = ResourceNode {
            id: id.clone(),
            kind,
            url: url.clone(),
            target,
        };

        debug!(%id, %url, %target, marker = node.marker_attribute(), "injecting");

        let settled = match self.timeout {
            Some(after) => match tokio::time::timeout(after, self.document.append(node)).await {
                Ok(settled) => settled,
                Err(_) => {
                    warn!(%id, %url, ?after, "load timed out");
                    self.settle(
                        id,
                        kind,
                        EntryState::Failed {
                            url,
                            reason: format!("timed out after {:?}", after),
                        },
                    );
                    return Err(RouterError::Timeout {
                        id: id.clone(),
                        after,
                    });
                }
            },
            None => self.document.append(node).await,
        };

        match settled {
            Ok(()) => {
                debug!(%id, %kind, "loaded");
                self.settle(id, kind, EntryState::Loaded);
                Ok(LoadOutcome::Loaded)
            }
            Err(failure) => {
                error!(%id, %url, reason = %failure, "failed to load");
                self.settle(
                    id,
                    kind,
                    EntryState::Failed {
                        url: url.clone(),
                        reason: failure.0.clone(),
                    },
                );
                Err(RouterError::ResourceLoad {
                    id: id.clone(),
                    url,
                    reason: failure.0,
                })
            }
        }
    }

    /// Whether a resource has been claimed by this loader or is marked in the document.
    pub fn is_marked(&self, id: &ResourceId, kind: ResourceKind) -> bool {
        self.lock_state().contains_key(&(kind, id.clone())) || self.document.has_marker(kind, id)
    }

    /// Check-then-claim under the state lock.
    ///
    /// Returns `Some(outcome)` when nothing needs inserting, `None` when the
    /// caller now owns the insertion.
    fn claim(&self, id: &ResourceId, kind: ResourceKind) -> Result<Option<LoadOutcome>, RouterError> {
        let mut state = self.lock_state();
        let key = (kind, id.clone());

        match state.get(&key) {
            Some(EntryState::Failed { url, reason }) => {
                return Err(RouterError::ResourceLoad {
                    id: id.clone(),
                    url: url.clone(),
                    reason: reason.clone(),
                })
            }
            Some(EntryState::Pending | EntryState::Loaded) => {
                return Ok(Some(LoadOutcome::AlreadyLoaded))
            }
            None => {}
        }

        if self.document.has_marker(kind, id) {
            state.insert(key, EntryState::Loaded);
            return Ok(Some(LoadOutcome::AlreadyLoaded));
        }

        state.insert(key, EntryState::Pending);
        Ok(None)
    }

    fn settle(&self, id: &ResourceId, kind: ResourceKind, entry: EntryState) {
        self.lock_state().insert((kind, id.clone()), entry);
    }

    fn lock_state(&self) -> MutexGuard<'_, HashMap<(ResourceKind, ResourceId), EntryState>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for Loader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Loader")
            .field("base", &self.base)
            .field("document", &self.document.name())
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Environment;
    use crate::document::memory::{MemoryDocument, NodeBehavior};

    fn base(url: &str) -> ResolvedBase {
        ResolvedBase {
            base_url: url.to_string(),
            environment: Environment::Production,
        }
    }

    fn id(s: &str) -> ResourceId {
        ResourceId::new(s).unwrap()
    }

    fn loader(doc: &MemoryDocument) -> Loader {
        Loader::new(base("https://cdn.test/v1"), Arc::new(doc.clone()), None)
    }

    #[test]
    fn url_joins_without_double_slash() {
        let doc = MemoryDocument::new();
        let loader = Loader::new(base("https://cdn.test/v1/"), Arc::new(doc), None);
        assert_eq!(
            loader.resource_url(&id("scripts/alert"), ResourceKind::Script),
            "https://cdn.test/v1/scripts/alert.js"
        );
        assert_eq!(
            loader.resource_url(&id("styles/theme"), ResourceKind::Style),
            "https://cdn.test/v1/styles/theme.css"
        );
    }

    #[tokio::test]
    async fn second_load_does_not_insert() {
        let doc = MemoryDocument::new();
        let loader = loader(&doc);

        let first = loader
            .load(&id("scripts/alert"), ResourceKind::Script, Placement::Body)
            .await
            .unwrap();
        let second = loader
            .load(&id("scripts/alert"), ResourceKind::Script, Placement::Head)
            .await
            .unwrap();

        assert_eq!(first, LoadOutcome::Loaded);
        assert_eq!(second, LoadOutcome::AlreadyLoaded);
        assert_eq!(doc.marker_count(ResourceKind::Script, "scripts/alert"), 1);
    }

    #[tokio::test]
    async fn preexisting_marker_is_respected() {
        let doc = MemoryDocument::new().with_existing(ResourceKind::Script, "scripts/alert");
        let loader = loader(&doc);

        let outcome = loader
            .load(&id("scripts/alert"), ResourceKind::Script, Placement::Body)
            .await
            .unwrap();

        assert_eq!(outcome, LoadOutcome::AlreadyLoaded);
        assert!(doc.inserted().is_empty());
    }

    #[tokio::test]
    async fn styles_always_attach_to_head() {
        let doc = MemoryDocument::new();
        let loader = loader(&doc);

        loader
            .load(&id("styles/theme"), ResourceKind::Style, Placement::Body)
            .await
            .unwrap();

        assert_eq!(doc.ids_in(Placement::Head), vec!["styles/theme"]);
        assert!(doc.ids_in(Placement::Body).is_empty());
    }

    #[tokio::test]
    async fn failure_carries_id_and_url() {
        let doc = MemoryDocument::new().with_behavior("scripts/missing", NodeBehavior::Fail("HTTP 404".into()));
        let loader = loader(&doc);

        let err = loader
            .load(&id("scripts/missing"), ResourceKind::Script, Placement::Body)
            .await
            .unwrap_err();

        assert_eq!(
            err,
            RouterError::ResourceLoad {
                id: id("scripts/missing"),
                url: "https://cdn.test/v1/scripts/missing.js".into(),
                reason: "HTTP 404".into(),
            }
        );
    }

    #[tokio::test]
    async fn failed_resource_keeps_failing_without_reinserting() {
        let doc = MemoryDocument::new().with_behavior("scripts/missing", NodeBehavior::Fail("HTTP 404".into()));
        let loader = loader(&doc);

        let first = loader
            .load(&id("scripts/missing"), ResourceKind::Script, Placement::Body)
            .await;
        let second = loader
            .load(&id("scripts/missing"), ResourceKind::Script, Placement::Body)
            .await;

        assert!(first.is_err());
        assert_eq!(first, second);
        assert_eq!(doc.marker_count(ResourceKind::Script, "scripts/missing"), 1);
    }

    #[tokio::test]
    async fn same_id_different_kind_is_distinct() {
        let doc = MemoryDocument::new();
        let loader = loader(&doc);

        loader
            .load(&id("shared/widget"), ResourceKind::Script, Placement::Body)
            .await
            .unwrap();
        let style = loader
            .load(&id("shared/widget"), ResourceKind::Style, Placement::Head)
            .await
            .unwrap();

        assert_eq!(style, LoadOutcome::Loaded);
        assert_eq!(doc.inserted().len(), 2);
    }

    #[tokio::test]
    async fn timeout_fails_hung_resource() {
        let doc = MemoryDocument::new().with_behavior("scripts/slow", NodeBehavior::Hang);
        let loader = Loader::new(
            base("https://cdn.test"),
            Arc::new(doc.clone()),
            Some(Duration::from_millis(20)),
        );

        let err = loader
            .load(&id("scripts/slow"), ResourceKind::Script, Placement::Body)
            .await
            .unwrap_err();

        assert!(matches!(err, RouterError::Timeout { .. }));
        assert_eq!(err.resource_id(), Some(&id("scripts/slow")));
        assert!(loader.is_marked(&id("scripts/slow"), ResourceKind::Script));
    }

    #[tokio::test]
    async fn concurrent_loads_insert_once() {
        let doc = MemoryDocument::new()
            .with_behavior("scripts/shared", NodeBehavior::Delay(Duration::from_millis(10)));
        let loader = Arc::new(loader(&doc));

        let mut handles = Vec::new();
        for _ in 0..8 {
            let loader = Arc::clone(&loader);
            handles.push(tokio::spawn(async move {
                loader
                    .load(&id("scripts/shared"), ResourceKind::Script, Placement::Body)
                    .await
            }));
        }
        for handle in handles {
            assert!(handle.await.unwrap().is_ok());
        }

        assert_eq!(doc.marker_count(ResourceKind::Script, "scripts/shared"), 1);
    }
}
