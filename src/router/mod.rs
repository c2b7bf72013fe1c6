//! router
//!
//! The script router: resolves the base URL once, then drains a page's load
//! request into sequential, deduplicated resource loads and announces
//! completion.
//!
//! # Lifecycle
//!
//! ```text
//! new (resolve base URL) -> run: plan -> load step 1 -> ... -> load step N -> complete
//!                                         \____________ any failure ____________/
//!                                                     log, no completion
//! ```
//!
//! # Invariants
//!
//! - The base URL and environment are computed once and never change
//! - Steps run strictly one after another, in plan order
//! - The first failure aborts the remaining steps
//! - The completion signal fires exactly once, only after every step loaded
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use webflow_scripts::document::memory::MemoryDocument;
//! use webflow_scripts::router::request::PageConfig;
//! use webflow_scripts::router::resolve::RouterSettings;
//! use webflow_scripts::router::ScriptRouter;
//!
//! # tokio_test::block_on(async {
//! let doc = MemoryDocument::new();
//! let page = PageConfig::from_json(r#"{ "global": ["logger"], "pageScript": "home" }"#).unwrap();
//! let settings = RouterSettings::new("https://octocat.github.io/site/dist");
//!
//! let router = ScriptRouter::new(&settings, "example.com", page, Arc::new(doc.clone()));
//! let loaded = router.run().await.unwrap();
//!
//! assert_eq!(loaded.base_url, "https://octocat.github.io/site/dist");
//! assert_eq!(
//!     doc.requested_urls(),
//!     vec![
//!         "https://octocat.github.io/site/dist/scripts/logger.js",
//!         "https://octocat.github.io/site/dist/pages/home.js",
//!     ]
//! );
//! # });
//! ```

pub mod completion;
pub mod error;
pub mod loader;
pub mod plan;
pub mod request;
pub mod resolve;

pub use completion::Completion;
pub use error::RouterError;
pub use loader::{LoadOutcome, Loader};
pub use plan::{LoadPlan, LoadStep};
pub use request::{OneOrMany, PageConfig, ScriptList};
pub use resolve::{resolve, ResolvedBase, RouterSettings};

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, error, info};

use crate::core::types::{Environment, Placement, ResourceId, ResourceKind};
use crate::document::{Document, ScriptsLoaded, SCRIPTS_LOADED_EVENT};
use completion::CompletionSender;

/// The router's public surface for one page.
///
/// Scripts loaded by the router get the same loader through this value, so
/// sub-resources they load share its deduplication.
pub struct ScriptRouter {
    loader: Loader,
    page: PageConfig,
    document: Arc<dyn Document>,
    completion: CompletionSender,
    started: AtomicBool,
}

impl ScriptRouter {
    /// Create a router for a page served from `hostname`.
    ///
    /// The base URL is resolved here, once.
    pub fn new(
        settings: &RouterSettings,
        hostname: &str,
        page: PageConfig,
        document: Arc<dyn Document>,
    ) -> Self {
        let base = resolve(page.base_url_override.as_deref(), hostname, settings);
        info!(
            base_url = %base.base_url,
            environment = %base.environment,
            document = document.name(),
            "script router initialized"
        );

        let (completion, _) = CompletionSender::channel();
        Self {
            loader: Loader::new(base, Arc::clone(&document), settings.load_timeout),
            page,
            document,
            completion,
            started: AtomicBool::new(false),
        }
    }

    /// The resolved base URL.
    pub fn base_url(&self) -> &str {
        &self.loader.base().base_url
    }

    /// The resolved environment.
    pub fn environment(&self) -> Environment {
        self.loader.base().environment
    }

    /// The resolved base URL and environment.
    pub fn resolved(&self) -> &ResolvedBase {
        self.loader.base()
    }

    /// A handle on the completion signal.
    pub fn completion(&self) -> Completion {
        self.completion.subscribe()
    }

    /// The load plan for this page.
    ///
    /// # Errors
    ///
    /// Returns `InvalidResource` if the page names an invalid resource.
    pub fn plan(&self) -> Result<LoadPlan, RouterError> {
        Ok(LoadPlan::from_page(&self.page)?)
    }

    /// Load a resource through the shared loader.
    pub async fn load(
        &self,
        id: &ResourceId,
        kind: ResourceKind,
        placement: Placement,
    ) -> Result<LoadOutcome, RouterError> {
        self.loader.load(id, kind, placement).await
    }

    /// Load a script by path relative to the base URL, e.g. `scripts/forms`.
    pub async fn load_script(&self, path: &str, placement: Placement) -> Result<LoadOutcome, RouterError> {
        let id = ResourceId::new(path)?;
        self.loader.load(&id, ResourceKind::Script, placement).await
    }

    /// Load a stylesheet by path relative to the base URL, e.g. `styles/theme`.
    pub async fn load_style(&self, path: &str) -> Result<LoadOutcome, RouterError> {
        let id = ResourceId::new(path)?;
        self.loader.load(&id, ResourceKind::Style, Placement::Head).await
    }

    /// Run the page's load sequence.
    ///
    /// On success the completion signal resolves and the document dispatches
    /// the `scriptsLoaded` event. On failure the error is logged and
    /// returned, and the completion signal is withheld.
    ///
    /// # Errors
    ///
    /// - `AlreadyRan` if called more than once
    /// - `InvalidResource`, `ResourceLoad` or `Timeout` from the first failing step
    pub async fn run(&self) -> Result<ScriptsLoaded, RouterError> {
        if self.started.swap(true, Ordering::SeqCst) {
            return Err(RouterError::AlreadyRan);
        }

        match self.drive().await {
            Ok(event) => Ok(event),
            Err(e) => {
                error!(error = %e, "script router stopped; completion withheld");
                Err(e)
            }
        }
    }

    async fn drive(&self) -> Result<ScriptsLoaded, RouterError> {
        let plan = self.plan()?;
        debug!(steps = plan.len(), "load plan ready");

        for (i, step) in plan.iter().enumerate() {
            debug!(step = i + 1, "{}", step.description());
            self.loader.load(&step.id, step.kind, step.placement).await?;
        }

        let event = ScriptsLoaded::from(self.loader.base());
        if self.completion.resolve(event.clone()) {
            self.document.dispatch(&event);
        }
        info!(event = SCRIPTS_LOADED_EVENT, resources = plan.len(), "all scripts loaded");
        Ok(event)
    }
}

impl std::fmt::Debug for ScriptRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScriptRouter")
            .field("loader", &self.loader)
            .field("page", &self.page)
            .field("document", &self.document.name())
            .field("started", &self.started)
            .finish()
    }
}
