//! document::http
//!
//! Document backed by plain HTTP GETs.
//!
//! # Design
//!
//! Each appended node is fetched with a single `GET` and no body or
//! authentication. A 2xx response is the load event; any other status or a
//! transport error is the error event. This is what a browser does for
//! `<script src>` and `<link href>`. Operators use it to check that every
//! asset a page declares is actually served.

use async_trait::async_trait;
use reqwest::header::{HeaderValue, USER_AGENT};
use reqwest::Client;
use std::collections::HashSet;
use std::sync::Mutex;

use super::traits::{Document, LoadFailure, ResourceNode, ScriptsLoaded};
use crate::core::types::{ResourceId, ResourceKind};

const USER_AGENT_VALUE: &str = concat!("webflow-scripts/", env!("CARGO_PKG_VERSION"));

/// One fetched resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRecord {
    /// The fetched node
    pub node: ResourceNode,
    /// HTTP status, if a response arrived. Stays `None` for a request that
    /// failed in transport or was abandoned before answering.
    pub status: Option<u16>,
}

/// HTTP-backed document.
#[derive(Debug, Default)]
pub struct HttpDocument {
    client: Client,
    markers: Mutex<HashSet<(ResourceKind, ResourceId)>>,
    fetches: Mutex<Vec<FetchRecord>>,
    events: Mutex<Vec<ScriptsLoaded>>,
}

impl HttpDocument {
    /// Create a document with a default HTTP client.
    pub fn new() -> Self {
        Self::with_client(Client::new())
    }

    /// Create a document with a preconfigured client.
    pub fn with_client(client: Client) -> Self {
        Self {
            client,
            markers: Mutex::new(HashSet::new()),
            fetches: Mutex::new(Vec::new()),
            events: Mutex::new(Vec::new()),
        }
    }

    /// Fetches made so far, in order.
    pub fn fetches(&self) -> Vec<FetchRecord> {
        lock(&self.fetches).clone()
    }

    /// Completion events dispatched so far.
    pub fn events(&self) -> Vec<ScriptsLoaded> {
        lock(&self.events).clone()
    }

    /// Record a fetch before it is sent. Returns its index for [`Self::settle`].
    fn record(&self, node: ResourceNode) -> usize {
        let mut fetches = lock(&self.fetches);
        fetches.push(FetchRecord { node, status: None });
        fetches.len() - 1
    }

    fn settle(&self, index: usize, status: u16) {
        if let Some(record) = lock(&self.fetches).get_mut(index) {
            record.status = Some(status);
        }
    }
}

/// Lock a mutex, recovering the data if a panicking holder poisoned it.
fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
}

#[async_trait]
impl Document for HttpDocument {
    fn name(&self) -> &'static str {
        "http"
    }

    fn has_marker(&self, kind: ResourceKind, id: &ResourceId) -> bool {
        lock(&self.markers).contains(&(kind, id.clone()))
    }

    async fn append(&self, node: ResourceNode) -> Result<(), LoadFailure> {
        lock(&self.markers).insert((node.kind, node.id.clone()));
        let index = self.record(node.clone());

        let response = self
            .client
            .get(&node.url)
            .header(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE))
            .send()
            .await;

        match response {
            Ok(response) => {
                let status = response.status();
                self.settle(index, status.as_u16());
                if status.is_success() {
                    Ok(())
                } else {
                    Err(LoadFailure(format!("HTTP {}", status)))
                }
            }
            Err(e) => Err(LoadFailure(format!("network error: {}", e))),
        }
    }

    fn dispatch(&self, event: &ScriptsLoaded) {
        lock(&self.events).push(event.clone());
    }
}
