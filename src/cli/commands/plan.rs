//! plan command - Show the requests the script router would make
//!
//! Drives the real router against a [`MemoryDocument`] (dry run) or an
//! [`HttpDocument`] (`--fetch`).

use anyhow::{bail, Context as _, Result};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

use super::load_config;
use crate::cli::args::PlanArgs;
use crate::cli::Context;
use crate::core::types::{Environment, Placement, ResourceId, ResourceKind};
use crate::document::http::HttpDocument;
use crate::document::memory::MemoryDocument;
use crate::document::{Document, ResourceNode, ScriptsLoaded, SCRIPTS_LOADED_EVENT};
use crate::router::{OneOrMany, PageConfig, RouterSettings, ScriptList, ScriptRouter};
use crate::ui::output::{self, format_field};

/// One request the router made, in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannedRequest {
    pub id: ResourceId,
    pub kind: ResourceKind,
    pub placement: Placement,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}

impl PlannedRequest {
    fn from_node(node: ResourceNode, status: Option<u16>) -> Self {
        Self {
            id: node.id,
            kind: node.kind,
            placement: node.target,
            url: node.url,
            status,
        }
    }
}

/// Outcome of one router run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanReport {
    pub host: String,
    pub base_url: String,
    pub environment: Environment,
    pub document: &'static str,
    pub requests: Vec<PlannedRequest>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<ScriptsLoaded>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Run the router for a page and print what it requested.
pub fn plan(ctx: &Context, args: &PlanArgs) -> Result<()> {
    let root = ctx.cwd()?;
    let config = load_config(ctx, Some(&root))?;

    let mut settings = config
        .router_settings(args.production_url.as_deref())
        .context("Pass --production-url or run inside an initialized project")?;
    match args.timeout_ms {
        Some(0) => bail!("--timeout-ms must be greater than zero"),
        Some(ms) => settings.load_timeout = Some(Duration::from_millis(ms)),
        None => {}
    }

    let page = build_page_config(args)?;

    let rt = tokio::runtime::Runtime::new()?;
    let report = rt.block_on(run_router(&settings, &args.host, page, args.fetch));

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report, ctx);
    }

    match report.error {
        Some(error) => bail!("{}", error),
        None => Ok(()),
    }
}

/// Build the page configuration from `--page` and the inline flags.
///
/// Inline globals and styles are appended to the file's lists. An inline
/// page script or base URL replaces the file's value.
pub fn build_page_config(args: &PlanArgs) -> Result<PageConfig> {
    let mut page = match &args.page {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read page config '{}'", path.display()))?;
            PageConfig::from_json(&json)
                .with_context(|| format!("Invalid page config '{}'", path.display()))?
        }
        None => PageConfig::default(),
    };

    if !args.globals.is_empty() {
        let global = page.global.get_or_insert_with(ScriptList::default);
        for name in &args.globals {
            global.push_body(name.as_str());
        }
    }

    if let Some(name) = &args.page_script {
        page.page_script = Some(name.clone());
    }

    if !args.styles.is_empty() {
        match &mut page.page_styles {
            Some(styles) => styles.extend(args.styles.iter().cloned()),
            None => page.page_styles = Some(OneOrMany::Many(args.styles.clone())),
        }
    }

    if let Some(url) = &args.base_url {
        page.base_url_override = Some(url.clone());
    }

    Ok(page)
}

/// Run the router against a dry-run or HTTP document and collect a report.
pub async fn run_router(
    settings: &RouterSettings,
    host: &str,
    page: PageConfig,
    fetch: bool,
) -> PlanReport {
    enum Backend {
        Memory(MemoryDocument),
        Http(Arc<HttpDocument>),
    }

    let backend = if fetch {
        Backend::Http(Arc::new(HttpDocument::new()))
    } else {
        Backend::Memory(MemoryDocument::new())
    };
    let document: Arc<dyn Document> = match &backend {
        Backend::Memory(memory) => Arc::new(memory.clone()),
        Backend::Http(http) => http.clone(),
    };

    let router = ScriptRouter::new(settings, host, page, Arc::clone(&document));
    let result = router.run().await;

    let requests = match backend {
        Backend::Memory(memory) => memory
            .inserted()
            .into_iter()
            .map(|node| PlannedRequest::from_node(node, None))
            .collect(),
        Backend::Http(http) => http
            .fetches()
            .into_iter()
            .map(|record| PlannedRequest::from_node(record.node, record.status))
            .collect(),
    };

    let (completed, error) = match result {
        Ok(event) => (Some(event), None),
        Err(e) => (None, Some(e.to_string())),
    };

    PlanReport {
        host: host.to_string(),
        base_url: router.base_url().to_string(),
        environment: router.environment(),
        document: document.name(),
        requests,
        completed,
        error,
    }
}

fn print_report(report: &PlanReport, ctx: &Context) {
    let verbosity = ctx.verbosity();

    output::print(
        [
            format_field("Host", &report.host, 11),
            format_field("Environment", report.environment, 11),
            format_field("Base URL", &report.base_url, 11),
            format_field("Document", report.document, 11),
        ]
        .join("\n"),
        verbosity,
    );
    output::print("", verbosity);

    if report.requests.is_empty() {
        output::print("Nothing to load.", verbosity);
    }
    let lines: Vec<String> = report
        .requests
        .iter()
        .map(|r| {
            let status = r.status.map(|s| format!(" [{}]", s)).unwrap_or_default();
            format!("{} {} ({}) {}{}", r.kind, r.id, r.placement, r.url, status)
        })
        .collect();
    output::print(output::format_numbered(&lines), verbosity);

    if let Some(event) = &report.completed {
        output::success(
            format!(
                "{} {{ baseUrl: {}, environment: {} }}",
                SCRIPTS_LOADED_EVENT, event.base_url, event.environment
            ),
            verbosity,
        );
    }
}
