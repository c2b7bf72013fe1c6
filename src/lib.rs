//! webflow-scripts - Script router and project scaffolding for Webflow sites
//!
//! A Webflow page embeds a small bootstrap that hands a declarative load
//! request to the script router. The router picks a base URL (a local dev
//! server on Webflow staging hosts, static hosting in production), loads
//! global and page scripts and styles in a fixed order without ever loading
//! one twice, and announces completion so dependent scripts can coordinate.
//!
//! # Architecture
//!
//! - [`router`] - Base URL resolution, load planning, idempotent loading, completion
//! - [`document`] - The host document abstraction the router injects into
//! - [`core`] - Domain types, configuration, and project paths
//! - [`scaffold`] - Project and script scaffolding
//! - [`cli`] - Command-line interface layer
//! - [`ui`] - User interaction utilities
//!
//! # Correctness Invariants
//!
//! 1. No resource identifier is injected twice into the same document
//! 2. Resources load strictly in plan order, one at a time
//! 3. Completion is signalled exactly once, and only after every resource loaded
//! 4. Scaffolding never writes into a non-empty directory

pub mod cli;
pub mod core;
pub mod document;
pub mod router;
pub mod scaffold;
pub mod ui;
