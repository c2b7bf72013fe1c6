//! document
//!
//! Abstraction for the host document resources are injected into.
//!
//! # Architecture
//!
//! The `Document` trait is the seam between the router and the page. The
//! router owns ordering and deduplication; a document only inserts nodes,
//! reports how they settle, and broadcasts the completion event.
//!
//! # Modules
//!
//! - `traits`: Core `Document` trait and node/event types
//! - [`memory`]: In-memory document for dry runs and tests
//! - [`http`]: Document that fetches each node with a plain HTTP GET

pub mod http;
pub mod memory;
mod traits;

pub use traits::*;
