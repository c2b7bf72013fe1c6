//! core
//!
//! Core domain types, configuration, and paths.
//!
//! # Modules
//!
//! - [`types`] - Strong types: ResourceId, ResourceKind, Placement, Environment
//! - [`config`] - Configuration schema and loading
//! - [`paths`] - Centralized path routing for a scaffolded project
//!
//! # Design Principles
//!
//! - Strong typing prevents invalid states at compile time
//! - Schemas are strict and self-describing

pub mod config;
pub mod paths;
pub mod types;
