//! router::error
//!
//! Errors surfaced by the loader and orchestrator.

use std::time::Duration;
use thiserror::Error;

use crate::core::types::{ResourceId, TypeError};

/// Errors from router operations.
///
/// Any of these aborts the remaining load sequence and withholds the
/// completion signal.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RouterError {
    /// A script or stylesheet failed to load.
    #[error("failed to load {id} from {url}: {reason}")]
    ResourceLoad {
        /// Identifier of the failed resource
        id: ResourceId,
        /// URL that was requested
        url: String,
        /// Reason reported by the host document
        reason: String,
    },

    /// A resource did not settle within the configured timeout.
    #[error("timed out loading {id} after {after:?}")]
    Timeout {
        /// Identifier of the stalled resource
        id: ResourceId,
        /// The timeout that expired
        after: Duration,
    },

    /// A configured name is not a valid resource identifier.
    #[error(transparent)]
    InvalidResource(#[from] TypeError),

    /// The load sequence was already started for this router.
    #[error("script router has already run")]
    AlreadyRan,
}

impl RouterError {
    /// The resource the error is about, if any.
    pub fn resource_id(&self) -> Option<&ResourceId> {
        match self {
            RouterError::ResourceLoad { id, .. } | RouterError::Timeout { id, .. } => Some(id),
            RouterError::InvalidResource(_) | RouterError::AlreadyRan => None,
        }
    }
}
