//! Crate-level error types.
//!
//! Per-concern errors live next to their concern ([`StorageError`] in
//! [`crate::storage`], [`TransportError`] in [`crate::sonos`]); this module
//! folds them into the single [`BatonError`] callers see. The taxonomy is
//! deliberate: cache reads degrade to absence and never raise, resolution
//! raises only when a positive group configuration matches nothing, and
//! transport failures pass through without retry.

use thiserror::Error;

use crate::sonos::TransportError;
use crate::storage::StorageError;

/// Application-wide error type for resolver operations.
#[derive(Debug, Error)]
pub enum BatonError {
    /// A group was selected, explicitly or as the sole implicit group, but
    /// no known device carries a coordinator for it.
    #[error("no coordinator found for group \"{0}\"")]
    NoCoordinator(String),

    /// Discovery or device-command failure from the transport collaborator.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// A cache write could not be persisted.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Convenient Result alias for resolver operations.
pub type BatonResult<T> = Result<T, BatonError>;
