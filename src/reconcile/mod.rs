//! Declared/observed reconciliation
//!
//! This module provides:
//! - The declared resource model ([`MonitorSpec`], [`ListSpec`]) consumed by
//!   the external convergence engine
//! - Mapping between that model and the API wire shape (`wire`)
//! - The order-insensitive collection normalizer (`order`) that keeps the
//!   service's arbitrary ordering of unordered sets from registering as drift
//! - Sync-state classification after normalization

pub mod model;
pub mod order;
pub mod wire;

pub use model::{Heartbeat, HttpCheck, ListSpec, MonitorKind, MonitorSpec};
pub use order::reorder_to_match;
pub use wire::{
    heartbeat_from_wire, http_from_wire, list_from_wire, list_to_wire, monitor_to_wire,
    normalize_list, normalize_monitor,
};

/// Client-side precondition failures, raised before any network call is made.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("cannot update resource with empty key")]
    MissingKey,

    #[error("invalid key, only lowercase letters, numbers, dashes and underscores: {key}")]
    InvalidListKey { key: String },

    #[error("header keys must be in lower case: {key}")]
    UppercaseHeaderKey { key: String },

    #[error("cookie keys must be in lower case: {key}")]
    UppercaseCookieKey { key: String },
}

/// Where a managed resource stands relative to its declared configuration.
///
/// The full lifecycle is `Unmanaged → Created → {Synced ⇄ Drifted} →
/// Deleted`; only the middle pair is observable here, the rest is owned by
/// the convergence engine's state store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    Synced,
    Drifted,
}

/// Classify an observed spec against its declared counterpart.
///
/// Call this after [`normalize_monitor`] / [`normalize_list`], otherwise a
/// reordered-but-equal set will be misreported as drift.
pub fn sync_state<T: PartialEq>(declared: &T, observed: &T) -> SyncState {
    if declared == observed {
        SyncState::Synced
    } else {
        SyncState::Drifted
    }
}
