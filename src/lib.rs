//! State-reconciliation core for declaratively managed Cronitor resources.
//!
//! This crate keeps a locally declared monitoring configuration (HTTP checks,
//! heartbeat checks, notification lists) in sync with the Cronitor API. It
//! has two halves:
//!
//! - [`cronitor`] — wire types and a typed HTTP client for CRUD operations
//!   against the API, including create-time defaulting and client-side key
//!   derivation for notification lists
//! - [`reconcile`] — the declared/observed model, `to_wire`/`from_wire`
//!   mapping, and the order-insensitive collection normalizer that stops the
//!   service's arbitrary ordering of unordered sets from showing up as a
//!   perpetual diff
//!
//! The plan/diff machinery, state persistence, and retry policy all live in
//! the calling convergence engine; this crate only performs single round
//! trips and returns typed errors.

pub mod cronitor;
pub mod reconcile;
