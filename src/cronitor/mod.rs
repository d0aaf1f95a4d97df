//! Cronitor API integration
//!
//! This module provides:
//! - Wire types for the monitor and notification-list (template) endpoints
//! - Typed HTTP client for CRUD operations, with create-time defaulting and
//!   notification-list key derivation
//! - Error taxonomy separating transport, protocol, encoding and validation
//!   failures

pub mod client;
pub mod errors;
pub mod types;

pub use client::{derive_list_key, Client, ClientOpts};
pub use errors::{ApiError, Resource};
pub use types::*;
