//! Typed failure model for the Cronitor client.
//!
//! Four families, all surfaced to the caller, none retried internally:
//!
//! - transport: the network round trip itself failed
//! - protocol: the service answered with an unexpected status code
//! - encoding: a JSON marshal/unmarshal failure (contract error)
//! - validation: a client-side precondition failed before any network call
//!
//! Protocol variants carry the URL, status and a response-body snippet so the
//! convergence engine can render a useful diagnostic.

use reqwest::StatusCode;

use crate::reconcile::ValidationError;

/// Resource kinds the client manages, used to label protocol failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Monitor,
    NotificationList,
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Resource::Monitor => write!(f, "monitor"),
            Resource::NotificationList => write!(f, "notification list"),
        }
    }
}

/// Errors produced by [`crate::cronitor::Client`] operations.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("invalid request url {url}: {source}")]
    Url {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("failed to decode response body: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("failed to get {resource} details: url: {url}, code {status}")]
    FailedGet {
        resource: Resource,
        url: String,
        status: StatusCode,
    },

    #[error("failed to create {resource}: code {status} response: {body}")]
    FailedCreate {
        resource: Resource,
        status: StatusCode,
        body: String,
    },

    #[error("failed to update {resource}: code {status} response: {body}")]
    FailedUpdate {
        resource: Resource,
        status: StatusCode,
        body: String,
    },

    #[error("failed to delete {resource}: code {status}")]
    FailedDelete {
        resource: Resource,
        status: StatusCode,
    },

    #[error("{resource} create response did not include a key")]
    MissingResponseKey { resource: Resource },

    #[error(transparent)]
    Validation(#[from] ValidationError),
}
