//! Cronitor API client
//!
//! Typed CRUD client for monitors and notification lists. Each operation is a
//! single round trip plus, for create/update, a follow-up get: the service's
//! create and update responses are not trusted as canonical, so the full
//! representation is always re-fetched by key.
//!
//! The client holds no mutable state after construction and is safe to share
//! across concurrent resource operations. No retries, no internal timeouts —
//! the calling convergence engine owns that policy.

use rand::RngCore;
use regex::Regex;
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::Serialize;
use tracing::debug;
use url::Url;

use super::errors::{ApiError, Resource};
use super::types::{Monitor, NotificationList};
use crate::reconcile::ValidationError;

const DEFAULT_ENDPOINT: &str = "https://cronitor.io";
const TELEMETRY_ENDPOINT: &str = "https://cronitor.link";
const LIST_KEY_PATTERN: &str = "^[0-9a-z0-9-_]+$";

const DEFAULT_REALERT_INTERVAL: &str = "every 8 hours";
const DEFAULT_NOTIFY: &str = "default";
const DEFAULT_ENVIRONMENT: &str = "production";
const DEFAULT_TIMEOUT_SECONDS: i32 = 5;

/// How much of an error response body is embedded in diagnostics.
const BODY_SNIPPET_LEN: usize = 200;

/// Options for [`Client::new`]. Everything except the api key has a default.
#[derive(Clone, Default)]
pub struct ClientOpts {
    pub api_key: String,
    /// Base endpoint, `https://cronitor.io` when unset.
    pub endpoint: Option<String>,
    /// Bring-your-own transport, mainly for tests.
    pub http: Option<reqwest::Client>,
}

// The api key is a credential; keep it out of logs.
impl std::fmt::Debug for ClientOpts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientOpts")
            .field("api_key", &"<redacted>")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

/// Cronitor API client. Immutable after construction.
pub struct Client {
    endpoint: String,
    api_key: String,
    http: reqwest::Client,
    list_key_regex: Regex,
}

impl Client {
    pub fn new(opts: ClientOpts) -> Self {
        let endpoint = opts
            .endpoint
            .filter(|e| !e.is_empty())
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

        // The pattern is a checked literal, compilation cannot fail.
        let list_key_regex =
            Regex::new(LIST_KEY_PATTERN).expect("list key pattern must compile");

        Self {
            endpoint,
            api_key: opts.api_key,
            http: opts.http.unwrap_or_default(),
            list_key_regex,
        }
    }

    /// Build a client from `CRONITOR_API_KEY` and optional `CRONITOR_ENDPOINT`.
    pub fn from_env() -> Result<Self, std::env::VarError> {
        let api_key = std::env::var("CRONITOR_API_KEY")?;
        let endpoint = std::env::var("CRONITOR_ENDPOINT").ok();
        Ok(Self::new(ClientOpts {
            api_key,
            endpoint,
            http: None,
        }))
    }

    /// The ping URL for a heartbeat monitor. Derived from the account key,
    /// never part of any API payload; recomputed locally on every read.
    pub fn telemetry_url(&self, key: &str) -> String {
        format!("{}/p/{}/{}", TELEMETRY_ENDPOINT, self.api_key, key)
    }

    /// Check a derived notification-list key against the service's pattern.
    pub fn validate_list_key(&self, key: &str) -> Result<(), ValidationError> {
        if !self.list_key_regex.is_match(key) {
            return Err(ValidationError::InvalidListKey {
                key: key.to_string(),
            });
        }
        Ok(())
    }

    // ── Monitors ───────────────────────────────────────────────

    /// Fetch a monitor by key. Anything other than 200 is a failure.
    pub async fn get_monitor(&self, key: &str) -> Result<Monitor, ApiError> {
        let resp = self
            .request(Method::GET, &format!("/api/monitors/{}", key))?
            .send()
            .await?;
        let url = resp.url().to_string();
        let status = resp.status();
        if status != StatusCode::OK {
            return Err(ApiError::FailedGet {
                resource: Resource::Monitor,
                url,
                status,
            });
        }

        let body = resp.text().await?;
        let mon: Monitor = serde_json::from_str(&body).map_err(ApiError::Decode)?;
        debug!(key, "fetched monitor");
        Ok(mon)
    }

    /// Create a monitor. Header/cookie keys are validated first (zero
    /// network calls on violation), defaults are applied to a copy of the
    /// input (the caller's spec is untouched), the service must answer 201,
    /// and the canonical representation is then re-fetched by the returned
    /// key.
    pub async fn create_monitor(&self, monitor: &Monitor) -> Result<Monitor, ApiError> {
        validate_request_keys(monitor)?;
        let mut monitor = monitor.clone();
        set_create_defaults(&mut monitor);

        let resp = self
            .request_json(Method::POST, "/api/monitors", &monitor)?
            .send()
            .await?;
        let status = resp.status();
        let body = resp.text().await?;
        if status != StatusCode::CREATED {
            return Err(ApiError::FailedCreate {
                resource: Resource::Monitor,
                status,
                body: snippet(&body),
            });
        }

        let created: Monitor = serde_json::from_str(&body).map_err(ApiError::Decode)?;
        let key = created.key.ok_or(ApiError::MissingResponseKey {
            resource: Resource::Monitor,
        })?;
        debug!(key, "created monitor");

        self.get_monitor(&key).await
    }

    /// Overwrite a monitor in place. Requires the service-assigned key and
    /// lower-case header/cookie keys; fails before any network call
    /// otherwise.
    pub async fn update_monitor(&self, monitor: &Monitor) -> Result<Monitor, ApiError> {
        let key = monitor
            .key
            .as_deref()
            .ok_or(ValidationError::MissingKey)?;
        validate_request_keys(monitor)?;

        let resp = self
            .request_json(Method::PUT, &format!("/api/monitors/{}", key), monitor)?
            .send()
            .await?;
        let status = resp.status();
        if status != StatusCode::OK {
            let body = resp.text().await.unwrap_or_default();
            return Err(ApiError::FailedUpdate {
                resource: Resource::Monitor,
                status,
                body: snippet(&body),
            });
        }
        debug!(key, "updated monitor");

        self.get_monitor(key).await
    }

    /// Delete a monitor. Any status below 300 counts as success.
    pub async fn delete_monitor(&self, key: &str) -> Result<(), ApiError> {
        let resp = self
            .request(Method::DELETE, &format!("/api/monitors/{}", key))?
            .send()
            .await?;
        let status = resp.status();
        if status.as_u16() > 299 {
            return Err(ApiError::FailedDelete {
                resource: Resource::Monitor,
                status,
            });
        }
        debug!(key, "deleted monitor");
        Ok(())
    }

    // ── Notification lists ─────────────────────────────────────

    /// Fetch a notification list by key. Anything other than 200 is a failure.
    pub async fn get_notification_list(&self, key: &str) -> Result<NotificationList, ApiError> {
        let resp = self
            .request(Method::GET, &format!("/v1/templates/{}", key))?
            .send()
            .await?;
        let url = resp.url().to_string();
        let status = resp.status();
        if status != StatusCode::OK {
            return Err(ApiError::FailedGet {
                resource: Resource::NotificationList,
                url,
                status,
            });
        }

        let body = resp.text().await?;
        let list: NotificationList =
            serde_json::from_str(&body).map_err(ApiError::Decode)?;
        debug!(key, "fetched notification list");
        Ok(list)
    }

    /// Create a notification list. The key is derived client-side from the
    /// display name plus three random bytes and validated before any network
    /// call; a malformed candidate short-circuits with zero transport
    /// invocations.
    pub async fn create_notification_list(
        &self,
        list: &NotificationList,
    ) -> Result<NotificationList, ApiError> {
        let mut entropy = [0u8; 3];
        rand::thread_rng().fill_bytes(&mut entropy);
        let key = derive_list_key(&list.name, entropy);
        self.validate_list_key(&key)?;

        let mut list = list.clone();
        list.key = Some(key.clone());

        let resp = self
            .request_json(Method::POST, "/v1/templates", &list)?
            .send()
            .await?;
        let status = resp.status();
        if status != StatusCode::CREATED {
            let body = resp.text().await.unwrap_or_default();
            return Err(ApiError::FailedCreate {
                resource: Resource::NotificationList,
                status,
                body: snippet(&body),
            });
        }
        debug!(key, "created notification list");

        // The create response is minimal; the derived key is authoritative.
        self.get_notification_list(&key).await
    }

    /// Overwrite a notification list in place. Requires a known key.
    pub async fn update_notification_list(
        &self,
        list: &NotificationList,
    ) -> Result<NotificationList, ApiError> {
        let key = list.key.as_deref().ok_or(ValidationError::MissingKey)?;

        let resp = self
            .request_json(Method::PUT, &format!("/v1/templates/{}", key), list)?
            .send()
            .await?;
        let status = resp.status();
        if status != StatusCode::OK {
            let body = resp.text().await.unwrap_or_default();
            return Err(ApiError::FailedUpdate {
                resource: Resource::NotificationList,
                status,
                body: snippet(&body),
            });
        }
        debug!(key, "updated notification list");

        self.get_notification_list(key).await
    }

    /// Delete a notification list. Unlike monitors, the service answers
    /// exactly 204 on success; anything else, including 200, is a failure.
    pub async fn delete_notification_list(&self, key: &str) -> Result<(), ApiError> {
        let resp = self
            .request(Method::DELETE, &format!("/v1/templates/{}", key))?
            .send()
            .await?;
        let status = resp.status();
        if status != StatusCode::NO_CONTENT {
            return Err(ApiError::FailedDelete {
                resource: Resource::NotificationList,
                status,
            });
        }
        debug!(key, "deleted notification list");
        Ok(())
    }

    // ── Request building ───────────────────────────────────────

    /// Build a signed request: basic auth with the api key as username and an
    /// empty password, JSON content negotiation.
    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, ApiError> {
        let raw = format!("{}{}", self.endpoint, path);
        let url = Url::parse(&raw).map_err(|source| ApiError::Url { url: raw, source })?;
        Ok(self
            .http
            .request(method, url)
            .basic_auth(&self.api_key, Option::<&str>::None)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json"))
    }

    /// [`Self::request`] with a JSON-encoded body attached.
    fn request_json<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<RequestBuilder, ApiError> {
        let encoded = serde_json::to_vec(body).map_err(ApiError::Encode)?;
        Ok(self.request(method, path)?.body(encoded))
    }
}

/// Derive a candidate notification-list key: the lower-cased display name
/// plus a dash and three hex-encoded random bytes. The result still has to
/// pass [`Client::validate_list_key`]; a name with characters outside
/// `[0-9a-z-_]` yields a candidate that is rejected before it goes anywhere.
pub fn derive_list_key(name: &str, entropy: [u8; 3]) -> String {
    format!("{}-{}", name.to_lowercase(), hex::encode(entropy))
}

/// The service matches request header and cookie keys case-sensitively, so
/// mixed-case keys silently never match. Reject them before the payload
/// leaves the process; on violation create/update make zero network calls.
fn validate_request_keys(mon: &Monitor) -> Result<(), ValidationError> {
    let Some(request) = &mon.request else {
        return Ok(());
    };
    if let Some(headers) = &request.headers {
        for key in headers.keys() {
            if *key != key.to_lowercase() {
                return Err(ValidationError::UppercaseHeaderKey { key: key.clone() });
            }
        }
    }
    if let Some(cookies) = &request.cookies {
        for key in cookies.keys() {
            if *key != key.to_lowercase() {
                return Err(ValidationError::UppercaseCookieKey { key: key.clone() });
            }
        }
    }
    Ok(())
}

/// Create-time defaulting. Applied only on create, to a copy of the caller's
/// spec; update sends the declared configuration verbatim, so a caller that
/// explicitly cleared one of these fields does not get it reinstated.
fn set_create_defaults(mon: &mut Monitor) {
    if mon.realert_interval.is_none() {
        mon.realert_interval = Some(DEFAULT_REALERT_INTERVAL.to_string());
    }
    if mon.notify.as_ref().map_or(true, |n| n.is_empty()) {
        mon.notify = Some(vec![DEFAULT_NOTIFY.to_string()]);
    }
    if mon.environments.as_ref().map_or(true, |e| e.is_empty()) {
        mon.environments = Some(vec![DEFAULT_ENVIRONMENT.to_string()]);
    }
    if let Some(request) = &mut mon.request {
        if request.timeout_seconds.is_none() {
            request.timeout_seconds = Some(DEFAULT_TIMEOUT_SECONDS);
        }
    }
}

fn snippet(body: &str) -> String {
    body.chars().take(BODY_SNIPPET_LEN).collect()
}
