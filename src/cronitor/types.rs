//! Cronitor API wire types
//!
//! Field names match the monitor and template endpoints. A create response
//! can be minimal (little more than the assigned key), so every struct
//! tolerates missing fields via container-level defaults; the client
//! re-fetches the canonical representation after create/update anyway.
//!
//! Optional numeric fields (`failure_tolerance`, `grace_seconds`,
//! `schedule_tolerance`, `timeout_seconds`) are omitted from the payload when
//! absent. An explicit zero and an absent value are different things and must
//! round-trip as such.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// `type` discriminator for HTTP-check monitors.
pub const TYPE_CHECK: &str = "check";
/// `type` discriminator for heartbeat monitors.
pub const TYPE_HEARTBEAT: &str = "heartbeat";
/// `platform` value paired with [`TYPE_CHECK`].
pub const PLATFORM_HTTP: &str = "http";
/// `platform` value paired with [`TYPE_HEARTBEAT`].
pub const PLATFORM_LINUX: &str = "linux";

/// A monitor as the API sends and receives it, covering both kinds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Monitor {
    /// Service-assigned identity; absent until first creation, immutable after.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub platform: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule: Option<String>,
    pub disabled: bool,
    pub paused: bool,
    pub running: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub realert_interval: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notify: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environments: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assertions: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_tolerance: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grace_seconds: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule_tolerance: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    /// Only present for `check`/`http` monitors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request: Option<MonitorRequest>,
}

/// The HTTP request a `check` monitor performs against its target.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorRequest {
    pub url: String,
    pub method: String,
    /// Keys must be lower-case; validated client-side before create/update.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cookies: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_seconds: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regions: Option<Vec<String>>,
    #[serde(default = "default_true")]
    pub follow_redirects: bool,
    #[serde(default = "default_true")]
    pub verify_ssl: bool,
}

/// A notification list — a Cronitor "template" under `/v1/templates`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationList {
    /// Client-derived on create (see [`crate::cronitor::derive_list_key`]).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    pub name: String,
    pub notifications: Notifications,
}

/// The five unordered destination sets of a notification list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Notifications {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emails: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slack: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagerduty: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phones: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webhooks: Option<Vec<String>>,
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_create_response_deserializes() {
        let mon: Monitor = serde_json::from_str(r#"{"key":"abc123"}"#).unwrap();
        assert_eq!(mon.key.as_deref(), Some("abc123"));
        assert_eq!(mon.name, "");
        assert!(mon.request.is_none());
    }

    #[test]
    fn absent_tolerances_are_omitted_from_payload() {
        let mon = Monitor {
            name: "t".into(),
            failure_tolerance: None,
            grace_seconds: Some(0),
            ..Default::default()
        };
        let json = serde_json::to_value(&mon).unwrap();
        assert!(json.get("failure_tolerance").is_none());
        assert_eq!(json["grace_seconds"], 0);
    }

    #[test]
    fn request_bool_fields_default_to_true() {
        let req: MonitorRequest =
            serde_json::from_str(r#"{"url":"https://example.com","method":"GET"}"#).unwrap();
        assert!(req.follow_redirects);
        assert!(req.verify_ssl);
    }
}
