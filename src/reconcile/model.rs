//! Declared/observed resource model.
//!
//! The convergence engine declares resources in these shapes; `wire` converts
//! them to and from the API's format. Fields shared by both monitor kinds
//! live directly on [`MonitorSpec`], kind-specific fields hang off the
//! [`MonitorKind`] sum type — composition plus an explicit kind tag rather
//! than embedding.
//!
//! Optional numeric fields are `Option<i32>`: absent means "not declared",
//! which is different from an explicit zero and must stay different through
//! every mapping.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::ValidationError;

/// A declared or observed monitor of either kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MonitorSpec {
    /// Service-assigned on first create; immutable and the sole identifier
    /// afterwards.
    pub key: Option<String>,
    pub name: String,
    pub disabled: bool,
    pub paused: bool,
    pub schedule: Option<String>,
    /// Unordered set. Defaults to `["default"]` on create.
    pub notify: Option<Vec<String>>,
    /// Unordered set.
    pub tags: Option<Vec<String>>,
    /// Unordered set. Defaults to `["production"]` on create.
    pub environments: Option<Vec<String>>,
    /// Defaults to `"every 8 hours"` on create.
    pub realert_interval: Option<String>,
    pub failure_tolerance: Option<i32>,
    pub grace_seconds: Option<i32>,
    pub schedule_tolerance: Option<i32>,
    pub timezone: Option<String>,
    pub group: Option<String>,
    pub kind: MonitorKind,
}

/// Kind discriminator plus kind-specific attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MonitorKind {
    Http(HttpCheck),
    Heartbeat(Heartbeat),
}

impl Default for MonitorKind {
    fn default() -> Self {
        MonitorKind::Heartbeat(Heartbeat::default())
    }
}

/// Attributes of an HTTP-check monitor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HttpCheck {
    pub url: String,
    pub method: String,
    /// Keys must be lower-case (see [`MonitorSpec::validate`]).
    pub headers: Option<BTreeMap<String, String>>,
    pub cookies: Option<BTreeMap<String, String>>,
    pub body: Option<String>,
    /// Defaults to 5 on create.
    pub timeout_seconds: Option<i32>,
    /// Unordered set.
    pub regions: Option<Vec<String>>,
    /// Defaults to true on the wire when not declared.
    pub follow_redirects: Option<bool>,
    /// Defaults to true on the wire when not declared.
    pub verify_ssl: Option<bool>,
    /// Unordered set.
    pub assertions: Option<Vec<String>>,
}

/// Attributes of a heartbeat monitor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Heartbeat {
    /// Ping URL derived locally from the account key and the monitor key.
    /// Sensitive, never sent to the service, recomputed on every read.
    pub telemetry_url: Option<String>,
}

impl MonitorSpec {
    /// Client-side checks performed before any create/update round trip.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let MonitorKind::Http(http) = &self.kind {
            if let Some(headers) = &http.headers {
                for key in headers.keys() {
                    if *key != key.to_lowercase() {
                        return Err(ValidationError::UppercaseHeaderKey { key: key.clone() });
                    }
                }
            }
            if let Some(cookies) = &http.cookies {
                for key in cookies.keys() {
                    if *key != key.to_lowercase() {
                        return Err(ValidationError::UppercaseCookieKey { key: key.clone() });
                    }
                }
            }
        }
        Ok(())
    }
}

/// A declared or observed notification list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListSpec {
    /// Client-derived on create (lower-cased name plus random suffix),
    /// immutable afterwards.
    pub key: Option<String>,
    pub name: String,
    /// Five unordered destination sets.
    pub emails: Option<Vec<String>>,
    pub slack: Option<Vec<String>>,
    pub pagerduty: Option<Vec<String>>,
    pub phones: Option<Vec<String>>,
    pub webhooks: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn http_spec_with_headers(headers: &[(&str, &str)]) -> MonitorSpec {
        MonitorSpec {
            name: "Example".into(),
            kind: MonitorKind::Http(HttpCheck {
                url: "https://example.com".into(),
                method: "GET".into(),
                headers: Some(
                    headers
                        .iter()
                        .map(|(k, v)| (k.to_string(), v.to_string()))
                        .collect(),
                ),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    #[test]
    fn lowercase_header_keys_pass_validation() {
        let spec = http_spec_with_headers(&[("x-api-key", "abc"), ("accept", "text/html")]);
        assert!(spec.validate().is_ok());
    }

    #[test]
    fn uppercase_header_key_is_rejected() {
        let spec = http_spec_with_headers(&[("X-Api-Key", "abc")]);
        assert_eq!(
            spec.validate(),
            Err(ValidationError::UppercaseHeaderKey {
                key: "X-Api-Key".into()
            })
        );
    }

    #[test]
    fn uppercase_cookie_key_is_rejected() {
        let mut spec = http_spec_with_headers(&[]);
        if let MonitorKind::Http(http) = &mut spec.kind {
            http.headers = None;
            http.cookies = Some(
                [("Session".to_string(), "tok".to_string())]
                    .into_iter()
                    .collect(),
            );
        }
        assert_eq!(
            spec.validate(),
            Err(ValidationError::UppercaseCookieKey {
                key: "Session".into()
            })
        );
    }

    #[test]
    fn heartbeat_specs_have_nothing_to_validate() {
        let spec = MonitorSpec {
            name: "hb".into(),
            kind: MonitorKind::Heartbeat(Heartbeat::default()),
            ..Default::default()
        };
        assert!(spec.validate().is_ok());
    }
}
