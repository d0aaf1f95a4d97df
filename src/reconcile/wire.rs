//! Declared-model ↔ wire-format mapping and post-fetch normalization.
//!
//! `monitor_to_wire` stamps the kind discriminator constants and drops
//! anything the service must never see (the derived telemetry URL). The
//! `*_from_wire` functions rebuild the declared shape from a fetched
//! representation; heartbeat monitors get their telemetry URL recomputed
//! locally by the caller and passed in.
//!
//! `normalize_monitor` / `normalize_list` run the order fix over every
//! unordered field of the type in one place, so adding a new unordered
//! attribute means touching exactly one function instead of every call site.

use crate::cronitor::types::{
    Monitor, MonitorRequest, NotificationList, Notifications, PLATFORM_HTTP, PLATFORM_LINUX,
    TYPE_CHECK, TYPE_HEARTBEAT,
};

use super::model::{Heartbeat, HttpCheck, ListSpec, MonitorKind, MonitorSpec};
use super::order::reorder_to_match;

/// Map a declared monitor to the request the API expects.
pub fn monitor_to_wire(spec: &MonitorSpec) -> Monitor {
    let mut out = Monitor {
        key: spec.key.clone(),
        name: spec.name.clone(),
        disabled: spec.disabled,
        paused: spec.paused,
        schedule: spec.schedule.clone(),
        notify: spec.notify.clone(),
        tags: spec.tags.clone(),
        environments: spec.environments.clone(),
        realert_interval: spec.realert_interval.clone(),
        failure_tolerance: spec.failure_tolerance,
        grace_seconds: spec.grace_seconds,
        schedule_tolerance: spec.schedule_tolerance,
        timezone: spec.timezone.clone(),
        group: spec.group.clone(),
        ..Default::default()
    };

    match &spec.kind {
        MonitorKind::Http(http) => {
            out.kind = TYPE_CHECK.to_string();
            out.platform = PLATFORM_HTTP.to_string();
            out.assertions = http.assertions.clone();
            out.request = Some(MonitorRequest {
                url: http.url.clone(),
                method: http.method.clone(),
                headers: http.headers.clone(),
                cookies: http.cookies.clone(),
                body: http.body.clone(),
                timeout_seconds: http.timeout_seconds,
                regions: http.regions.clone(),
                follow_redirects: http.follow_redirects.unwrap_or(true),
                verify_ssl: http.verify_ssl.unwrap_or(true),
            });
        }
        MonitorKind::Heartbeat(_) => {
            // The telemetry url is derived locally and never sent.
            out.kind = TYPE_HEARTBEAT.to_string();
            out.platform = PLATFORM_LINUX.to_string();
        }
    }

    out
}

/// Rebuild an HTTP-check spec from a fetched monitor.
pub fn http_from_wire(mon: &Monitor) -> MonitorSpec {
    let request = mon.request.clone().unwrap_or_default();
    MonitorSpec {
        kind: MonitorKind::Http(HttpCheck {
            url: request.url,
            method: request.method,
            headers: request.headers,
            cookies: request.cookies,
            body: request.body,
            timeout_seconds: request.timeout_seconds,
            regions: request.regions,
            follow_redirects: Some(request.follow_redirects),
            verify_ssl: Some(request.verify_ssl),
            assertions: mon.assertions.clone(),
        }),
        ..base_from_wire(mon)
    }
}

/// Rebuild a heartbeat spec from a fetched monitor. `telemetry_url` comes
/// from [`crate::cronitor::Client::telemetry_url`] — it is not part of the
/// response and is recomputed on every read.
pub fn heartbeat_from_wire(mon: &Monitor, telemetry_url: String) -> MonitorSpec {
    MonitorSpec {
        kind: MonitorKind::Heartbeat(Heartbeat {
            telemetry_url: Some(telemetry_url),
        }),
        ..base_from_wire(mon)
    }
}

fn base_from_wire(mon: &Monitor) -> MonitorSpec {
    MonitorSpec {
        key: mon.key.clone(),
        name: mon.name.clone(),
        disabled: mon.disabled,
        paused: mon.paused,
        schedule: mon.schedule.clone(),
        notify: mon.notify.clone(),
        tags: mon.tags.clone(),
        environments: mon.environments.clone(),
        realert_interval: mon.realert_interval.clone(),
        failure_tolerance: mon.failure_tolerance,
        grace_seconds: mon.grace_seconds,
        schedule_tolerance: mon.schedule_tolerance,
        timezone: mon.timezone.clone(),
        group: mon.group.clone(),
        kind: MonitorKind::default(),
    }
}

/// Map a declared notification list to the request the API expects.
pub fn list_to_wire(spec: &ListSpec) -> NotificationList {
    NotificationList {
        key: spec.key.clone(),
        name: spec.name.clone(),
        notifications: Notifications {
            emails: spec.emails.clone(),
            slack: spec.slack.clone(),
            pagerduty: spec.pagerduty.clone(),
            phones: spec.phones.clone(),
            webhooks: spec.webhooks.clone(),
        },
    }
}

/// Rebuild a notification-list spec from a fetched representation.
pub fn list_from_wire(list: &NotificationList) -> ListSpec {
    ListSpec {
        key: list.key.clone(),
        name: list.name.clone(),
        emails: list.notifications.emails.clone(),
        slack: list.notifications.slack.clone(),
        pagerduty: list.notifications.pagerduty.clone(),
        phones: list.notifications.phones.clone(),
        webhooks: list.notifications.webhooks.clone(),
    }
}

/// Apply the order fix to every unordered collection of a monitor, using the
/// just-declared spec as the reference order. Run this on each spec that
/// comes back from get/create/update, before it reaches the diff engine.
/// Header and cookie maps are `BTreeMap`s, ordered by key, and need no fix.
pub fn normalize_monitor(declared: &MonitorSpec, mut observed: MonitorSpec) -> MonitorSpec {
    observed.notify = reorder_to_match(declared.notify.as_deref(), observed.notify);
    observed.tags = reorder_to_match(declared.tags.as_deref(), observed.tags);
    observed.environments =
        reorder_to_match(declared.environments.as_deref(), observed.environments);

    if let (MonitorKind::Http(decl), MonitorKind::Http(obs)) =
        (&declared.kind, &mut observed.kind)
    {
        obs.assertions = reorder_to_match(decl.assertions.as_deref(), obs.assertions.take());
        obs.regions = reorder_to_match(decl.regions.as_deref(), obs.regions.take());
    }

    observed
}

/// [`normalize_monitor`] for notification lists: all five destination sets.
pub fn normalize_list(declared: &ListSpec, mut observed: ListSpec) -> ListSpec {
    observed.emails = reorder_to_match(declared.emails.as_deref(), observed.emails);
    observed.slack = reorder_to_match(declared.slack.as_deref(), observed.slack);
    observed.pagerduty = reorder_to_match(declared.pagerduty.as_deref(), observed.pagerduty);
    observed.phones = reorder_to_match(declared.phones.as_deref(), observed.phones);
    observed.webhooks = reorder_to_match(declared.webhooks.as_deref(), observed.webhooks);
    observed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn http_spec() -> MonitorSpec {
        MonitorSpec {
            name: "Example".into(),
            schedule: Some("every 5 minutes".into()),
            kind: MonitorKind::Http(HttpCheck {
                url: "https://example.com".into(),
                method: "GET".into(),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    #[test]
    fn http_spec_gets_check_discriminators() {
        let wire = monitor_to_wire(&http_spec());
        assert_eq!(wire.kind, "check");
        assert_eq!(wire.platform, "http");
        assert!(wire.request.is_some());
    }

    #[test]
    fn heartbeat_spec_gets_heartbeat_discriminators_and_no_request() {
        let spec = MonitorSpec {
            name: "hb".into(),
            kind: MonitorKind::Heartbeat(Heartbeat {
                telemetry_url: Some("https://cronitor.link/p/k/abc".into()),
            }),
            ..Default::default()
        };
        let wire = monitor_to_wire(&spec);
        assert_eq!(wire.kind, "heartbeat");
        assert_eq!(wire.platform, "linux");
        assert!(wire.request.is_none());

        // The derived url must not leak into the payload anywhere.
        let payload = serde_json::to_string(&wire).unwrap();
        assert!(!payload.contains("cronitor.link"));
        assert!(!payload.contains("telemetry"));
    }

    #[test]
    fn absent_tolerances_round_trip_as_absent() {
        let spec = http_spec();
        assert_eq!(spec.failure_tolerance, None);

        let wire = monitor_to_wire(&spec);
        let payload = serde_json::to_value(&wire).unwrap();
        assert!(payload.get("failure_tolerance").is_none());
        assert!(payload.get("grace_seconds").is_none());
        assert!(payload.get("schedule_tolerance").is_none());

        let fetched: Monitor = serde_json::from_value(payload).unwrap();
        let back = http_from_wire(&fetched);
        assert_eq!(back.failure_tolerance, None);
        assert_eq!(back.grace_seconds, None);
        assert_eq!(back.schedule_tolerance, None);
    }

    #[test]
    fn zero_tolerances_round_trip_as_zero() {
        let mut spec = http_spec();
        spec.failure_tolerance = Some(0);
        spec.grace_seconds = Some(0);

        let wire = monitor_to_wire(&spec);
        let payload = serde_json::to_value(&wire).unwrap();
        assert_eq!(payload["failure_tolerance"], 0);
        assert_eq!(payload["grace_seconds"], 0);

        let fetched: Monitor = serde_json::from_value(payload).unwrap();
        let back = http_from_wire(&fetched);
        assert_eq!(back.failure_tolerance, Some(0));
        assert_eq!(back.grace_seconds, Some(0));
    }

    #[test]
    fn undeclared_redirect_and_ssl_flags_default_true_on_the_wire() {
        let wire = monitor_to_wire(&http_spec());
        let request = wire.request.unwrap();
        assert!(request.follow_redirects);
        assert!(request.verify_ssl);
    }

    #[test]
    fn declared_false_flags_survive_mapping() {
        let mut spec = http_spec();
        if let MonitorKind::Http(http) = &mut spec.kind {
            http.follow_redirects = Some(false);
            http.verify_ssl = Some(false);
        }
        let request = monitor_to_wire(&spec).request.unwrap();
        assert!(!request.follow_redirects);
        assert!(!request.verify_ssl);
    }

    #[test]
    fn heartbeat_read_back_recomputes_telemetry_url() {
        let mon = Monitor {
            key: Some("abc123".into()),
            name: "hb".into(),
            kind: "heartbeat".into(),
            platform: "linux".into(),
            ..Default::default()
        };
        let spec = heartbeat_from_wire(&mon, "https://cronitor.link/p/key/abc123".into());
        assert_eq!(
            spec.kind,
            MonitorKind::Heartbeat(Heartbeat {
                telemetry_url: Some("https://cronitor.link/p/key/abc123".into())
            })
        );
        assert_eq!(spec.key.as_deref(), Some("abc123"));
    }

    #[test]
    fn normalize_fixes_every_unordered_monitor_field() {
        let mut declared = http_spec();
        declared.notify = Some(vec!["a".into(), "b".into()]);
        declared.tags = Some(vec!["t1".into(), "t2".into()]);
        declared.environments = Some(vec!["production".into(), "staging".into()]);
        if let MonitorKind::Http(http) = &mut declared.kind {
            http.regions = Some(vec!["eu".into(), "us".into()]);
            http.assertions = Some(vec!["response.code = 200".into(), "response.time < 1s".into()]);
        }

        let mut observed = declared.clone();
        observed.notify = Some(vec!["b".into(), "a".into()]);
        observed.tags = Some(vec!["t2".into(), "t1".into()]);
        observed.environments = Some(vec!["staging".into(), "production".into()]);
        if let MonitorKind::Http(http) = &mut observed.kind {
            http.regions = Some(vec!["us".into(), "eu".into()]);
            http.assertions =
                Some(vec!["response.time < 1s".into(), "response.code = 200".into()]);
        }

        let normalized = normalize_monitor(&declared, observed);
        assert_eq!(normalized, declared);
    }

    #[test]
    fn normalize_keeps_genuine_monitor_differences() {
        let mut declared = http_spec();
        declared.tags = Some(vec!["t1".into(), "t2".into()]);

        let mut observed = declared.clone();
        observed.tags = Some(vec!["t2".into(), "t3".into()]);

        let normalized = normalize_monitor(&declared, observed.clone());
        assert_eq!(normalized.tags, observed.tags);
    }

    #[test]
    fn normalize_list_covers_all_destination_sets() {
        let declared = ListSpec {
            name: "oncall".into(),
            key: Some("oncall-1a2b3c".into()),
            emails: Some(vec!["a@x.io".into(), "b@x.io".into()]),
            slack: Some(vec!["#alerts".into(), "#ops".into()]),
            pagerduty: Some(vec!["svc1".into(), "svc2".into()]),
            phones: Some(vec!["+441".into(), "+442".into()]),
            webhooks: Some(vec!["https://x.io/h1".into(), "https://x.io/h2".into()]),
        };

        let observed = ListSpec {
            emails: Some(vec!["b@x.io".into(), "a@x.io".into()]),
            slack: Some(vec!["#ops".into(), "#alerts".into()]),
            pagerduty: Some(vec!["svc2".into(), "svc1".into()]),
            phones: Some(vec!["+442".into(), "+441".into()]),
            webhooks: Some(vec!["https://x.io/h2".into(), "https://x.io/h1".into()]),
            ..declared.clone()
        };

        assert_eq!(normalize_list(&declared, observed), declared);
    }

    #[test]
    fn list_round_trips_through_the_wire_shape() {
        let spec = ListSpec {
            name: "oncall".into(),
            key: Some("oncall-1a2b3c".into()),
            emails: Some(vec!["a@x.io".into()]),
            ..Default::default()
        };
        let back = list_from_wire(&list_to_wire(&spec));
        assert_eq!(back, spec);
    }
}
