//! Pure presentation mapping from analysis data to display primitives.
//!
//! Nothing here touches workflow state; every function is total over its
//! input so unrecognized engine values render with safe defaults.

use chrono::{Local, TimeZone};
use shared::domain::{RiskBucket, Severity};

/// Ordered substring markers for icon classification. A type string may
/// contain several markers; the first listed match wins.
const ICON_MARKERS: &[(&str, &str)] = &[
    ("RANDOM_SUBDOMAIN", "fa-random"),
    ("NXDOMAIN", "fa-exclamation-triangle"),
    ("FLOODING", "fa-wave-square"),
    ("AMPLIFICATION", "fa-broadcast-tower"),
    ("EXFILTRATION", "fa-file-export"),
    ("TUNNELING", "fa-file-export"),
];

const GENERIC_THREAT_ICON: &str = "fa-shield-alt";

/// Classifies a numeric risk score into its display bucket.
pub fn risk_bucket(score: f64) -> RiskBucket {
    RiskBucket::from_score(score)
}

/// Maps a raw severity label to its display class, defaulting unknown and
/// absent labels to `Low`.
pub fn severity_class(label: Option<&str>) -> Severity {
    Severity::from_label(label)
}

/// Picks an icon identifier for a threat-type string.
pub fn threat_icon(kind: &str) -> &'static str {
    ICON_MARKERS
        .iter()
        .find(|(marker, _)| kind.contains(marker))
        .map(|(_, icon)| *icon)
        .unwrap_or(GENERIC_THREAT_ICON)
}

/// Turns `RANDOM_SUBDOMAIN_ATTACK` into `Random Subdomain Attack`.
pub fn format_threat_type(kind: &str) -> String {
    kind.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Renders an epoch-millisecond timestamp in local time. Values chrono
/// cannot represent fall back to the raw number rather than panicking.
pub fn format_timestamp(timestamp_ms: i64) -> String {
    Local
        .timestamp_millis_opt(timestamp_ms)
        .earliest()
        .map(|instant| instant.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| timestamp_ms.to_string())
}
