use serde::{Deserialize, Serialize};

/// One analysis run's summary as returned by `POST /detection/analysis`.
///
/// The service serializes every field it has, but none are guaranteed: an
/// empty database produces `attackType="NONE"` with zero queries, and older
/// engine versions omit fields entirely. Everything defaults so a sparse
/// payload deserializes instead of failing the whole response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AttackResponse {
    pub attack_type: Option<String>,
    pub queries_analyzed: u64,
    /// Count reported by the service. Display only; aggregation recounts
    /// from `threats` so the two can never drift apart.
    pub threats_detected: u64,
    pub threats: Vec<Threat>,
    pub risk_score: f64,
    pub severity: Option<String>,
    pub recommendation: Option<String>,
    pub analysis_time_ms: u64,
    /// Epoch milliseconds.
    pub timestamp: Option<i64>,
}

/// A single detected malicious DNS behavior within an attack response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Threat {
    /// Free-form category string, e.g. `RANDOM_SUBDOMAIN_ATTACK`. Not a
    /// closed enum: new engine values must degrade gracefully downstream.
    #[serde(rename = "type")]
    pub kind: String,
    pub source_ip: String,
    pub description: String,
    pub risk_score: f64,
    /// Epoch milliseconds.
    pub timestamp: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_full_service_payload() {
        let raw = serde_json::json!({
            "attackType": "RANDOM_SUBDOMAIN_ATTACK",
            "queriesAnalyzed": 500,
            "threatsDetected": 1,
            "threats": [{
                "type": "RANDOM_SUBDOMAIN_ATTACK",
                "sourceIp": "10.0.0.66",
                "description": "High ratio of unique subdomains",
                "riskScore": 92,
                "timestamp": 1700000000000i64
            }],
            "riskScore": 92,
            "severity": "CRITICAL",
            "recommendation": "1. Enable rate limiting\n2. Block source",
            "analysisTimeMs": 41,
            "timestamp": 1700000000000i64
        });

        let response: AttackResponse = serde_json::from_value(raw).expect("deserialize");
        assert_eq!(response.attack_type.as_deref(), Some("RANDOM_SUBDOMAIN_ATTACK"));
        assert_eq!(response.queries_analyzed, 500);
        assert_eq!(response.threats.len(), 1);
        assert_eq!(response.threats[0].kind, "RANDOM_SUBDOMAIN_ATTACK");
        assert_eq!(response.threats[0].source_ip, "10.0.0.66");
        assert_eq!(response.threats[0].risk_score, 92.0);
    }

    #[test]
    fn sparse_payload_fills_defaults_instead_of_failing() {
        let response: AttackResponse =
            serde_json::from_value(serde_json::json!({ "queriesAnalyzed": 3 }))
                .expect("deserialize");
        assert_eq!(response.queries_analyzed, 3);
        assert!(response.threats.is_empty());
        assert!(response.attack_type.is_none());
        assert!(response.severity.is_none());
        assert_eq!(response.risk_score, 0.0);
    }
}
