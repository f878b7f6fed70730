use serde::{Deserialize, Serialize};

/// Closed severity set reported by the detection engine.
///
/// The wire field is a free-form string; [`Severity::from_label`] folds any
/// unrecognized or absent label down to `Low` so new engine labels degrade
/// instead of breaking the render path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

impl Severity {
    pub fn from_label(label: Option<&str>) -> Self {
        match label {
            Some("CRITICAL") => Severity::Critical,
            Some("HIGH") => Severity::High,
            Some("MEDIUM") => Severity::Medium,
            _ => Severity::Low,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "CRITICAL",
            Severity::High => "HIGH",
            Severity::Medium => "MEDIUM",
            Severity::Low => "LOW",
        }
    }
}

/// Discrete classification of a numeric risk score.
///
/// Buckets partition [0, 100] with inclusive lower bounds:
/// `>=90` critical, `>=70` high, `>=40` medium, else low.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskBucket {
    Critical,
    High,
    Medium,
    Low,
}

impl RiskBucket {
    pub fn from_score(score: f64) -> Self {
        if score >= 90.0 {
            RiskBucket::Critical
        } else if score >= 70.0 {
            RiskBucket::High
        } else if score >= 40.0 {
            RiskBucket::Medium
        } else {
            RiskBucket::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskBucket::Critical => "critical",
            RiskBucket::High => "high",
            RiskBucket::Medium => "medium",
            RiskBucket::Low => "low",
        }
    }
}
