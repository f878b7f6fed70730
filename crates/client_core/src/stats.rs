//! Summary metrics over a set of analysis results.

use serde::Serialize;
use shared::protocol::AttackResponse;

/// Threshold on an individual threat's risk score above which it counts as
/// critical in the summary.
pub const CRITICAL_RISK_SCORE: f64 = 90.0;

/// Cross-cutting metrics derived from the current result set.
///
/// Always recomputed from the results; never cached alongside them, so the
/// summary cannot drift from what is displayed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub total_threats: u64,
    pub total_queries: u64,
    pub critical_threats: u64,
    /// Mean threat risk score rounded to the nearest integer; 0 when no
    /// threats were detected.
    pub avg_risk_score: u32,
}

/// Derives the summary in one pass over the threats flattened across all
/// results (result order, then threat order within each result). Counts
/// come from the flattened collection, never from the service's own
/// `threatsDetected` field, so nothing is double counted.
pub fn aggregate(results: &[AttackResponse]) -> Stats {
    let total_queries = results.iter().map(|result| result.queries_analyzed).sum();

    let mut total_threats = 0u64;
    let mut critical_threats = 0u64;
    let mut risk_sum = 0.0f64;
    for threat in results.iter().flat_map(|result| &result.threats) {
        total_threats += 1;
        if threat.risk_score >= CRITICAL_RISK_SCORE {
            critical_threats += 1;
        }
        risk_sum += threat.risk_score;
    }

    let avg_risk_score = if total_threats == 0 {
        0
    } else {
        (risk_sum / total_threats as f64).round() as u32
    };

    Stats {
        total_threats,
        total_queries,
        critical_threats,
        avg_risk_score,
    }
}
