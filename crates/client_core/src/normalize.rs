//! Reconciles the detection service's variable response shapes into a
//! uniform sequence of attack responses.

use serde_json::Value;
use shared::protocol::AttackResponse;

/// The analysis endpoint has returned both a bare `AttackResponse` object
/// and an array of them across service versions. `null` means no data.
/// Every other shape is decoded as a single response, so scalar bodies
/// surface as payload errors instead of silently becoming empty results.
pub fn normalize(raw: Value) -> Result<Vec<AttackResponse>, serde_json::Error> {
    match raw {
        Value::Null => Ok(Vec::new()),
        Value::Array(_) => serde_json::from_value(raw),
        _ => serde_json::from_value::<AttackResponse>(raw).map(|response| vec![response]),
    }
}
