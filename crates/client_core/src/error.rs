use thiserror::Error;

/// Failure talking to the detection service or decoding what it returned.
#[derive(Debug, Error)]
pub enum DetectionApiError {
    /// Network failure or non-2xx HTTP status.
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
    /// 2xx response whose body does not match the analysis contract.
    #[error("invalid analysis payload: {0}")]
    Payload(#[from] serde_json::Error),
}
