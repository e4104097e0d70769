use thiserror::Error;

/// A failed status cycle. Never shown to the user; logged and retried on the
/// next tick.
#[derive(Debug, Error)]
pub enum PollError {
    #[error("status request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("status request returned HTTP {status}")]
    Status { status: u16 },
    #[error("status body is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),
    /// For `FeederApi` implementations that do not speak HTTP.
    #[error("status source unavailable: {0}")]
    Unavailable(String),
}
