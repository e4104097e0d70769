use thiserror::Error;

/// Why a user-issued command did not go through.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// Rejected locally, no request was sent.
    #[error("{0}")]
    Validation(String),
    /// The device answered with a non-success status.
    #[error("device rejected command with status {status}: {body}")]
    Rejected { status: u16, body: String },
    /// The request never produced a response.
    #[error("network error: {0}")]
    Network(String),
}

impl CommandError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_))
    }
}
