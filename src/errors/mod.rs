//! Unified client error type.

use reqwest::StatusCode;

/// Errors raised by the dashboard client.
///
/// Authentication problems on protected routes never reach this type: the
/// guard reports them as "unauthenticated" and the route protector redirects.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("No access credential in session")]
    MissingCredential,

    #[error("Request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Request to {endpoint} returned status {status}")]
    Status { endpoint: String, status: StatusCode },

    #[error("Invalid response from {endpoint}: {message}")]
    Decode { endpoint: String, message: String },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Session storage error: {0}")]
    Storage(String),

    #[error("Refresh cancelled")]
    Cancelled,
}

impl ClientError {
    /// Check if this error means the backend rejected or never got a credential.
    pub fn is_unauthorized(&self) -> bool {
        match self {
            Self::MissingCredential => true,
            Self::Status { status, .. } => {
                *status == StatusCode::UNAUTHORIZED || *status == StatusCode::FORBIDDEN
            }
            _ => false,
        }
    }

    /// Check if the refresh was abandoned because its view went away.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}
