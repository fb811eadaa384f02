use thiserror::Error;

use crate::record::ResourceKind;

/// Errors from a single outbound call, classified for the retry policy.
///
/// SECURITY: Error messages must NEVER contain sensitive data like API
/// tokens or key material.
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP 401/403. Fatal to the whole run since credentials are shared.
    #[error("authentication rejected ({status})")]
    AuthRejected { status: u16 },

    /// HTTP 400/405. The endpoint is not available for this account or
    /// plan; the resource kind is skipped, never retried.
    #[error("endpoint unavailable ({status})")]
    Unavailable { status: u16 },

    /// Network-level failure, HTTP 429 or 5xx. Retried per policy.
    #[error("transient error: {message}")]
    Transient {
        status: Option<u16>,
        message: String,
    },

    /// The API envelope reported `success: false`.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("failed to decode response: {0}")]
    Decode(String),

    /// A job was handed a scope its fetcher cannot use.
    #[error("job scope does not match resource kind {kind}")]
    Scope { kind: ResourceKind },

    #[error("deadline exceeded")]
    Timeout,
}

impl FetchError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, FetchError::Transient { .. })
    }

    pub fn is_fatal(&self) -> bool {
        matches!(self, FetchError::AuthRejected { .. })
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Transient {
            status: err.status().map(|s| s.as_u16()),
            message: err.to_string(),
        }
    }
}
