use thiserror::Error;

/// Run-fatal errors. Everything else is contained at the fetcher boundary
/// and downgraded to a per-resource status.
#[derive(Debug, Error)]
pub enum AgentError {
    #[error("invalid credential configuration: {0}")]
    AuthConfig(String),

    #[error("authentication rejected: {0}")]
    AuthRejected(String),

    #[error("discovery failed: {0}")]
    Discovery(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
