use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("text scorer unreachable at {url}: {reason}")]
    Unreachable { url: String, reason: String },

    #[error("text scorer rejected batch: {reason}")]
    Failed { reason: String },

    #[error("invalid scorer response: {reason}")]
    InvalidResponse { reason: String },

    #[error("failed to build scorer client: {reason}")]
    ClientBuild { reason: String },
}
