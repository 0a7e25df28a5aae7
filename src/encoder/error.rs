use thiserror::Error;

/// Input modality an encoding operation ran on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modality {
    Text,
    Image,
}

impl std::fmt::Display for Modality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Modality::Text => write!(f, "text"),
            Modality::Image => write!(f, "image"),
        }
    }
}

#[derive(Debug, Error)]
pub enum EncodingError {
    #[error("{modality} encoding failed: {reason}")]
    Failed { modality: Modality, reason: String },

    #[error("{modality} encoder unreachable at {url}: {reason}")]
    Unreachable {
        modality: Modality,
        url: String,
        reason: String,
    },

    #[error("{modality} encoder returned a {actual}-dim vector, expected {expected}")]
    InvalidDimension {
        modality: Modality,
        expected: usize,
        actual: usize,
    },

    #[error("invalid {modality} encoder response: {reason}")]
    InvalidResponse { modality: Modality, reason: String },

    #[error("failed to build encoder client: {reason}")]
    ClientBuild { reason: String },
}

impl EncodingError {
    /// The failing modality, when one is identifiable.
    pub fn modality(&self) -> Option<Modality> {
        match self {
            EncodingError::Failed { modality, .. }
            | EncodingError::Unreachable { modality, .. }
            | EncodingError::InvalidDimension { modality, .. }
            | EncodingError::InvalidResponse { modality, .. } => Some(*modality),
            EncodingError::ClientBuild { .. } => None,
        }
    }
}
