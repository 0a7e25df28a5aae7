use thiserror::Error;

use crate::catalog::ProductId;
use crate::encoder::EncodingError;
use crate::scoring::ScoringError;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("invalid query: {reason}")]
    InvalidQuery { reason: String },

    #[error(transparent)]
    Encoding(#[from] EncodingError),

    #[error("rerank failed: {0}")]
    Rerank(#[from] RerankError),
}

/// Failure of the second stage. The whole request fails: mixing coarse and
/// rerank scores in one ordering would compare incompatible scales.
#[derive(Debug, Error)]
pub enum RerankError {
    #[error("text scorer failed: {0}")]
    Scorer(#[from] ScoringError),

    #[error("text scorer returned {actual} scores for {expected} candidates")]
    ScoreCountMismatch { expected: usize, actual: usize },

    #[error("product {id} has no visual-space row")]
    MissingVisualRow { id: ProductId },

    #[error("query visual vector absent for image-modality rerank")]
    MissingQueryVector,
}
