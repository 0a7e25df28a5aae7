//! Pairwise text relevance scoring.
//!
//! The reranker treats the cross-encoder as an opaque oracle behind
//! [`TextPairScorer`]: one batched call per request, scoring the query text
//! against every candidate description. [`RemoteTextScorer`] talks to a
//! scoring sidecar; a deterministic mock lives in [`mock`].

pub mod error;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod remote;


pub use error::ScoringError;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockTextScorer;
pub use remote::{RemoteTextScorer, RemoteTextScorerConfig};

use std::future::Future;

/// Batched (query, description) relevance oracle.
///
/// Implementations must return exactly one score per description, in input
/// order. The whole batch succeeds or the whole batch fails; partial score
/// sets are not representable.
pub trait TextPairScorer: Send + Sync {
    fn score_batch(
        &self,
        query: &str,
        descriptions: &[String],
    ) -> impl Future<Output = Result<Vec<f32>, ScoringError>> + Send;
}
