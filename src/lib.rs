//! Vitrina library crate (used by the server binary and integration tests).
//!
//! Two-stage multimodal product search over an immutable catalog:
//!
//! 1. **Coarse retrieval** — cosine similarity between the query's
//!    joint-space vector(s) and every catalog row, fused by arithmetic mean
//!    for hybrid queries, narrowed to a fixed candidate pool.
//! 2. **Reranking** — modality-appropriate refinement: a batched
//!    cross-encoder score for text, visual-space cosine for images, and a
//!    fixed-weight fusion of both for hybrid queries.
//!
//! # Module map
//!
//! - [`catalog`] — catalog table + the two row-aligned embedding matrices
//! - [`encoder`] — query encoder adapter over the external embedding producers
//! - [`scoring`] — batched pairwise text scorer seam
//! - [`search`] — the retrieval/rerank/assembly core and its entry point
//! - [`gateway`] — HTTP surface and the chat intent orchestrator
//! - [`config`] — environment-backed server configuration
//!
//! Mock collaborators are available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod catalog;
pub mod config;
pub mod constants;
pub mod encoder;
pub mod gateway;
pub mod scoring;
pub mod search;

pub use catalog::{
    Catalog, CatalogError, CatalogItem, EmbeddingMatrix, FsCatalogStore, ProductId,
    cosine_similarity,
};
pub use config::{Config, ConfigError};
pub use constants::{DEFAULT_TOP_K, INITIAL_K};
pub use encoder::{
    EncoderAdapter, EncodingError, JointEncoder, Modality, QueryVectors, RemoteEncoder,
    RemoteEncoderConfig, VisualEncoder,
};
#[cfg(any(test, feature = "mock"))]
pub use encoder::{MockJointEncoder, MockVisualEncoder};
pub use scoring::{RemoteTextScorer, RemoteTextScorerConfig, ScoringError, TextPairScorer};
#[cfg(any(test, feature = "mock"))]
pub use scoring::MockTextScorer;
pub use search::{
    Candidate, CoarseRetriever, FusionWeights, RerankError, Reranker, ScoredCandidate,
    SearchEngine, SearchError, SearchHit, SearchQuery,
};
