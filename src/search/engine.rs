//! Request orchestration: encode → retrieve → rerank → assemble.

use std::sync::Arc;

use tracing::debug;

use crate::catalog::Catalog;
use crate::encoder::{
    EncoderAdapter, EncodingError, JointEncoder, Modality, QueryVectors, VisualEncoder,
};
use crate::scoring::TextPairScorer;

use super::assembler::{SearchHit, assemble};
use super::error::SearchError;
use super::query::SearchQuery;
use super::reranker::{FusionWeights, Reranker};
use super::retriever::CoarseRetriever;

/// The two-stage search pipeline over one catalog.
///
/// Collaborators are injected, so the engine is testable with stub encoders
/// and scorers. All state is read-only after construction; an engine behind
/// an `Arc` serves concurrent requests without locking.
#[derive(Debug)]
pub struct SearchEngine<J, V, S> {
    catalog: Arc<Catalog>,
    encoder: EncoderAdapter<J, V>,
    retriever: CoarseRetriever,
    reranker: Reranker<S>,
}

impl<J, V, S> SearchEngine<J, V, S>
where
    J: JointEncoder,
    V: VisualEncoder,
    S: TextPairScorer,
{
    pub fn new(catalog: Arc<Catalog>, encoder: EncoderAdapter<J, V>, scorer: S) -> Self {
        Self {
            catalog,
            encoder,
            retriever: CoarseRetriever::default(),
            reranker: Reranker::new(scorer),
        }
    }

    /// Overrides the hybrid fusion split (defaults to the configured
    /// 0.5/0.5 constants).
    pub fn with_fusion_weights(
        catalog: Arc<Catalog>,
        encoder: EncoderAdapter<J, V>,
        scorer: S,
        weights: FusionWeights,
    ) -> Self {
        Self {
            catalog,
            encoder,
            retriever: CoarseRetriever::default(),
            reranker: Reranker::with_weights(scorer, weights),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Ranks the catalog against a query given as optional parts.
    ///
    /// The entry point consumed by the gateway: omitting both parts is an
    /// invalid query, `top_k` bounds the output length.
    pub async fn search(
        &self,
        text: Option<&str>,
        image: Option<&[u8]>,
        top_k: usize,
    ) -> Result<Vec<SearchHit>, SearchError> {
        let query = SearchQuery::from_parts(text.map(str::to_string), image.map(<[u8]>::to_vec))?;
        self.run(&query, top_k).await
    }

    /// Runs the pipeline for an already-validated query.
    pub async fn run(
        &self,
        query: &SearchQuery,
        top_k: usize,
    ) -> Result<Vec<SearchHit>, SearchError> {
        let vectors = self.encoder.encode(query).await?;
        self.check_dimensions(&vectors)?;

        let candidates = self.retriever.retrieve(&vectors, &self.catalog);

        debug!(
            modality = query.modality_label(),
            candidates = candidates.len(),
            top_k,
            "Candidates retrieved, entering rerank"
        );

        let scored = self
            .reranker
            .rerank(query, &vectors, candidates, &self.catalog)
            .await?;

        Ok(assemble(scored, top_k, &self.catalog))
    }

    /// Rejects query vectors whose dimensions disagree with the catalog
    /// before any similarity work runs.
    fn check_dimensions(&self, vectors: &QueryVectors) -> Result<(), EncodingError> {
        let joint_dim = self.catalog.joint_dim();
        let visual_dim = self.catalog.visual_dim();

        if let Some(v) = &vectors.joint_text
            && v.len() != joint_dim
        {
            return Err(EncodingError::InvalidDimension {
                modality: Modality::Text,
                expected: joint_dim,
                actual: v.len(),
            });
        }

        if let Some(v) = &vectors.joint_image
            && v.len() != joint_dim
        {
            return Err(EncodingError::InvalidDimension {
                modality: Modality::Image,
                expected: joint_dim,
                actual: v.len(),
            });
        }

        if let Some(v) = &vectors.visual
            && v.len() != visual_dim
        {
            return Err(EncodingError::InvalidDimension {
                modality: Modality::Image,
                expected: visual_dim,
                actual: v.len(),
            });
        }

        Ok(())
    }
}
