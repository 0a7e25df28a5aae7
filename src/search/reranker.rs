//! Second stage: modality-appropriate refinement of the candidate pool.
//!
//! One fusion policy per query modality:
//!
//! | modality     | rerank score                                        |
//! |--------------|-----------------------------------------------------|
//! | text         | cross-encoder score                                 |
//! | image        | visual-space cosine                                 |
//! | text + image | `text_weight * text + visual_weight * visual`       |
//!
//! Visual vectors are resolved by product identifier, never by the
//! coarse-stage row index: that index is only meaningful inside the joint
//! space.

use tracing::debug;

use crate::catalog::{Catalog, cosine_similarity};
use crate::constants::{DEFAULT_TEXT_WEIGHT, DEFAULT_VISUAL_WEIGHT};
use crate::encoder::QueryVectors;
use crate::scoring::TextPairScorer;

use super::error::RerankError;
use super::query::SearchQuery;
use super::retriever::Candidate;

/// Named hybrid-fusion split. One configuration, applied at every call
/// site that fuses text and visual scores.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FusionWeights {
    pub text: f32,
    pub visual: f32,
}

impl Default for FusionWeights {
    fn default() -> Self {
        Self {
            text: DEFAULT_TEXT_WEIGHT,
            visual: DEFAULT_VISUAL_WEIGHT,
        }
    }
}

impl FusionWeights {
    pub fn new(text: f32, visual: f32) -> Self {
        let weights = Self { text, visual };
        weights
            .validate()
            .unwrap_or_else(|msg| panic!("invalid fusion weights: {msg}"));
        weights
    }

    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.text) || !(0.0..=1.0).contains(&self.visual) {
            return Err(format!(
                "weights must lie in [0, 1], got text={} visual={}",
                self.text, self.visual
            ));
        }

        if (self.text + self.visual - 1.0).abs() > 1e-6 {
            return Err(format!(
                "weights must sum to 1.0, got {}",
                self.text + self.visual
            ));
        }

        Ok(())
    }
}

/// A candidate with its refined second-stage score.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCandidate {
    pub row: usize,
    pub coarse_score: f32,
    pub rerank_score: f32,
}

/// Second-stage scorer over a coarse candidate pool.
#[derive(Debug, Clone)]
pub struct Reranker<S> {
    scorer: S,
    weights: FusionWeights,
}

impl<S: TextPairScorer> Reranker<S> {
    pub fn new(scorer: S) -> Self {
        Self {
            scorer,
            weights: FusionWeights::default(),
        }
    }

    pub fn with_weights(scorer: S, weights: FusionWeights) -> Self {
        Self { scorer, weights }
    }

    pub fn weights(&self) -> FusionWeights {
        self.weights
    }

    /// Scores every candidate with the fusion policy for `query`'s modality.
    ///
    /// Fails the whole pool on any scorer or lookup problem; no candidate is
    /// ever left carrying a coarse-scale score next to reranked ones.
    pub async fn rerank(
        &self,
        query: &SearchQuery,
        vectors: &QueryVectors,
        candidates: Vec<Candidate>,
        catalog: &Catalog,
    ) -> Result<Vec<ScoredCandidate>, RerankError> {
        if candidates.is_empty() {
            return Ok(Vec::new());
        }

        let scored = match query {
            SearchQuery::Text(text) => {
                let text_scores = self.text_scores(text, &candidates, catalog).await?;

                candidates
                    .into_iter()
                    .zip(text_scores)
                    .map(|(candidate, text_score)| ScoredCandidate {
                        row: candidate.row,
                        coarse_score: candidate.coarse_score,
                        rerank_score: text_score,
                    })
                    .collect()
            }

            SearchQuery::Image(_) => {
                let query_visual = vectors
                    .visual
                    .as_deref()
                    .ok_or(RerankError::MissingQueryVector)?;

                candidates
                    .into_iter()
                    .map(|candidate| {
                        let visual_score = visual_score(query_visual, &candidate, catalog)?;
                        Ok(ScoredCandidate {
                            row: candidate.row,
                            coarse_score: candidate.coarse_score,
                            rerank_score: visual_score,
                        })
                    })
                    .collect::<Result<Vec<_>, RerankError>>()?
            }

            SearchQuery::TextImage { text, .. } => {
                let text_scores = self.text_scores(text, &candidates, catalog).await?;
                let query_visual = vectors
                    .visual
                    .as_deref()
                    .ok_or(RerankError::MissingQueryVector)?;

                candidates
                    .into_iter()
                    .zip(text_scores)
                    .map(|(candidate, text_score)| {
                        let visual_score = visual_score(query_visual, &candidate, catalog)?;
                        Ok(ScoredCandidate {
                            row: candidate.row,
                            coarse_score: candidate.coarse_score,
                            rerank_score: self.weights.text * text_score
                                + self.weights.visual * visual_score,
                        })
                    })
                    .collect::<Result<Vec<_>, RerankError>>()?
            }
        };

        debug!(
            modality = query.modality_label(),
            candidates = scored.len(),
            "Rerank complete"
        );

        Ok(scored)
    }

    /// One batched oracle call for the whole pool.
    async fn text_scores(
        &self,
        query_text: &str,
        candidates: &[Candidate],
        catalog: &Catalog,
    ) -> Result<Vec<f32>, RerankError> {
        let descriptions: Vec<String> = candidates
            .iter()
            .map(|c| catalog.item(c.row).description())
            .collect();

        let scores = self.scorer.score_batch(query_text, &descriptions).await?;

        if scores.len() != candidates.len() {
            return Err(RerankError::ScoreCountMismatch {
                expected: candidates.len(),
                actual: scores.len(),
            });
        }

        Ok(scores)
    }
}

fn visual_score(
    query_visual: &[f32],
    candidate: &Candidate,
    catalog: &Catalog,
) -> Result<f32, RerankError> {
    let id = catalog.item(candidate.row).id;
    let candidate_visual = catalog
        .visual_row(id)
        .ok_or(RerankError::MissingVisualRow { id })?;

    Ok(cosine_similarity(query_visual, candidate_visual))
}
