//! First stage: cheap cosine narrowing of the full catalog.

use std::cmp::Ordering;

use tracing::debug;

use crate::catalog::{Catalog, cosine_similarity};
use crate::constants::INITIAL_K;
use crate::encoder::QueryVectors;

/// A catalog row that survived the coarse stage.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub row: usize,
    pub coarse_score: f32,
}

/// Coarse retriever over the joint space.
#[derive(Debug, Clone)]
pub struct CoarseRetriever {
    initial_k: usize,
}

impl Default for CoarseRetriever {
    fn default() -> Self {
        Self {
            initial_k: INITIAL_K,
        }
    }
}

impl CoarseRetriever {
    pub fn with_initial_k(initial_k: usize) -> Self {
        Self { initial_k }
    }

    pub fn initial_k(&self) -> usize {
        self.initial_k
    }

    /// Scores every catalog row against the present joint-space query
    /// vector(s) and keeps the best `initial_k`.
    ///
    /// Hybrid queries carry two joint vectors; their per-row similarities
    /// fuse by arithmetic mean. Ties break by ascending row index so the
    /// candidate order is deterministic.
    pub fn retrieve(&self, vectors: &QueryVectors, catalog: &Catalog) -> Vec<Candidate> {
        let signals = vectors.joint_vectors();
        if signals.is_empty() || catalog.is_empty() {
            return Vec::new();
        }

        let mut scores = vec![0.0f32; catalog.len()];
        for query_vector in &signals {
            for (row, embedding) in catalog.joint().iter_rows().enumerate() {
                scores[row] += cosine_similarity(query_vector, embedding);
            }
        }

        let mean_factor = 1.0 / signals.len() as f32;
        let mut ranked: Vec<Candidate> = scores
            .into_iter()
            .enumerate()
            .map(|(row, score)| Candidate {
                row,
                coarse_score: score * mean_factor,
            })
            .collect();

        ranked.sort_by(|a, b| {
            b.coarse_score
                .partial_cmp(&a.coarse_score)
                .unwrap_or(Ordering::Equal)
                .then(a.row.cmp(&b.row))
        });

        ranked.truncate(self.initial_k);

        debug!(
            signals = signals.len(),
            pool = ranked.len(),
            top_score = ranked.first().map(|c| c.coarse_score),
            "Coarse retrieval complete"
        );

        ranked
    }
}
