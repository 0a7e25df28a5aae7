//! Deterministic mock scorer for tests and offline development.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use super::TextPairScorer;
use super::error::ScoringError;

/// Token-overlap relevance stand-in.
///
/// Scores can be pinned per description for exact-arithmetic tests; unpinned
/// descriptions fall back to a word-overlap heuristic that orders plausibly
/// (more shared terms, higher score). Batch sizes are recorded so tests can
/// assert the one-batched-call contract.
#[derive(Debug, Clone, Default)]
pub struct MockTextScorer {
    pinned: HashMap<String, f32>,
    fail: bool,
    batches: Arc<Mutex<Vec<usize>>>,
}

impl MockTextScorer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pins the score returned for one exact description string.
    pub fn with_score(mut self, description: &str, score: f32) -> Self {
        self.pinned.insert(description.to_string(), score);
        self
    }

    /// Makes every batch fail, for error-path tests.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    /// Sizes of the batches scored so far.
    pub fn batch_sizes(&self) -> Vec<usize> {
        self.batches.lock().clone()
    }

    fn overlap_score(query: &str, description: &str) -> f32 {
        let query_words: Vec<String> = tokenize(query);
        let description_words: Vec<String> = tokenize(description);

        if query_words.is_empty() || description_words.is_empty() {
            return 0.0;
        }

        let matches = query_words
            .iter()
            .filter(|w| description_words.contains(w))
            .count();

        matches as f32 / query_words.len() as f32
    }
}

fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect()
}

impl TextPairScorer for MockTextScorer {
    async fn score_batch(
        &self,
        query: &str,
        descriptions: &[String],
    ) -> Result<Vec<f32>, ScoringError> {
        self.batches.lock().push(descriptions.len());

        if self.fail {
            return Err(ScoringError::Failed {
                reason: "mock scorer failure".to_string(),
            });
        }

        Ok(descriptions
            .iter()
            .map(|d| {
                self.pinned
                    .get(d)
                    .copied()
                    .unwrap_or_else(|| Self::overlap_score(query, d))
            })
            .collect())
    }
}
