//! HTTP client for the cross-encoder scoring sidecar.
//!
//! `POST /score` with `{ "query": ..., "documents": [...] }` returns
//! `{ "scores": [f32] }`, one score per document, in order.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::TextPairScorer;
use super::error::ScoringError;

const SCORE_PATH: &str = "score";

#[derive(Debug, Clone)]
pub struct RemoteTextScorerConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl RemoteTextScorerConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Scoring sidecar client.
#[derive(Debug, Clone)]
pub struct RemoteTextScorer {
    http: reqwest::Client,
    base_url: String,
}

#[derive(Serialize)]
struct ScoreRequest<'a> {
    query: &'a str,
    documents: &'a [String],
}

#[derive(Deserialize)]
struct ScoreResponse {
    scores: Vec<f32>,
}

impl RemoteTextScorer {
    pub fn new(config: RemoteTextScorerConfig) -> Result<Self, ScoringError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ScoringError::ClientBuild {
                reason: e.to_string(),
            })?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl TextPairScorer for RemoteTextScorer {
    async fn score_batch(
        &self,
        query: &str,
        descriptions: &[String],
    ) -> Result<Vec<f32>, ScoringError> {
        let url = format!("{}/{}", self.base_url, SCORE_PATH);
        let body = ScoreRequest {
            query,
            documents: descriptions,
        };

        let response = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| ScoringError::Unreachable {
                url: url.clone(),
                reason: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(ScoringError::Failed {
                reason: format!("{} returned {}", url, response.status()),
            });
        }

        let ScoreResponse { scores } =
            response
                .json()
                .await
                .map_err(|e| ScoringError::InvalidResponse {
                    reason: e.to_string(),
                })?;

        Ok(scores)
    }
}
