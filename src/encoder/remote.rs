//! HTTP client for the embedding sidecar.
//!
//! The sidecar exposes two endpoints, both returning `{ "vector": [f32] }`:
//!
//! - `POST /encode/joint` with `{ "text": ... }` or `{ "image": <base64> }`
//! - `POST /encode/visual` with `{ "image": <base64> }`

use std::time::Duration;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::{Deserialize, Serialize};

use super::error::{EncodingError, Modality};
use super::{JointEncoder, VisualEncoder};

const JOINT_PATH: &str = "encode/joint";
const VISUAL_PATH: &str = "encode/visual";

#[derive(Debug, Clone)]
pub struct RemoteEncoderConfig {
    pub base_url: String,

    /// Per-call timeout. External encoders are treated as potentially slow
    /// synchronous collaborators; the bound lives here, not in the core.
    pub timeout: Duration,
}

impl RemoteEncoderConfig {
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

/// Embedding sidecar client. Implements both encoder seams.
#[derive(Debug, Clone)]
pub struct RemoteEncoder {
    http: reqwest::Client,
    base_url: String,
}

#[derive(Serialize)]
struct JointRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    image: Option<String>,
}

#[derive(Serialize)]
struct VisualRequest {
    image: String,
}

#[derive(Deserialize)]
struct VectorResponse {
    vector: Vec<f32>,
}

impl RemoteEncoder {
    pub fn new(config: RemoteEncoderConfig) -> Result<Self, EncodingError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| EncodingError::ClientBuild {
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

    async fn post_vector<B: Serialize>(
        &self,
        path: &str,
        body: &B,
        modality: Modality,
    ) -> Result<Vec<f32>, EncodingError> {
        let url = format!("{}/{}", self.base_url, path);

        let response = self
            .http
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| EncodingError::Unreachable {
                modality,
                url: url.clone(),
                reason: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(EncodingError::Failed {
                modality,
                reason: format!("{} returned {}", url, response.status()),
            });
        }

        let VectorResponse { vector } =
            response
                .json()
                .await
                .map_err(|e| EncodingError::InvalidResponse {
                    modality,
                    reason: e.to_string(),
                })?;

        if vector.is_empty() {
            return Err(EncodingError::InvalidResponse {
                modality,
                reason: "empty vector".to_string(),
            });
        }

        Ok(vector)
    }
}

impl JointEncoder for RemoteEncoder {
    async fn encode_text(&self, text: &str) -> Result<Vec<f32>, EncodingError> {
        let body = JointRequest {
            text: Some(text),
            image: None,
        };
        self.post_vector(JOINT_PATH, &body, Modality::Text).await
    }

    async fn encode_image(&self, image: &[u8]) -> Result<Vec<f32>, EncodingError> {
        let body = JointRequest {
            text: None,
            image: Some(BASE64.encode(image)),
        };
        self.post_vector(JOINT_PATH, &body, Modality::Image).await
    }
}

impl VisualEncoder for RemoteEncoder {
    async fn encode_image(&self, image: &[u8]) -> Result<Vec<f32>, EncodingError> {
        let body = VisualRequest {
            image: BASE64.encode(image),
        };
        self.post_vector(VISUAL_PATH, &body, Modality::Image).await
    }
}
