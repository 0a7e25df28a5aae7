use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode, header::HeaderValue},
    response::{IntoResponse, Response},
};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::{DEFAULT_TOP_K, STATUS_HEADER, STATUS_OK};
use crate::encoder::{JointEncoder, VisualEncoder};
use crate::scoring::TextPairScorer;
use crate::search::SearchHit;

use super::error::GatewayError;
use super::intent::{Intent, classify};
use super::state::HandlerState;

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub text: Option<String>,

    /// Base64-encoded image bytes.
    #[serde(default)]
    pub image: Option<String>,

    #[serde(default)]
    pub top_k: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub results: Vec<SearchHit>,
    pub total: usize,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
    pub results: Vec<SearchHit>,
}

#[tracing::instrument(skip_all)]
pub async fn search_handler<J, V, S>(
    State(state): State<HandlerState<J, V, S>>,
    Json(request): Json<SearchRequest>,
) -> Result<Response, GatewayError>
where
    J: JointEncoder + Send + Sync + 'static,
    V: VisualEncoder + Send + Sync + 'static,
    S: TextPairScorer + Send + Sync + 'static,
{
    let top_k = resolve_top_k(request.top_k)?;
    let image = decode_image(request.image.as_deref())?;

    let results = state
        .engine
        .search(request.text.as_deref(), image.as_deref(), top_k)
        .await?;

    debug!(total = results.len(), top_k, "Search request served");

    Ok(ok_json(SearchResponse {
        total: results.len(),
        results,
    }))
}

#[tracing::instrument(skip_all)]
pub async fn chat_handler<J, V, S>(
    State(state): State<HandlerState<J, V, S>>,
    Json(request): Json<ChatRequest>,
) -> Result<Response, GatewayError>
where
    J: JointEncoder + Send + Sync + 'static,
    V: VisualEncoder + Send + Sync + 'static,
    S: TextPairScorer + Send + Sync + 'static,
{
    let message = request.message.trim();
    if message.is_empty() {
        return Err(GatewayError::InvalidRequest(
            "message must not be empty".to_string(),
        ));
    }

    let response = match classify(message) {
        Intent::Chat => ChatResponse {
            reply: "Hi! Tell me what you are looking for, or send a photo, and I will search \
                    the catalog."
                .to_string(),
            results: Vec::new(),
        },
        Intent::Search => {
            let results = state
                .engine
                .search(Some(message), None, DEFAULT_TOP_K)
                .await?;

            let reply = if results.is_empty() {
                "I could not find matching products in the catalog.".to_string()
            } else {
                format!(
                    "I found {} matching products; \"{}\" looks closest.",
                    results.len(),
                    results[0].title
                )
            };

            ChatResponse { reply, results }
        }
    };

    Ok(ok_json(response))
}

fn resolve_top_k(raw: Option<i64>) -> Result<usize, GatewayError> {
    match raw {
        None => Ok(DEFAULT_TOP_K),
        Some(k) if k < 0 => Err(GatewayError::InvalidRequest(format!(
            "top_k must be >= 0, got {k}"
        ))),
        Some(k) => Ok(k as usize),
    }
}

fn decode_image(encoded: Option<&str>) -> Result<Option<Vec<u8>>, GatewayError> {
    encoded
        .map(|data| {
            BASE64
                .decode(data)
                .map_err(|e| GatewayError::InvalidRequest(format!("image is not valid base64: {e}")))
        })
        .transpose()
}

fn ok_json<T: Serialize>(body: T) -> Response {
    let mut headers = HeaderMap::new();
    headers.insert(STATUS_HEADER, HeaderValue::from_static(STATUS_OK));

    (StatusCode::OK, headers, Json(body)).into_response()
}
