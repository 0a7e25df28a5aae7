//! HTTP gateway (Axum) for search and chat.
//!
//! This module is primarily used by the `vitrina` server binary. It owns no
//! ranking logic: handlers validate and decode the request, call the
//! engine's `search` entry point, and format the ordered result list.

pub mod error;
pub mod handler;
pub mod intent;
pub mod state;


use axum::{
    Json, Router,
    http::{HeaderMap, StatusCode, header::HeaderValue},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

pub use error::GatewayError;
pub use handler::{chat_handler, search_handler};
pub use intent::Intent;
pub use state::HandlerState;

use crate::constants::{STATUS_HEADER, STATUS_OK};
use crate::encoder::{JointEncoder, VisualEncoder};
use crate::scoring::TextPairScorer;

pub fn create_router_with_state<J, V, S>(state: HandlerState<J, V, S>) -> Router
where
    J: JointEncoder + Send + Sync + 'static,
    V: VisualEncoder + Send + Sync + 'static,
    S: TextPairScorer + Send + Sync + 'static,
{
    Router::new()
        .route("/healthz", get(health_handler))
        .route("/ready", get(ready_handler))
        .route("/search", post(search_handler))
        .route("/chat", post(chat_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(serde::Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(serde::Serialize)]
pub struct ReadyResponse {
    pub status: &'static str,
    pub catalog_items: usize,
}

#[tracing::instrument]
pub async fn health_handler() -> Response {
    let mut headers = HeaderMap::new();
    headers.insert(STATUS_HEADER, HeaderValue::from_static(STATUS_OK));

    (
        StatusCode::OK,
        headers,
        Json(HealthResponse { status: "ok" }),
    )
        .into_response()
}

#[tracing::instrument(skip(state))]
pub async fn ready_handler<J, V, S>(
    axum::extract::State(state): axum::extract::State<HandlerState<J, V, S>>,
) -> Response
where
    J: JointEncoder + Send + Sync + 'static,
    V: VisualEncoder + Send + Sync + 'static,
    S: TextPairScorer + Send + Sync + 'static,
{
    // The catalog is loaded and alignment-checked before the router exists,
    // so a running server is ready by construction.
    let catalog_items = state.engine.catalog().len();

    let mut headers = HeaderMap::new();
    headers.insert(STATUS_HEADER, HeaderValue::from_static(STATUS_OK));

    (
        StatusCode::OK,
        headers,
        Json(ReadyResponse {
            status: "ok",
            catalog_items,
        }),
    )
        .into_response()
}
