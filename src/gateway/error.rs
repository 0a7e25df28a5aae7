use axum::{
    Json,
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::constants::{
    STATUS_ENCODING_ERROR, STATUS_HEADER, STATUS_INTERNAL_ERROR, STATUS_INVALID_REQUEST,
    STATUS_RERANK_ERROR,
};
use crate::search::SearchError;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error(transparent)]
    Search(#[from] SearchError),

    #[error("internal error: {0}")]
    Internal(String),
}

#[derive(serde::Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let (status, vitrina_status) = match &self {
            GatewayError::InvalidRequest(_)
            | GatewayError::Search(SearchError::InvalidQuery { .. }) => {
                (StatusCode::BAD_REQUEST, STATUS_INVALID_REQUEST)
            }
            GatewayError::Search(SearchError::Encoding(_)) => {
                (StatusCode::BAD_GATEWAY, STATUS_ENCODING_ERROR)
            }
            GatewayError::Search(SearchError::Rerank(_)) => {
                (StatusCode::BAD_GATEWAY, STATUS_RERANK_ERROR)
            }
            GatewayError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, STATUS_INTERNAL_ERROR),
        };

        let mut headers = HeaderMap::new();
        headers.insert(
            STATUS_HEADER,
            HeaderValue::from_str(vitrina_status).unwrap_or(HeaderValue::from_static("error")),
        );

        let body = Json(ErrorResponse {
            error: self.to_string(),
            code: status.as_u16(),
        });

        (status, headers, body).into_response()
    }
}
