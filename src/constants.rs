//! Shared tuning constants.
//!
//! Retrieval and fusion parameters live here so the coarse stage, the
//! reranker, and the gateway agree on one set of values.

/// Candidate pool size produced by the coarse stage, regardless of the
/// requested result count. Gives the reranker headroom without scoring the
/// full catalog.
pub const INITIAL_K: usize = 30;

/// Result count used when a request does not specify `top_k`.
pub const DEFAULT_TOP_K: usize = 5;

/// Weight of the cross-encoder text score in hybrid (text + image) fusion.
pub const DEFAULT_TEXT_WEIGHT: f32 = 0.5;

/// Weight of the visual-space cosine score in hybrid (text + image) fusion.
pub const DEFAULT_VISUAL_WEIGHT: f32 = 0.5;

/// Response header carrying the gateway outcome classification.
pub const STATUS_HEADER: &str = "x-vitrina-status";

pub const STATUS_OK: &str = "ok";
pub const STATUS_INVALID_REQUEST: &str = "invalid_request";
pub const STATUS_ENCODING_ERROR: &str = "encoding_error";
pub const STATUS_RERANK_ERROR: &str = "rerank_error";
pub const STATUS_INTERNAL_ERROR: &str = "internal_error";
