//! Query encoding over the external embedding producers.
//!
//! The engine never runs a model in-process; it talks to the producers
//! through two seams:
//!
//! - [`JointEncoder`] — embeds text or images into the shared text/image
//!   semantic space used by coarse retrieval.
//! - [`VisualEncoder`] — embeds images into the image-only space used by
//!   fine reranking.
//!
//! [`EncoderAdapter`] maps a query's modality onto the vectors each stage
//! needs. [`RemoteEncoder`] implements both seams against an embedding
//! sidecar; deterministic mocks live in [`mock`].

pub mod error;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod remote;


pub use error::{EncodingError, Modality};
#[cfg(any(test, feature = "mock"))]
pub use mock::{MockJointEncoder, MockVisualEncoder};
pub use remote::{RemoteEncoder, RemoteEncoderConfig};

use std::future::Future;

use tracing::debug;

use crate::search::SearchQuery;

/// Producer for the joint text/image semantic space.
pub trait JointEncoder: Send + Sync {
    /// Embeds query text.
    fn encode_text(
        &self,
        text: &str,
    ) -> impl Future<Output = Result<Vec<f32>, EncodingError>> + Send;

    /// Embeds a query image.
    fn encode_image(
        &self,
        image: &[u8],
    ) -> impl Future<Output = Result<Vec<f32>, EncodingError>> + Send;
}

/// Producer for the image-only visual space.
pub trait VisualEncoder: Send + Sync {
    /// Embeds a query image.
    fn encode_image(
        &self,
        image: &[u8],
    ) -> impl Future<Output = Result<Vec<f32>, EncodingError>> + Send;
}

/// Query vectors produced for one request.
///
/// Which fields are present is fully determined by the query modality:
/// text-only queries carry `joint_text`; image-only queries carry
/// `joint_image` plus `visual`; hybrid queries carry all three.
#[derive(Debug, Clone, Default)]
pub struct QueryVectors {
    pub joint_text: Option<Vec<f32>>,
    pub joint_image: Option<Vec<f32>>,
    pub visual: Option<Vec<f32>>,
}

impl QueryVectors {
    /// Present joint-space vectors in deterministic order (text, then image).
    pub fn joint_vectors(&self) -> Vec<&[f32]> {
        [self.joint_text.as_deref(), self.joint_image.as_deref()]
            .into_iter()
            .flatten()
            .collect()
    }
}

/// Uniform encoding call over the two producers.
#[derive(Debug, Clone)]
pub struct EncoderAdapter<J, V> {
    joint: J,
    visual: V,
}

impl<J: JointEncoder, V: VisualEncoder> EncoderAdapter<J, V> {
    pub fn new(joint: J, visual: V) -> Self {
        Self { joint, visual }
    }

    /// Produces the vectors the pipeline needs for `query`.
    ///
    /// A producer failure surfaces as an [`EncodingError`] tagged with the
    /// failing modality; there is no silent degradation and no retry here.
    pub async fn encode(&self, query: &SearchQuery) -> Result<QueryVectors, EncodingError> {
        let mut vectors = QueryVectors::default();

        if let Some(text) = query.text() {
            vectors.joint_text = Some(self.joint.encode_text(text).await?);
        }

        if let Some(image) = query.image() {
            vectors.joint_image = Some(self.joint.encode_image(image).await?);
            vectors.visual = Some(self.visual.encode_image(image).await?);
        }

        debug!(
            modality = query.modality_label(),
            joint_vectors = vectors.joint_vectors().len(),
            has_visual = vectors.visual.is_some(),
            "Query encoded"
        );

        Ok(vectors)
    }
}
