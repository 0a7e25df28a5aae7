//! Deterministic mock encoders for tests and offline development.

use std::collections::HashMap;

use super::error::{EncodingError, Modality};
use super::{JointEncoder, VisualEncoder};

/// Derives a stable pseudo-embedding from the input bytes. Same input,
/// same vector, across processes.
pub fn deterministic_vector(seed: &[u8], dim: usize) -> Vec<f32> {
    let mut state: u64 = 0xcbf2_9ce4_8422_2325;
    for &b in seed {
        state ^= u64::from(b);
        state = state.wrapping_mul(0x0000_0100_0000_01b3);
    }

    (0..dim)
        .map(|_| {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            ((state >> 40) as f32 / (1u32 << 24) as f32) * 2.0 - 1.0
        })
        .collect()
}

/// Joint-space mock. Vectors can be pinned per input; unpinned inputs fall
/// back to [`deterministic_vector`].
#[derive(Debug, Clone, Default)]
pub struct MockJointEncoder {
    dim: usize,
    text_vectors: HashMap<String, Vec<f32>>,
    image_vectors: HashMap<Vec<u8>, Vec<f32>>,
    fail_text: bool,
    fail_image: bool,
}

impl MockJointEncoder {
    pub fn new(dim: usize) -> Self {
        Self {
            dim,
            ..Default::default()
        }
    }

    pub fn with_text(mut self, text: &str, vector: Vec<f32>) -> Self {
        self.text_vectors.insert(text.to_string(), vector);
        self
    }

    pub fn with_image(mut self, image: &[u8], vector: Vec<f32>) -> Self {
        self.image_vectors.insert(image.to_vec(), vector);
        self
    }

    /// Makes every call on `modality` fail, for error-path tests.
    pub fn failing_on(mut self, modality: Modality) -> Self {
        match modality {
            Modality::Text => self.fail_text = true,
            Modality::Image => self.fail_image = true,
        }
        self
    }
}

impl JointEncoder for MockJointEncoder {
    async fn encode_text(&self, text: &str) -> Result<Vec<f32>, EncodingError> {
        if self.fail_text {
            return Err(EncodingError::Failed {
                modality: Modality::Text,
                reason: "mock text encoder failure".to_string(),
            });
        }

        Ok(self
            .text_vectors
            .get(text)
            .cloned()
            .unwrap_or_else(|| deterministic_vector(text.as_bytes(), self.dim)))
    }

    async fn encode_image(&self, image: &[u8]) -> Result<Vec<f32>, EncodingError> {
        if self.fail_image {
            return Err(EncodingError::Failed {
                modality: Modality::Image,
                reason: "mock image encoder failure".to_string(),
            });
        }

        Ok(self
            .image_vectors
            .get(image)
            .cloned()
            .unwrap_or_else(|| deterministic_vector(image, self.dim)))
    }
}

/// Visual-space mock, same shape as [`MockJointEncoder`] minus text.
#[derive(Debug, Clone, Default)]
pub struct MockVisualEncoder {
    dim: usize,
    image_vectors: HashMap<Vec<u8>, Vec<f32>>,
    fail: bool,
}

impl MockVisualEncoder {
    pub fn new(dim: usize) -> Self {
        Self {
            dim,
            ..Default::default()
        }
    }

    pub fn with_image(mut self, image: &[u8], vector: Vec<f32>) -> Self {
        self.image_vectors.insert(image.to_vec(), vector);
        self
    }

    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }
}

impl VisualEncoder for MockVisualEncoder {
    async fn encode_image(&self, image: &[u8]) -> Result<Vec<f32>, EncodingError> {
        if self.fail {
            return Err(EncodingError::Failed {
                modality: Modality::Image,
                reason: "mock visual encoder failure".to_string(),
            });
        }

        Ok(self
            .image_vectors
            .get(image)
            .cloned()
            .unwrap_or_else(|| {
                // Offset the seed so the visual space never coincides with
                // the joint space for the same image bytes.
                let mut seed = image.to_vec();
                seed.push(0x56);
                deterministic_vector(&seed, self.dim)
            }))
    }
}
