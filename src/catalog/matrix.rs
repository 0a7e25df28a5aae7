//! Dense row-major embedding matrix and the cosine comparison operator.

use super::error::CatalogError;

/// Fixed-dimension embedding matrix, one row per catalog item.
#[derive(Debug, Clone)]
pub struct EmbeddingMatrix {
    rows: usize,
    dim: usize,
    data: Vec<f32>,
}

impl EmbeddingMatrix {
    /// Wraps a row-major buffer, validating its shape.
    pub fn new(rows: usize, dim: usize, data: Vec<f32>) -> Result<Self, CatalogError> {
        if data.len() != rows * dim {
            return Err(CatalogError::MatrixShape {
                rows,
                dim,
                len: data.len(),
            });
        }

        Ok(Self { rows, dim, data })
    }

    /// Builds a matrix from per-row vectors (test/fixture convenience).
    /// All rows must share one dimension.
    pub fn from_rows(dim: usize, rows: &[Vec<f32>]) -> Result<Self, CatalogError> {
        let mut data = Vec::with_capacity(rows.len() * dim);
        for row in rows {
            if row.len() != dim {
                return Err(CatalogError::MatrixShape {
                    rows: rows.len(),
                    dim,
                    len: row.len(),
                });
            }
            data.extend_from_slice(row);
        }

        Self::new(rows.len(), dim, data)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Row `i` as a vector slice. Panics on out-of-range rows.
    pub fn row(&self, i: usize) -> &[f32] {
        let start = i * self.dim;
        &self.data[start..start + self.dim]
    }

    /// Iterates rows in index order.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[f32]> {
        self.data.chunks_exact(self.dim)
    }
}

/// Cosine similarity between two vectors.
///
/// Mismatched lengths, empty inputs, and zero vectors all score 0.0 rather
/// than erroring; a zero vector only occurs as a defensive default and must
/// not abort a ranking pass.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot_product / (norm_a * norm_b)
    }
}
