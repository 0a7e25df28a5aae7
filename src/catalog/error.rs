use std::path::PathBuf;
use thiserror::Error;

use super::ProductId;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error(
        "catalog misaligned: {items} items, {joint_rows} joint rows, {visual_rows} visual rows"
    )]
    AlignmentMismatch {
        items: usize,
        joint_rows: usize,
        visual_rows: usize,
    },

    #[error("duplicate product id {id} in catalog table")]
    DuplicateProduct { id: ProductId },

    #[error("matrix buffer of {len} floats does not match {rows}x{dim}")]
    MatrixShape { rows: usize, dim: usize, len: usize },

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid manifest at {path}: {reason}")]
    Manifest { path: PathBuf, reason: String },

    #[error("failed to decode {path}: {reason}")]
    Decode { path: PathBuf, reason: String },
}
