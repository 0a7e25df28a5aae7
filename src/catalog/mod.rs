//! Immutable product catalog and its two row-aligned embedding spaces.
//!
//! Row *i* of the item table, the joint-space matrix, and the visual-space
//! matrix always describe the same product. [`Catalog::from_parts`] enforces
//! this at load time; nothing mutates a catalog afterwards, so concurrent
//! readers need no locking.

pub mod error;
pub mod loader;
pub mod matrix;


pub use error::CatalogError;
pub use loader::FsCatalogStore;
pub use matrix::{EmbeddingMatrix, cosine_similarity};

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Stable product identifier, unique per catalog row.
pub type ProductId = u64;

/// One catalog row. Identity is `id`; the remaining fields are display and
/// description data. Field names on the wire match the source dataset
/// columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    #[serde(rename = "ProductId")]
    pub id: ProductId,

    #[serde(rename = "ProductTitle")]
    pub title: String,

    #[serde(rename = "SubCategory")]
    pub sub_category: String,

    #[serde(rename = "Colour")]
    pub colour: String,

    #[serde(rename = "Usage")]
    pub usage: String,

    #[serde(rename = "ImageURL")]
    pub image_url: String,
}

impl CatalogItem {
    /// Deterministic description string fed to the pairwise text scorer.
    pub fn description(&self) -> String {
        format!(
            "{}. Category: {}. Color: {}. Usage: {}",
            self.title, self.sub_category, self.colour, self.usage
        )
    }
}

/// The catalog table plus its joint-space and visual-space embedding
/// matrices, aligned by row index.
#[derive(Debug)]
pub struct Catalog {
    items: Vec<CatalogItem>,
    joint: EmbeddingMatrix,
    visual: EmbeddingMatrix,
    id_to_row: HashMap<ProductId, usize>,
}

impl Catalog {
    /// Assembles a catalog, verifying the row-alignment invariant.
    ///
    /// Fails with [`CatalogError::AlignmentMismatch`] if the three inputs
    /// disagree in length, and with [`CatalogError::DuplicateProduct`] if two
    /// rows share a `ProductId` (the id→row map must be a bijection).
    pub fn from_parts(
        items: Vec<CatalogItem>,
        joint: EmbeddingMatrix,
        visual: EmbeddingMatrix,
    ) -> Result<Self, CatalogError> {
        if items.len() != joint.rows() || items.len() != visual.rows() {
            return Err(CatalogError::AlignmentMismatch {
                items: items.len(),
                joint_rows: joint.rows(),
                visual_rows: visual.rows(),
            });
        }

        let mut id_to_row = HashMap::with_capacity(items.len());
        for (row, item) in items.iter().enumerate() {
            if id_to_row.insert(item.id, row).is_some() {
                return Err(CatalogError::DuplicateProduct { id: item.id });
            }
        }

        Ok(Self {
            items,
            joint,
            visual,
            id_to_row,
        })
    }

    /// Number of catalog rows.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the catalog has no rows.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Item at `row`. Panics on out-of-range rows (callers only hold rows
    /// produced by this catalog).
    pub fn item(&self, row: usize) -> &CatalogItem {
        &self.items[row]
    }

    /// All items, in row order.
    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    /// Joint-space matrix (shared text/image semantic space).
    pub fn joint(&self) -> &EmbeddingMatrix {
        &self.joint
    }

    /// Visual-space matrix (image-only semantic space).
    pub fn visual(&self) -> &EmbeddingMatrix {
        &self.visual
    }

    pub fn joint_dim(&self) -> usize {
        self.joint.dim()
    }

    pub fn visual_dim(&self) -> usize {
        self.visual.dim()
    }

    /// Row index for a product id, if present.
    pub fn row_of(&self, id: ProductId) -> Option<usize> {
        self.id_to_row.get(&id).copied()
    }

    /// Visual-space vector for a product, resolved by identifier.
    ///
    /// Rerank-stage lookups go through here rather than reusing a
    /// coarse-stage row index; the identifier is the only key guaranteed
    /// valid across both spaces.
    pub fn visual_row(&self, id: ProductId) -> Option<&[f32]> {
        self.row_of(id).map(|row| self.visual.row(row))
    }
}
