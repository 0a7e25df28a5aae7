//! Final ordering and truncation of reranked candidates.

use std::cmp::Ordering;

use serde::Serialize;

use crate::catalog::{Catalog, CatalogItem, ProductId};

use super::reranker::ScoredCandidate;

/// One entry of the final ranked result list. Field names on the wire match
/// the catalog table's columns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit {
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

    pub rerank_score: f32,
}

impl SearchHit {
    fn from_item(item: &CatalogItem, rerank_score: f32) -> Self {
        Self {
            id: item.id,
            title: item.title.clone(),
            sub_category: item.sub_category.clone(),
            colour: item.colour.clone(),
            usage: item.usage.clone(),
            image_url: item.image_url.clone(),
            rerank_score,
        }
    }
}

/// Sorts by rerank score descending and truncates to `top_k`.
///
/// The sort is stable, so equal scores keep the coarse-stage order (itself
/// deterministic by row index). `top_k == 0` yields an empty, non-error
/// result.
pub fn assemble(
    mut scored: Vec<ScoredCandidate>,
    top_k: usize,
    catalog: &Catalog,
) -> Vec<SearchHit> {
    scored.sort_by(|a, b| {
        b.rerank_score
            .partial_cmp(&a.rerank_score)
            .unwrap_or(Ordering::Equal)
    });

    scored.truncate(top_k);

    scored
        .into_iter()
        .map(|c| SearchHit::from_item(catalog.item(c.row), c.rerank_score))
        .collect()
}
