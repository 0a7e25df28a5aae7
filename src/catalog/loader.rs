//! Filesystem catalog store.
//!
//! A catalog directory holds four files produced by the offline
//! preprocessing pipeline:
//!
//! - `manifest.json` — row count and the two matrix dimensions
//! - `catalog.json` — the item table, in row order
//! - `joint.bin` / `visual.bin` — row-major little-endian f32 matrices
//!
//! Loading happens once at startup; a misaligned trio is fatal and the
//! process must not serve queries.

use std::fs::File;
use std::path::{Path, PathBuf};

use memmap2::Mmap;
use serde::Deserialize;
use tracing::info;

use super::error::CatalogError;
use super::matrix::EmbeddingMatrix;
use super::{Catalog, CatalogItem};

pub const MANIFEST_FILE: &str = "manifest.json";
pub const CATALOG_FILE: &str = "catalog.json";
pub const JOINT_FILE: &str = "joint.bin";
pub const VISUAL_FILE: &str = "visual.bin";

#[derive(Debug, Deserialize)]
struct Manifest {
    items: usize,
    joint_dim: usize,
    visual_dim: usize,
}

/// Loads a [`Catalog`] from a directory of preprocessed files.
#[derive(Debug, Clone)]
pub struct FsCatalogStore {
    dir: PathBuf,
}

impl FsCatalogStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Reads and validates the full catalog.
    pub fn load(&self) -> Result<Catalog, CatalogError> {
        let manifest = self.read_manifest()?;
        let items = self.read_items()?;

        let joint = self.read_matrix(JOINT_FILE, manifest.items, manifest.joint_dim)?;
        let visual = self.read_matrix(VISUAL_FILE, manifest.items, manifest.visual_dim)?;

        if items.len() != manifest.items {
            return Err(CatalogError::AlignmentMismatch {
                items: items.len(),
                joint_rows: joint.rows(),
                visual_rows: visual.rows(),
            });
        }

        let catalog = Catalog::from_parts(items, joint, visual)?;

        info!(
            items = catalog.len(),
            joint_dim = catalog.joint_dim(),
            visual_dim = catalog.visual_dim(),
            dir = %self.dir.display(),
            "Catalog loaded"
        );

        Ok(catalog)
    }

    fn read_manifest(&self) -> Result<Manifest, CatalogError> {
        let path = self.dir.join(MANIFEST_FILE);
        let file = File::open(&path).map_err(|source| CatalogError::Io {
            path: path.clone(),
            source,
        })?;

        serde_json::from_reader(file).map_err(|e| CatalogError::Manifest {
            path,
            reason: e.to_string(),
        })
    }

    fn read_items(&self) -> Result<Vec<CatalogItem>, CatalogError> {
        let path = self.dir.join(CATALOG_FILE);
        let file = File::open(&path).map_err(|source| CatalogError::Io {
            path: path.clone(),
            source,
        })?;

        serde_json::from_reader(file).map_err(|e| CatalogError::Decode {
            path,
            reason: e.to_string(),
        })
    }

    fn read_matrix(
        &self,
        name: &str,
        rows: usize,
        dim: usize,
    ) -> Result<EmbeddingMatrix, CatalogError> {
        let path = self.dir.join(name);
        let file = File::open(&path).map_err(|source| CatalogError::Io {
            path: path.clone(),
            source,
        })?;

        // SAFETY: the file is written once by preprocessing and read-only here.
        let mmap = unsafe { Mmap::map(&file) }.map_err(|source| CatalogError::Io {
            path: path.clone(),
            source,
        })?;

        let floats: &[f32] =
            bytemuck::try_cast_slice(&mmap[..]).map_err(|e| CatalogError::Decode {
                path: path.clone(),
                reason: e.to_string(),
            })?;

        EmbeddingMatrix::new(rows, dim, floats.to_vec())
    }
}
