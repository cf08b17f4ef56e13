//! Seed dataset loading

use super::models::{Product, Service};
use crate::error::{StoreError, StoreResult};
use serde::Deserialize;
use std::fs;
use std::path::Path;

const EMBEDDED_SEED: &str = include_str!("../../data/catalog.json");

/// Raw seed file contents; validated by [`super::Catalog::new`].
#[derive(Debug, Deserialize)]
pub struct SeedData {
    pub products: Vec<Product>,

    #[serde(default)]
    pub services: Vec<Service>,
}

impl SeedData {
    pub fn embedded() -> StoreResult<Self> {
        Self::from_json(EMBEDDED_SEED)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> StoreResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| StoreError::InvalidSeed(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&content)
    }

    pub fn from_json(json: &str) -> StoreResult<Self> {
        serde_json::from_str(json).map_err(|e| StoreError::InvalidSeed(e.to_string()))
    }
}
