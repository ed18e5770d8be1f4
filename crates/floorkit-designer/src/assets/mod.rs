//! Table drawings
//!
//! Each supported seat count maps to one vector drawing. Drawings are fetched
//! asynchronously through an [`AssetLoader`] and parsed into scene primitives
//! by the [`SvgAssetImporter`].

mod loader;
mod svg_import;

pub use loader::{EmbeddedAssetLoader, FsAssetLoader};
pub use svg_import::SvgAssetImporter;

use crate::error::AssetError;
use crate::scene::Node;
use async_trait::async_trait;
use floorkit_settings::{AssetSettings, TableAssetEntry};
use std::sync::Arc;

/// Fetches and parses the drawing stored under `source`.
#[async_trait]
pub trait AssetLoader: Send + Sync {
    async fn load(&self, source: &str) -> Result<Node, AssetError>;
}

/// Seat count to drawing source mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetRegistry {
    entries: Vec<TableAssetEntry>,
}

impl AssetRegistry {
    pub fn new(entries: Vec<TableAssetEntry>) -> Self {
        Self { entries }
    }

    pub fn from_settings(settings: &AssetSettings) -> Self {
        Self::new(settings.tables.clone())
    }

    pub fn source_for(&self, chairs: u32) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.chairs == chairs)
            .map(|e| e.source.as_str())
    }

    pub fn supports(&self, chairs: u32) -> bool {
        self.source_for(chairs).is_some()
    }

    /// Registered seat counts in registration order.
    pub fn seat_counts(&self) -> Vec<u32> {
        self.entries.iter().map(|e| e.chairs).collect()
    }
}

impl Default for AssetRegistry {
    fn default() -> Self {
        Self::from_settings(&AssetSettings::default())
    }
}

/// Loader for the configured asset root, or the built-in drawings when no
/// root is set.
pub fn loader_for(settings: &AssetSettings) -> Arc<dyn AssetLoader> {
    match &settings.root {
        Some(root) => Arc::new(FsAssetLoader::new(root)),
        None => Arc::new(EmbeddedAssetLoader::builtin()),
    }
}
