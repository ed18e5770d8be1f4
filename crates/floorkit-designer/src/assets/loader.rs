//! Asset loader implementations.

use super::{AssetLoader, SvgAssetImporter};
use crate::error::AssetError;
use crate::scene::Node;
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Reads drawings from a directory on disk.
#[derive(Debug, Clone)]
pub struct FsAssetLoader {
    root: PathBuf,
    importer: SvgAssetImporter,
}

impl FsAssetLoader {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            importer: SvgAssetImporter::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait]
impl AssetLoader for FsAssetLoader {
    async fn load(&self, source: &str) -> Result<Node, AssetError> {
        let path = self.root.join(source);
        let content = tokio::fs::read_to_string(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                AssetError::NotFound(path.display().to_string())
            } else {
                AssetError::Io {
                    path: path.clone(),
                    source: e,
                }
            }
        })?;
        tracing::debug!("Loaded asset {}", path.display());
        self.importer.import_str(source, &content)
    }
}

/// Serves drawings held in memory.
#[derive(Debug, Clone, Default)]
pub struct EmbeddedAssetLoader {
    sources: HashMap<String, String>,
    importer: SvgAssetImporter,
}

impl EmbeddedAssetLoader {
    /// An empty loader.
    pub fn new() -> Self {
        Self::default()
    }

    /// A loader serving the built-in 2, 4 and 6 seat drawings under their
    /// default sources.
    pub fn builtin() -> Self {
        Self::new()
            .with_source(
                "tables/table-2.svg",
                include_str!("../../assets/tables/table-2.svg"),
            )
            .with_source(
                "tables/table-4.svg",
                include_str!("../../assets/tables/table-4.svg"),
            )
            .with_source(
                "tables/table-6.svg",
                include_str!("../../assets/tables/table-6.svg"),
            )
    }

    pub fn with_source(mut self, source: impl Into<String>, svg: impl Into<String>) -> Self {
        self.insert(source, svg);
        self
    }

    pub fn insert(&mut self, source: impl Into<String>, svg: impl Into<String>) {
        self.sources.insert(source.into(), svg.into());
    }
}

#[async_trait]
impl AssetLoader for EmbeddedAssetLoader {
    async fn load(&self, source: &str) -> Result<Node, AssetError> {
        let content = self
            .sources
            .get(source)
            .ok_or_else(|| AssetError::NotFound(source.to_string()))?;
        self.importer.import_str(source, content)
    }
}
