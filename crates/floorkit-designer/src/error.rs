//! Error types for the designer crate.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while fetching or parsing a table drawing.
#[derive(Error, Debug)]
pub enum AssetError {
    /// No drawing exists under the requested source.
    #[error("Asset not found: {0}")]
    NotFound(String),

    /// Reading the drawing from disk failed.
    #[error("Failed to read asset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The drawing is not well-formed SVG.
    #[error("Invalid SVG: {0}")]
    InvalidSvg(String),

    /// The drawing parsed but contains nothing drawable.
    #[error("Asset {0} contains no drawable elements")]
    EmptyDrawing(String),

    /// The load task ended without producing a result.
    #[error("Asset load aborted: {0}")]
    Aborted(String),
}

/// Errors surfaced by the floor editor facade.
#[derive(Error, Debug)]
pub enum EditorError {
    /// The editor was constructed outside a Tokio runtime.
    #[error("A Tokio runtime is required to load table assets")]
    NoRuntime,

    /// The supplied configuration failed validation.
    #[error("Invalid editor configuration: {0}")]
    Config(#[from] floorkit_core::Error),

    /// Serialized schema could not be parsed or produced.
    #[error("Invalid schema data: {0}")]
    InvalidSchema(#[from] serde_json::Error),
}

/// Errors raised by the floor record store.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed floor store: {0}")]
    Json(#[from] serde_json::Error),

    /// A record with the same floor id already exists.
    #[error("Floor {0} already exists")]
    Duplicate(String),
}

pub type StoreResult<T> = Result<T, StoreError>;
