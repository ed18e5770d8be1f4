//! # FloorKit Designer
//!
//! Interactive floor-plan editing engine: a layered vector scene holding the
//! background grid and table drawings, kept in sync with an in-memory table
//! schema, driven by pointer and keyboard input and exportable as an SVG plan
//! plus the schema array.
//!
//! ## Core Components
//!
//! - **Schema**: the canonical list of placed tables, plus the dirty tracker
//!   and reference label generator
//! - **Scene**: two ordered layers (background grid, tables) of drawable
//!   primitives, with hit-testing
//! - **Assets**: seat-count registry, async loaders and the SVG importer
//! - **Render**: rebuilds the tables layer from the schema
//! - **Editor**: the [`FloorEditor`] facade, its interaction state machine and
//!   the import/export gateway
//! - **Store**: persisted floor records keyed by floor id
//!
//! ## Architecture
//!
//! ```text
//! FloorEditor
//!   ├── Schema (source of truth) ── DirtyTracker / RefGenerator
//!   ├── Scene
//!   │     ├── bg layer     (tile + grid lines, locked)
//!   │     └── floor-plan   (table groups: drawing + badge + label)
//!   ├── TableRenderer ── AssetRegistry ── AssetLoader (async)
//!   └── Interaction (Idle / Selected / Dragging)
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use floorkit_designer::{FloorEditor, Surface};
//! use floorkit_settings::EditorConfig;
//!
//! let mut editor = FloorEditor::with_default_assets(Surface::new(800.0, 600.0), EditorConfig::default())?;
//! editor.insert(4, 100.0, 200.0);
//! editor.settle().await;
//! let export = editor.export_plan();
//! ```

pub mod assets;
pub mod editor;
pub mod error;
pub mod export;
pub mod refgen;
pub mod render;
pub mod scene;
pub mod schema;
pub mod store;
pub mod text;

pub use assets::{AssetLoader, AssetRegistry, EmbeddedAssetLoader, FsAssetLoader, SvgAssetImporter};
pub use editor::{FloorEditor, InteractionState, Key, Modifiers, PlanExport, PointerEvent};
pub use error::{AssetError, EditorError, StoreError};
pub use refgen::RefGenerator;
pub use render::{RenderReceipt, TableRenderer};
pub use scene::{Layer, LayerKind, Node, NodeId, NodeKind, Placement, Scene, Style, Surface, TableMeta};
pub use schema::{DirtyTracker, TablePosition, TableRecord};
pub use store::{FloorRecord, FloorStore, TableSummary};
