//! Floor editor facade.
//!
//! Owns the schema, the scene, the render pipeline and the interaction state,
//! and publishes notifications through [`EditorEvents`]. All state is owned by
//! the editor; asset loads are the only work that leaves it, and their
//! results are applied back through [`FloorEditor::process_loaded_assets`] or
//! [`FloorEditor::settle`].
//!
//! This module is split into submodules:
//! - `interaction`: pointer and keyboard handling
//! - `tables`: insert, delete and rename
//! - `io`: import and export

mod interaction;
mod io;
mod tables;

pub use interaction::{InteractionState, Key, Modifiers, PointerEvent};
pub use io::PlanExport;

use crate::assets::{self, AssetLoader, AssetRegistry};
use crate::error::EditorError;
use crate::refgen::RefGenerator;
use crate::render::{RenderReceipt, TableRenderer};
use crate::scene::{Scene, Surface};
use crate::schema::{DirtyTracker, TableRecord};
use floorkit_core::{ChannelConfig, EditorEvents};
use floorkit_settings::EditorConfig;
use std::sync::Arc;
use tokio::runtime::Handle;

pub struct FloorEditor {
    config: EditorConfig,
    scene: Scene,
    schema: Vec<TableRecord>,
    dirty: DirtyTracker,
    refs: RefGenerator,
    renderer: TableRenderer,
    interaction: InteractionState,
    events: EditorEvents,
}

impl FloorEditor {
    /// Attach an editor to `surface`. Must be called from within a Tokio
    /// runtime, which runs the asset loads.
    pub fn new(
        surface: Surface,
        config: EditorConfig,
        loader: Arc<dyn AssetLoader>,
    ) -> Result<Self, EditorError> {
        config.validate()?;
        let runtime = Handle::try_current().map_err(|_| EditorError::NoRuntime)?;

        let renderer = TableRenderer::new(
            AssetRegistry::from_settings(&config.assets),
            loader,
            runtime,
            config.label.clone(),
        );
        let events = EditorEvents::with_config(&ChannelConfig {
            capacity: config.events.channel_capacity,
        });
        let mut scene = Scene::new(surface, config.grid.clone());
        scene.initialize();

        tracing::info!(
            width = surface.width,
            height = surface.height,
            "Floor editor attached"
        );

        Ok(Self {
            config,
            scene,
            schema: Vec::new(),
            dirty: DirtyTracker::new(),
            refs: RefGenerator::new(),
            renderer,
            interaction: InteractionState::Idle,
            events,
        })
    }

    /// Editor loading drawings from `config.assets.root`, or the built-in
    /// drawings when no root is configured.
    pub fn with_default_assets(surface: Surface, config: EditorConfig) -> Result<Self, EditorError> {
        let loader = assets::loader_for(&config.assets);
        Self::new(surface, config, loader)
    }

    /// Replace the ref generator, e.g. with a seeded one.
    pub fn with_ref_generator(mut self, refs: RefGenerator) -> Self {
        self.refs = refs;
        self
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn schema(&self) -> &[TableRecord] {
        &self.schema
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn events(&self) -> &EditorEvents {
        &self.events
    }

    pub fn interaction_state(&self) -> InteractionState {
        self.interaction
    }

    /// Ref of the selected table.
    pub fn selected_ref(&self) -> Option<&str> {
        let node = self.interaction.node()?;
        self.scene
            .table(node)?
            .table
            .as_ref()
            .map(|meta| meta.table_ref.as_str())
    }

    /// Whether the schema differs from the last imported one.
    pub fn is_dirty(&self) -> bool {
        self.dirty.is_dirty(&self.schema)
    }

    /// Loads requested by renders that have not been applied yet.
    pub fn pending_loads(&self) -> usize {
        self.renderer.pending()
    }

    /// Apply every asset load that has already finished. Returns how many
    /// tables were added to the scene.
    pub fn process_loaded_assets(&mut self) -> usize {
        let mut added = 0;
        while let Some(loaded) = self.renderer.try_next() {
            if self.renderer.apply(&mut self.scene, &self.schema, loaded).is_some() {
                added += 1;
            }
        }
        added
    }

    /// Wait until every outstanding asset load has been delivered and
    /// applied. Returns how many tables were added to the scene.
    ///
    /// A loader that never resolves keeps this future pending.
    pub async fn settle(&mut self) -> usize {
        let mut added = 0;
        while let Some(loaded) = self.renderer.next().await {
            if self.renderer.apply(&mut self.scene, &self.schema, loaded).is_some() {
                added += 1;
            }
        }
        added
    }

    /// Rebuild the tables layer from the schema. Drops the selection.
    fn redraw(&mut self) -> RenderReceipt {
        self.clear_selection();
        self.renderer.render(&mut self.scene, &self.schema)
    }

    fn notify_dirty(&self) {
        let dirty = self.is_dirty();
        tracing::debug!(dirty, "Schema changed");
        self.events.dirty_changed.emit(dirty);
    }
}

impl std::fmt::Debug for FloorEditor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FloorEditor")
            .field("surface", &self.scene.surface())
            .field("tables", &self.schema.len())
            .field("interaction", &self.interaction)
            .field("renderer", &self.renderer)
            .finish()
    }
}
