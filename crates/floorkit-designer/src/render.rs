//! Table render pipeline
//!
//! Rebuilding the tables layer is split in two halves. [`TableRenderer::render`]
//! clears the layer and spawns one asset load per renderable schema entry,
//! returning as soon as every load has been requested. Loads complete on the
//! Tokio runtime and are delivered over a channel; the owner of the scene
//! applies them with [`TableRenderer::apply`]. Every render bumps a
//! generation counter so completions belonging to an earlier render are
//! dropped instead of duplicating tables.

use crate::assets::{AssetLoader, AssetRegistry};
use crate::error::AssetError;
use crate::scene::{Node, NodeId, Placement, Scene, Style, TableMeta, TextSpan};
use crate::schema::TableRecord;
use crate::text;
use floorkit_core::{Bounds, Point};
use floorkit_settings::LabelSettings;
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::mpsc;

pub const TABLE_PREFIX: &str = "table-item-";
pub const BADGE_PREFIX: &str = "id-wrapper-";
pub const LABEL_PREFIX: &str = "table-id-";

/// Returned when a render has requested all of its loads.
///
/// The tables layer may still be empty at this point; drawings appear once
/// their loads are applied.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderReceipt {
    pub generation: u64,
    /// Loads spawned by this render
    pub requested: usize,
    /// Entries with no registered drawing
    pub skipped: usize,
    pub schema: Vec<TableRecord>,
}

/// A finished asset load.
#[derive(Debug)]
pub struct LoadedTable {
    pub generation: u64,
    pub entry_id: String,
    pub source: String,
    pub result: Result<Node, AssetError>,
}

pub struct TableRenderer {
    registry: AssetRegistry,
    loader: Arc<dyn AssetLoader>,
    runtime: Handle,
    label: LabelSettings,
    tx: mpsc::UnboundedSender<LoadedTable>,
    rx: mpsc::UnboundedReceiver<LoadedTable>,
    generation: u64,
    pending: usize,
}

impl TableRenderer {
    pub fn new(
        registry: AssetRegistry,
        loader: Arc<dyn AssetLoader>,
        runtime: Handle,
        label: LabelSettings,
    ) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            registry,
            loader,
            runtime,
            label,
            tx,
            rx,
            generation: 0,
            pending: 0,
        }
    }

    pub fn registry(&self) -> &AssetRegistry {
        &self.registry
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Loads spawned but not yet delivered, across all generations.
    pub fn pending(&self) -> usize {
        self.pending
    }

    /// Clear the tables layer and request a drawing for every renderable
    /// entry of `schema`.
    pub fn render(&mut self, scene: &mut Scene, schema: &[TableRecord]) -> RenderReceipt {
        self.generation += 1;
        scene.clear_tables();

        let mut requested = 0;
        let mut skipped = 0;
        for entry in schema {
            let Some(source) = self.registry.source_for(entry.chairs) else {
                tracing::debug!(
                    table_ref = %entry.table_ref,
                    chairs = entry.chairs,
                    "No drawing registered for seat count, skipping"
                );
                skipped += 1;
                continue;
            };
            self.spawn_load(entry.id.clone(), source.to_string());
            requested += 1;
        }

        tracing::debug!(
            generation = self.generation,
            requested,
            skipped,
            "Render requested"
        );
        RenderReceipt {
            generation: self.generation,
            requested,
            skipped,
            schema: schema.to_vec(),
        }
    }

    fn spawn_load(&mut self, entry_id: String, source: String) {
        let loader = Arc::clone(&self.loader);
        let tx = self.tx.clone();
        let generation = self.generation;
        self.pending += 1;

        self.runtime.spawn(async move {
            let task_source = source.clone();
            let result = match tokio::spawn(async move { loader.load(&task_source).await }).await {
                Ok(result) => result,
                Err(e) => Err(AssetError::Aborted(e.to_string())),
            };
            let _ = tx.send(LoadedTable {
                generation,
                entry_id,
                source,
                result,
            });
        });
    }

    /// Next delivered load, without waiting.
    pub fn try_next(&mut self) -> Option<LoadedTable> {
        let loaded = self.rx.try_recv().ok()?;
        self.pending = self.pending.saturating_sub(1);
        Some(loaded)
    }

    /// Wait for the next delivered load; `None` once nothing is outstanding.
    pub async fn next(&mut self) -> Option<LoadedTable> {
        if self.pending == 0 {
            return None;
        }
        let loaded = self.rx.recv().await?;
        self.pending = self.pending.saturating_sub(1);
        Some(loaded)
    }

    /// Place a finished drawing into the scene. Stale generations, entries
    /// deleted since the render and failed loads are dropped.
    pub fn apply(
        &self,
        scene: &mut Scene,
        schema: &[TableRecord],
        loaded: LoadedTable,
    ) -> Option<NodeId> {
        if loaded.generation != self.generation {
            tracing::debug!(
                generation = loaded.generation,
                current = self.generation,
                "Dropping stale drawing"
            );
            return None;
        }
        let Some(entry) = schema.iter().find(|e| e.id == loaded.entry_id) else {
            tracing::debug!(entry_id = %loaded.entry_id, "Entry removed before its drawing loaded");
            return None;
        };
        if scene.table_for_entry(&entry.id).is_some() {
            return None;
        }

        match loaded.result {
            Ok(drawing) => scene.add_table(self.build_table(drawing, entry)),
            Err(e) => {
                tracing::warn!(
                    table_ref = %entry.table_ref,
                    source = %loaded.source,
                    "Failed to load table drawing: {}",
                    e
                );
                None
            }
        }
    }

    /// Wrap a drawing into a positioned, labelled table group.
    pub fn build_table(&self, drawing: Node, entry: &TableRecord) -> Node {
        let drawing = drawing.recentered();
        let center = Point::default();
        let label = &self.label;

        let text_size = text::measure(&entry.table_ref, label.font_size);
        let text_box = Bounds::centered(center, text_size);
        let text = Node::text(TextSpan {
            content: entry.table_ref.clone(),
            bounds: text_box,
            baseline: center.y + text_size.height / 2.0 - label.baseline_nudge,
            font_family: label.font_family.clone(),
            font_weight: label.font_weight.clone(),
            font_size: label.font_size,
        })
        .named(format!("{LABEL_PREFIX}{}", entry.table_ref))
        .with_style(Style::filled(label.fill.clone()))
        .locked();

        let badge = Node::rect(
            Bounds::centered(center, text_size.padded(label.badge_padding)),
            label.badge_radius,
        )
        .named(format!("{BADGE_PREFIX}{}", entry.table_ref))
        .with_style(Style::filled(label.badge_fill.clone()))
        .locked();

        Node::group(vec![drawing, badge, text])
            .named(format!("{TABLE_PREFIX}{}", entry.table_ref))
            .with_placement(Placement::new(entry.position.into(), entry.rotation))
            .with_table(TableMeta {
                entry_id: entry.id.clone(),
                table_ref: entry.table_ref.clone(),
                chairs: entry.chairs,
            })
    }
}

impl std::fmt::Debug for TableRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TableRenderer")
            .field("registry", &self.registry)
            .field("generation", &self.generation)
            .field("pending", &self.pending)
            .finish()
    }
}
