//! Layered scene
//!
//! The scene owns two ordered layers sized to the host surface: `bg` (floor
//! tile and grid, drawn first) and `floor-plan` (table groups, drawn on top
//! and the active insertion target). Table groups are indexed by the schema
//! entry they were built from so lookups never parse node names.

mod node;

pub use hit_test::HitResult;
pub use node::{Node, NodeId, NodeKind, Placement, Style, TableMeta, TextSpan};

use floorkit_core::{Bounds, Point};
use floorkit_settings::GridSettings;
use std::collections::HashMap;

/// Drawing area the editor is attached to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Surface {
    pub width: f64,
    pub height: f64,
}

impl Surface {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(0.0, 0.0, self.width, self.height)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerKind {
    Background,
    Tables,
}

impl LayerKind {
    /// Layer name, also used as the group id in exported markup.
    pub fn name(&self) -> &'static str {
        match self {
            LayerKind::Background => "bg",
            LayerKind::Tables => "floor-plan",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Layer {
    kind: LayerKind,
    nodes: Vec<Node>,
}

impl Layer {
    fn new(kind: LayerKind) -> Self {
        Self {
            kind,
            nodes: Vec::new(),
        }
    }

    pub fn kind(&self) -> LayerKind {
        self.kind
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// Top-level nodes in draw order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct Scene {
    surface: Surface,
    grid: GridSettings,
    layers: Vec<Layer>,
    active: LayerKind,
    next_id: u64,
    table_index: HashMap<String, NodeId>,
}

impl Scene {
    /// An uninitialized scene with no layers.
    pub fn new(surface: Surface, grid: GridSettings) -> Self {
        Self {
            surface,
            grid,
            layers: Vec::new(),
            active: LayerKind::Tables,
            next_id: 1,
            table_index: HashMap::new(),
        }
    }

    pub fn surface(&self) -> Surface {
        self.surface
    }

    /// Create missing layers, empty both, draw the background and make the
    /// tables layer active.
    pub fn initialize(&mut self) {
        if self.layer(LayerKind::Background).is_none() {
            self.layers.insert(0, Layer::new(LayerKind::Background));
        }
        if self.layer(LayerKind::Tables).is_none() {
            self.layers.push(Layer::new(LayerKind::Tables));
        }
        for layer in &mut self.layers {
            layer.nodes.clear();
        }
        self.table_index.clear();
        self.draw_background();
        self.active = LayerKind::Tables;
        tracing::debug!(
            width = self.surface.width,
            height = self.surface.height,
            "Scene initialized"
        );
    }

    /// Remove both layers and everything in them.
    pub fn discard(&mut self) {
        self.layers.clear();
        self.table_index.clear();
    }

    /// Replace the background layer with the floor tile and grid.
    pub fn draw_background(&mut self) {
        let Surface { width, height } = self.surface;
        let divisions = self.grid.divisions.max(1);
        let (step_x, step_y) = (width / divisions as f64, height / divisions as f64);

        let mut nodes = Vec::with_capacity(1 + 2 * (divisions as usize + 1));
        nodes.push(
            Node::rect(self.surface.bounds(), 0.0)
                .named("floor-tile")
                .with_style(Style::filled(self.grid.tile_color.clone())),
        );
        for i in 0..=divisions {
            let x = step_x * i as f64;
            nodes.push(
                Node::line(Point::new(x, 0.0), Point::new(x, height))
                    .with_style(Style::stroked(self.grid.stroke_color.clone(), 1.0))
                    .locked(),
            );
        }
        for i in 0..=divisions {
            let y = step_y * i as f64;
            nodes.push(
                Node::line(Point::new(0.0, y), Point::new(width, y))
                    .with_style(Style::stroked(self.grid.stroke_color.clone(), 1.0))
                    .locked(),
            );
        }

        for node in &mut nodes {
            self.assign_ids(node);
        }
        match self.layer_mut(LayerKind::Background) {
            Some(layer) => layer.nodes = nodes,
            None => tracing::warn!("Background drawn before scene initialization"),
        }
    }

    /// Layers in draw order.
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn layer(&self, kind: LayerKind) -> Option<&Layer> {
        self.layers.iter().find(|l| l.kind == kind)
    }

    fn layer_mut(&mut self, kind: LayerKind) -> Option<&mut Layer> {
        self.layers.iter_mut().find(|l| l.kind == kind)
    }

    pub(crate) fn active_layer(&self) -> LayerKind {
        self.active
    }

    /// Empty the tables layer.
    pub fn clear_tables(&mut self) {
        if let Some(layer) = self.layer_mut(LayerKind::Tables) {
            layer.nodes.clear();
        }
        self.table_index.clear();
    }

    /// Append a table group to the active layer. Returns `None` when the
    /// scene has not been initialized.
    pub fn add_table(&mut self, mut node: Node) -> Option<NodeId> {
        self.assign_ids(&mut node);
        let id = node.id;
        let entry_id = node.table.as_ref().map(|meta| meta.entry_id.clone());
        let layer = self.layer_mut(self.active_layer())?;
        layer.nodes.push(node);
        if let Some(entry_id) = entry_id {
            self.table_index.insert(entry_id, id);
        }
        Some(id)
    }

    /// Detach a top-level table group.
    pub fn remove_table(&mut self, id: NodeId) -> Option<Node> {
        let layer = self.layer_mut(LayerKind::Tables)?;
        let index = layer.nodes.iter().position(|n| n.id == id)?;
        let node = layer.nodes.remove(index);
        if let Some(meta) = &node.table {
            self.table_index.remove(&meta.entry_id);
        }
        Some(node)
    }

    pub fn tables(&self) -> impl Iterator<Item = &Node> {
        self.layer(LayerKind::Tables)
            .into_iter()
            .flat_map(|l| l.nodes.iter())
            .filter(|n| n.is_table())
    }

    pub fn table_count(&self) -> usize {
        self.table_index.len()
    }

    pub fn table(&self, id: NodeId) -> Option<&Node> {
        self.layer(LayerKind::Tables)?
            .nodes
            .iter()
            .find(|n| n.id == id)
    }

    pub fn table_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.layer_mut(LayerKind::Tables)?
            .nodes
            .iter_mut()
            .find(|n| n.id == id)
    }

    /// Node built from the schema entry with id `entry_id`.
    pub fn table_for_entry(&self, entry_id: &str) -> Option<NodeId> {
        self.table_index.get(entry_id).copied()
    }

    /// Table group whose label is `table_ref`.
    pub fn table_by_ref(&self, table_ref: &str) -> Option<&Node> {
        self.tables().find(|n| {
            n.table
                .as_ref()
                .is_some_and(|meta| meta.table_ref == table_ref)
        })
    }

    pub fn set_selected(&mut self, id: NodeId, selected: bool) {
        if let Some(node) = self.table_mut(id) {
            node.selected = selected;
        }
    }

    /// Bounds of the highlighted table, for drawing the selection box.
    pub fn selection_bounds(&self) -> Option<Bounds> {
        self.tables()
            .find(|n| n.selected)
            .and_then(Node::bounds_in_parent)
    }

    fn assign_ids(&mut self, node: &mut Node) {
        node.id = NodeId(self.next_id);
        self.next_id += 1;
        if let NodeKind::Group(children) = &mut node.kind {
            for child in children {
                self.assign_ids(child);
            }
        }
    }
}
