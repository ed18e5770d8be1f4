//! Pointer and keyboard handling.

use super::FloorEditor;
use crate::scene::NodeId;
use floorkit_core::Point;

/// Selection and drag state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InteractionState {
    #[default]
    Idle,
    Selected { node: NodeId },
    /// Pointer held on a table; `last` is the previous pointer position
    Dragging { node: NodeId, last: Point },
}

impl InteractionState {
    /// The selected table, if any.
    pub fn node(&self) -> Option<NodeId> {
        match self {
            InteractionState::Idle => None,
            InteractionState::Selected { node } | InteractionState::Dragging { node, .. } => {
                Some(*node)
            }
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, InteractionState::Dragging { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    pub fn shift() -> Self {
        Self {
            shift: true,
            ..Self::default()
        }
    }
}

/// Pointer position in surface coordinates plus held modifiers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub point: Point,
    pub modifiers: Modifiers,
}

impl PointerEvent {
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            point: Point::new(x, y),
            modifiers: Modifiers::default(),
        }
    }

    pub fn with_shift(mut self) -> Self {
        self.modifiers.shift = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Delete,
    Other(String),
}

impl Key {
    /// Map a host key name (`"delete"`, `"Delete"`) to a key.
    pub fn from_name(name: &str) -> Self {
        if name.eq_ignore_ascii_case("delete") {
            Key::Delete
        } else {
            Key::Other(name.to_string())
        }
    }
}

impl FloorEditor {
    /// Select the table under the pointer and start dragging it; with shift
    /// held the table is also rotated by one step. Clicking empty floor
    /// clears the selection.
    pub fn pointer_down(&mut self, event: PointerEvent) {
        if let Some(previous) = self.interaction.node() {
            self.scene.set_selected(previous, false);
        }

        let tolerance = self.config.interaction.hit_tolerance;
        let Some(node) = self.scene.table_at(event.point, tolerance) else {
            self.interaction = InteractionState::Idle;
            self.events.selection_changed.emit(None);
            return;
        };

        self.scene.set_selected(node, true);
        self.interaction = InteractionState::Dragging {
            node,
            last: event.point,
        };

        if event.modifiers.shift {
            let step = self.config.interaction.rotation_step;
            if let Some(table) = self.scene.table_mut(node) {
                table.placement.rotation = (table.placement.rotation + step).rem_euclid(360.0);
            }
            self.write_back(node);
        }

        let table_ref = self
            .scene
            .table(node)
            .and_then(|n| n.table.as_ref())
            .map(|meta| meta.table_ref.clone());
        tracing::debug!(?table_ref, "Table selected");
        self.events.selection_changed.emit(table_ref);
    }

    /// Move the dragged table by the pointer delta.
    pub fn pointer_move(&mut self, event: PointerEvent) {
        let InteractionState::Dragging { node, last } = self.interaction else {
            return;
        };
        let delta = event.point - last;
        if let Some(table) = self.scene.table_mut(node) {
            table.placement.translation = table.placement.translation + delta;
        }
        self.interaction = InteractionState::Dragging {
            node,
            last: event.point,
        };
        self.write_back(node);
    }

    /// End a drag; the table stays selected.
    pub fn pointer_up(&mut self, _event: PointerEvent) {
        if let InteractionState::Dragging { node, .. } = self.interaction {
            self.interaction = InteractionState::Selected { node };
        }
    }

    pub fn key_up(&mut self, key: Key) {
        if key == Key::Delete {
            self.remove_selected();
        }
    }

    /// Drop the selection, announcing it if one existed.
    pub(super) fn clear_selection(&mut self) {
        if let Some(node) = self.interaction.node() {
            self.scene.set_selected(node, false);
            self.interaction = InteractionState::Idle;
            self.events.selection_changed.emit(None);
        }
    }

    /// Copy a table node's placement into its schema entry and broadcast the
    /// dirty state.
    fn write_back(&mut self, node: NodeId) {
        let Some(table) = self.scene.table(node) else {
            return;
        };
        let Some(meta) = &table.table else {
            return;
        };
        let placement = table.placement;
        if let Some(entry) = self.schema.iter_mut().find(|e| e.id == meta.entry_id) {
            entry.position = placement.translation.into();
            entry.rotation = placement.rotation;
        }
        self.notify_dirty();
    }
}
