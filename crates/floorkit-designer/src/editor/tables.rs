//! Table operations: insert, delete, rename.

use super::{FloorEditor, InteractionState};
use crate::render::RenderReceipt;
use crate::schema::{TablePosition, TableRecord};

impl FloorEditor {
    /// A ref not used by any table in the schema.
    pub fn generate_ref(&mut self) -> String {
        self.refs
            .generate(self.schema.iter().map(|e| e.table_ref.as_str()))
    }

    /// Place a new `chairs`-seat table centred on `(x, y)`.
    ///
    /// Returns `None` without touching the schema when no drawing is
    /// registered for `chairs`.
    pub fn insert(&mut self, chairs: u32, x: f64, y: f64) -> Option<RenderReceipt> {
        if !self.renderer.registry().supports(chairs) {
            tracing::debug!(chairs, "Unsupported seat count, insert ignored");
            return None;
        }

        let table_ref = self.generate_ref();
        let record = TableRecord::new(table_ref, chairs, TablePosition::new(x, y));
        tracing::debug!(table_ref = %record.table_ref, chairs, x, y, "Table inserted");
        self.schema.push(record);
        self.notify_dirty();
        Some(self.redraw())
    }

    /// Delete the selected table. Does nothing without a selection.
    pub fn remove_selected(&mut self) {
        let Some(node) = self.interaction.node() else {
            tracing::debug!("Delete requested without a selection");
            return;
        };
        let Some(removed) = self.scene.remove_table(node) else {
            self.interaction = InteractionState::Idle;
            return;
        };
        let Some(meta) = removed.table else {
            self.interaction = InteractionState::Idle;
            return;
        };

        self.schema.retain(|e| e.id != meta.entry_id);
        tracing::debug!(table_ref = %meta.table_ref, "Table deleted");
        self.events.table_deleted.emit(meta.table_ref);
        self.interaction = InteractionState::Idle;
        self.notify_dirty();
    }

    /// Change the ref of the table labelled `old` to `new`.
    ///
    /// Returns false, changing nothing, when `old` is unknown, `new` is empty
    /// or `new` already labels another table.
    pub fn rename_ref(&mut self, old: &str, new: &str) -> bool {
        let new = new.trim();
        if new.is_empty() {
            tracing::debug!(old, "Empty ref rejected");
            return false;
        }
        if old != new && self.schema.iter().any(|e| e.table_ref == new) {
            tracing::warn!(old, new, "Ref already in use, rename rejected");
            return false;
        }
        let Some(entry) = self.schema.iter_mut().find(|e| e.table_ref == old) else {
            tracing::debug!(old, "Rename target not found");
            return false;
        };

        entry.table_ref = new.to_string();
        self.redraw();
        self.notify_dirty();
        true
    }
}
