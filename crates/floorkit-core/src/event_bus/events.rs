//! Notification channels published by the floor editor.

use super::channel::{Channel, ChannelConfig};

/// The three notifications a floor editor emits.
#[derive(Debug)]
pub struct EditorEvents {
    /// Ref of the newly selected table, or `None` when the selection is cleared.
    pub selection_changed: Channel<Option<String>>,
    /// Whether the live schema differs from the baseline.
    pub dirty_changed: Channel<bool>,
    /// Ref of a table that was just deleted.
    pub table_deleted: Channel<String>,
}

impl EditorEvents {
    pub fn new() -> Self {
        Self::with_config(&ChannelConfig::default())
    }

    pub fn with_config(config: &ChannelConfig) -> Self {
        Self {
            selection_changed: Channel::with_config("selection-changed", config),
            dirty_changed: Channel::with_config("dirty-changed", config),
            table_deleted: Channel::with_config("table-deleted", config),
        }
    }

    /// Drop every registered listener on all channels.
    pub fn clear_all(&self) {
        self.selection_changed.clear();
        self.dirty_changed.clear();
        self.table_deleted.clear();
    }
}

impl Default for EditorEvents {
    fn default() -> Self {
        Self::new()
    }
}
