//! Import and export of floor plans.

use super::{FloorEditor, InteractionState};
use crate::error::EditorError;
use crate::export;
use crate::schema::{self, TableRecord};
use serde::{Deserialize, Serialize};

/// Serialized floor: SVG markup of what is rendered plus the full schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanExport {
    pub plan: String,
    pub schema: Vec<TableRecord>,
}

impl FloorEditor {
    /// Replace the floor with the serialized schema array.
    ///
    /// The scene, schema and selection are cleared before parsing, so a
    /// parse failure leaves an empty editor; the dirty baseline is only
    /// replaced on success.
    pub fn import_floor(&mut self, serialized: &str) -> Result<&[TableRecord], EditorError> {
        self.clear_selection();
        self.interaction = InteractionState::Idle;
        self.schema.clear();
        self.scene.discard();
        self.scene.initialize();

        let records = schema::parse_schema(serialized).map_err(|e| {
            tracing::warn!("Rejected floor import: {}", e);
            EditorError::InvalidSchema(e)
        })?;

        self.dirty.capture(&records);
        self.schema = records;
        let receipt = self.redraw();
        tracing::info!(
            tables = self.schema.len(),
            requested = receipt.requested,
            "Floor imported"
        );
        Ok(&self.schema)
    }

    /// Markup of the rendered scene plus the full schema.
    pub fn export_plan(&self) -> PlanExport {
        let plan = export::plan_markup(&self.scene);
        tracing::info!(
            tables = self.schema.len(),
            rendered = self.scene.table_count(),
            "Floor exported"
        );
        PlanExport {
            plan,
            schema: self.schema.clone(),
        }
    }

    /// The schema as a JSON array, as stored in a floor record's `plan-data`.
    pub fn export_schema_json(&self) -> Result<String, EditorError> {
        Ok(schema::serialize_schema(&self.schema)?)
    }
}
