//! Floor record store
//!
//! Saved floors are kept as one JSON array in a single file. Each record
//! carries the exported plan markup, the schema as a JSON string under
//! `plan-data`, and an optional per-table summary for booking systems.
//! Every mutation is written through to disk.

use crate::editor::PlanExport;
use crate::error::{StoreError, StoreResult};
use crate::schema::{self, TableRecord};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Seat summary of one table on a saved floor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSummary {
    pub id: String,
    pub floor_id: String,
    #[serde(rename = "ref")]
    pub table_ref: String,
    pub max_count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloorRecord {
    pub id: String,
    pub name: String,
    /// Exported SVG markup
    pub plan: String,
    /// Schema JSON array
    #[serde(rename = "plan-data")]
    pub plan_data: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tables: Option<Vec<TableSummary>>,
}

impl FloorRecord {
    /// Record for a freshly exported floor, with a new id.
    pub fn from_export(name: impl Into<String>, export: &PlanExport) -> StoreResult<Self> {
        let id = uuid::Uuid::new_v4().to_string();
        let tables = export
            .schema
            .iter()
            .map(|entry| TableSummary {
                id: entry.id.clone(),
                floor_id: id.clone(),
                table_ref: entry.table_ref.clone(),
                max_count: entry.chairs,
            })
            .collect();
        Ok(Self {
            plan_data: schema::serialize_schema(&export.schema)?,
            id,
            name: name.into(),
            plan: export.plan.clone(),
            tables: Some(tables),
        })
    }

    /// Parsed `plan-data`.
    pub fn schema(&self) -> StoreResult<Vec<TableRecord>> {
        Ok(schema::parse_schema(&self.plan_data)?)
    }
}

#[derive(Debug, Clone)]
pub struct FloorStore {
    path: PathBuf,
    floors: Vec<FloorRecord>,
}

impl FloorStore {
    /// Open the store at `path`; a missing file is an empty store.
    pub fn load(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref().to_path_buf();
        let floors = match std::fs::read_to_string(&path) {
            Ok(content) if content.trim().is_empty() => Vec::new(),
            Ok(content) => serde_json::from_str(&content)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(source) => return Err(StoreError::Io { path, source }),
        };
        tracing::debug!(floors = floors.len(), "Opened floor store {}", path.display());
        Ok(Self { path, floors })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write every record to disk.
    pub fn save(&self) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }
        let content = serde_json::to_string_pretty(&self.floors)?;
        std::fs::write(&self.path, content).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })
    }

    pub fn create(&mut self, record: FloorRecord) -> StoreResult<()> {
        if self.get(&record.id).is_some() {
            return Err(StoreError::Duplicate(record.id));
        }
        tracing::info!(id = %record.id, name = %record.name, "Floor created");
        self.floors.push(record);
        self.save()
    }

    /// Replace the record with the same id. Returns false when there is none.
    pub fn update(&mut self, record: FloorRecord) -> StoreResult<bool> {
        let Some(slot) = self.floors.iter_mut().find(|f| f.id == record.id) else {
            tracing::debug!(id = %record.id, "Update of unknown floor ignored");
            return Ok(false);
        };
        *slot = record;
        self.save()?;
        Ok(true)
    }

    pub fn get(&self, id: &str) -> Option<&FloorRecord> {
        self.floors.iter().find(|f| f.id == id)
    }

    /// Delete the record with `id`. Returns false when there is none.
    pub fn remove(&mut self, id: &str) -> StoreResult<bool> {
        let before = self.floors.len();
        self.floors.retain(|f| f.id != id);
        if self.floors.len() == before {
            return Ok(false);
        }
        tracing::info!(id, "Floor removed");
        self.save()?;
        Ok(true)
    }

    pub fn list(&self) -> &[FloorRecord] {
        &self.floors
    }
}
