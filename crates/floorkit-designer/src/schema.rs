//! Table schema model
//!
//! The schema is the ordered list of placed tables and the single source of
//! truth for the floor; scene nodes are always rebuilt from it. Records
//! serialize with exactly the keys `id`, `ref`, `chairs`, `position` and
//! `rotation`.

use floorkit_core::Point;
use serde::{Deserialize, Serialize};

/// Table centre on the surface.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TablePosition {
    pub x: f64,
    pub y: f64,
}

impl TablePosition {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<Point> for TablePosition {
    fn from(p: Point) -> Self {
        Self::new(p.x, p.y)
    }
}

impl From<TablePosition> for Point {
    fn from(p: TablePosition) -> Self {
        Point::new(p.x, p.y)
    }
}

/// One placed table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRecord {
    /// Stable unique id, never changes after creation
    pub id: String,
    /// Human-facing label, unique within the schema
    #[serde(rename = "ref")]
    pub table_ref: String,
    /// Seat count, selects the drawing
    pub chairs: u32,
    pub position: TablePosition,
    /// Degrees, clockwise
    pub rotation: f64,
}

impl TableRecord {
    /// A freshly inserted, unrotated table with a new unique id.
    pub fn new(table_ref: impl Into<String>, chairs: u32, position: TablePosition) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            table_ref: table_ref.into(),
            chairs,
            position,
            rotation: 0.0,
        }
    }
}

/// Parse a serialized schema array.
pub fn parse_schema(serialized: &str) -> Result<Vec<TableRecord>, serde_json::Error> {
    serde_json::from_str(serialized)
}

/// Serialize a schema as the `plan-data` JSON array.
pub fn serialize_schema(schema: &[TableRecord]) -> Result<String, serde_json::Error> {
    serde_json::to_string(schema)
}

/// Compares the live schema against the last saved or imported snapshot.
#[derive(Debug, Clone, Default)]
pub struct DirtyTracker {
    baseline: Vec<TableRecord>,
}

impl DirtyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `schema` the new baseline.
    pub fn capture(&mut self, schema: &[TableRecord]) {
        self.baseline = schema.to_vec();
    }

    pub fn baseline(&self) -> &[TableRecord] {
        &self.baseline
    }

    pub fn is_dirty(&self, live: &[TableRecord]) -> bool {
        self.baseline.as_slice() != live
    }
}
