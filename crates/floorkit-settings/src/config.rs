//! Editor configuration
//!
//! Provides configuration file handling and validation for the floor editor.
//! Supports JSON and TOML file formats; every section falls back to its
//! defaults when omitted, so partial files are valid.
//!
//! Configuration is organized into logical sections:
//! - Grid (floor tile and grid line colours, grid divisions)
//! - Label (table reference label and badge styling)
//! - Interaction (hit tolerance, rotation step)
//! - Assets (seat count to table drawing source)
//! - Events (async receiver buffering)

use crate::error::{SettingsError, SettingsResult};
use floorkit_core::Error;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Background grid settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSettings {
    /// Fill colour of the floor surface
    pub tile_color: String,
    /// Stroke colour of the grid lines
    pub stroke_color: String,
    /// Number of cells along each axis
    pub divisions: u32,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            tile_color: "#F5F5F5".to_string(),
            stroke_color: "#E8E8E8".to_string(),
            divisions: 10,
        }
    }
}

/// Table reference label and badge settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelSettings {
    pub font_family: String,
    pub font_weight: String,
    pub font_size: f64,
    pub fill: String,
    /// Downward shift of the label baseline from the table centre line
    pub baseline_nudge: f64,
    pub badge_padding: f64,
    pub badge_radius: f64,
    pub badge_fill: String,
}

impl Default for LabelSettings {
    fn default() -> Self {
        Self {
            font_family: "Inter".to_string(),
            font_weight: "bold".to_string(),
            font_size: 18.0,
            fill: "black".to_string(),
            baseline_nudge: 4.0,
            badge_padding: 10.0,
            badge_radius: 12.0,
            badge_fill: "#F5F5F5".to_string(),
        }
    }
}

/// Pointer interaction settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionSettings {
    /// Hit-test tolerance in surface pixels
    pub hit_tolerance: f64,
    /// Degrees added per shift-click
    pub rotation_step: f64,
}

impl Default for InteractionSettings {
    fn default() -> Self {
        Self {
            hit_tolerance: 5.0,
            rotation_step: 45.0,
        }
    }
}

/// One registered table drawing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableAssetEntry {
    /// Seat count the drawing represents
    pub chairs: u32,
    /// Asset source path, relative to the asset root
    pub source: String,
}

impl TableAssetEntry {
    pub fn new(chairs: u32, source: impl Into<String>) -> Self {
        Self {
            chairs,
            source: source.into(),
        }
    }
}

/// Table drawing registry settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetSettings {
    /// Directory table drawings are loaded from; built-in drawings when unset
    pub root: Option<PathBuf>,
    pub tables: Vec<TableAssetEntry>,
}

impl Default for AssetSettings {
    fn default() -> Self {
        Self {
            root: None,
            tables: vec![
                TableAssetEntry::new(2, "tables/table-2.svg"),
                TableAssetEntry::new(4, "tables/table-4.svg"),
                TableAssetEntry::new(6, "tables/table-6.svg"),
            ],
        }
    }
}

/// Event channel settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventSettings {
    /// Buffered events per async receiver
    pub channel_capacity: usize,
}

impl Default for EventSettings {
    fn default() -> Self {
        Self {
            channel_capacity: 64,
        }
    }
}

/// Complete editor configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub grid: GridSettings,
    pub label: LabelSettings,
    pub interaction: InteractionSettings,
    pub assets: AssetSettings,
    pub events: EventSettings,
}

impl EditorConfig {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| SettingsError::LoadError(format!("{}: {}", path.display(), e)))?;

        let config: Self = match config_format(path)? {
            ConfigFormat::Json => serde_json::from_str(&content)?,
            ConfigFormat::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        tracing::debug!("Loaded editor config from {}", path.display());
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match config_format(path)? {
            ConfigFormat::Json => serde_json::to_string_pretty(self)?,
            ConfigFormat::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        std::fs::write(path, content)
            .map_err(|e| SettingsError::SaveError(format!("{}: {}", path.display(), e)))?;

        Ok(())
    }

    /// Load the config at the default location, or defaults when absent.
    pub fn load_or_default() -> SettingsResult<Self> {
        let path = default_config_path()?;
        if path.exists() {
            Self::load_from_file(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> floorkit_core::Result<()> {
        if self.grid.divisions == 0 {
            return Err(Error::invalid_value("grid.divisions", "must be > 0"));
        }

        if self.label.font_size.is_nan() || self.label.font_size <= 0.0 {
            return Err(Error::invalid_value("label.font_size", "must be > 0"));
        }

        if self.label.badge_padding < 0.0 || self.label.badge_radius < 0.0 {
            return Err(Error::invalid_value(
                "label.badge_padding",
                "padding and radius must be >= 0",
            ));
        }

        if self.interaction.hit_tolerance.is_nan() || self.interaction.hit_tolerance < 0.0 {
            return Err(Error::invalid_value(
                "interaction.hit_tolerance",
                "must be >= 0",
            ));
        }

        if !self.interaction.rotation_step.is_finite() {
            return Err(Error::invalid_value(
                "interaction.rotation_step",
                "must be finite",
            ));
        }

        for (i, entry) in self.assets.tables.iter().enumerate() {
            if entry.source.trim().is_empty() {
                return Err(Error::invalid_value(
                    format!("assets.tables[{}].source", i),
                    "must not be empty",
                ));
            }
            if self.assets.tables[..i]
                .iter()
                .any(|other| other.chairs == entry.chairs)
            {
                return Err(Error::invalid_value(
                    format!("assets.tables[{}].chairs", i),
                    format!("seat count {} registered twice", entry.chairs),
                ));
            }
        }

        Ok(())
    }
}

enum ConfigFormat {
    Json,
    Toml,
}

fn config_format(path: &Path) -> SettingsResult<ConfigFormat> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(ConfigFormat::Json),
        Some("toml") => Ok(ConfigFormat::Toml),
        other => Err(SettingsError::UnsupportedFormat(
            other.unwrap_or("<none>").to_string(),
        )),
    }
}

/// Platform config location: `<config dir>/floorkit/config.toml`.
pub fn default_config_path() -> SettingsResult<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join("floorkit").join("config.toml"))
        .ok_or_else(|| SettingsError::ConfigDirectory("no config directory on this platform".into()))
}
