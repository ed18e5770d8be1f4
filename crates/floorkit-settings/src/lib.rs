//! FloorKit Settings Crate
//!
//! Handles editor configuration: grid and label styling, interaction
//! tolerances, the seat-count asset registry and event channel sizing.

pub mod config;
pub mod error;

pub use config::{
    default_config_path, AssetSettings, EditorConfig, EventSettings, GridSettings,
    InteractionSettings, LabelSettings, TableAssetEntry,
};
pub use error::{SettingsError, SettingsResult};
