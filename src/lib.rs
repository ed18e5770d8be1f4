//! # FloorKit
//!
//! Restaurant floor-plan editor. Operators place tables of different seat
//! counts onto a grid, move, rotate, relabel and delete them, and export the
//! result as an SVG plan plus a reloadable table schema.
//!
//! ## Architecture
//!
//! FloorKit is organized as a workspace with multiple crates:
//!
//! 1. **floorkit-core** - Geometry, error types, typed event channels
//! 2. **floorkit-settings** - Editor configuration (JSON/TOML)
//! 3. **floorkit-designer** - Scene, render pipeline, interaction, export, floor store
//! 4. **floorkit** - Command line front end that integrates all crates

pub mod cli;

pub use floorkit_core::{Bounds, EditorEvents, Error, Point, Result, Size};
pub use floorkit_designer as designer;
pub use floorkit_designer::{
    FloorEditor, FloorRecord, FloorStore, Key, PlanExport, PointerEvent, RefGenerator, Surface,
    TableRecord,
};
pub use floorkit_settings::EditorConfig;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("FLOORKIT_BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Human-readable output goes to stderr so plan markup written to stdout
/// stays clean; `json` switches to one JSON object per event. `RUST_LOG`
/// overrides the default `info` level.
pub fn init_logging(json: bool) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(env_filter);
    if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()?;
    } else {
        registry
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_level(true)
                    .with_line_number(true),
            )
            .try_init()?;
    }

    Ok(())
}
