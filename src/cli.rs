//! Command line front end.

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use floorkit_designer::{FloorEditor, FloorRecord, FloorStore, Surface};
use floorkit_settings::EditorConfig;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Editor configuration file (.toml or .json)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render a schema file to an SVG plan
    Render {
        #[command(flatten)]
        floor: FloorArgs,

        /// Output SVG file; stdout when omitted
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Add a table to a schema file
    Add {
        #[command(flatten)]
        floor: FloorArgs,

        /// Seat count
        #[arg(long)]
        chairs: u32,

        #[arg(long)]
        x: f64,

        #[arg(long)]
        y: f64,
    },
    /// Manage saved floors
    Store {
        /// Floor store file
        #[arg(long, default_value = "floors.json")]
        file: PathBuf,

        #[command(subcommand)]
        action: StoreAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum StoreAction {
    /// List saved floors
    List,
    /// Render a schema file and save it as a new floor
    Save {
        #[command(flatten)]
        floor: FloorArgs,

        #[arg(long)]
        name: String,
    },
    /// Print the schema of a saved floor
    Show {
        #[arg(long)]
        id: String,
    },
    /// Delete a saved floor
    Remove {
        #[arg(long)]
        id: String,
    },
}

#[derive(Args, Debug, Clone)]
pub struct FloorArgs {
    /// Schema file (JSON array of tables)
    #[arg(long)]
    pub schema: PathBuf,

    /// Directory holding table drawings; built-in drawings when omitted
    #[arg(long)]
    pub assets: Option<PathBuf>,

    #[arg(long, default_value_t = 800.0)]
    pub width: f64,

    #[arg(long, default_value_t = 600.0)]
    pub height: f64,
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => EditorConfig::load_from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => EditorConfig::load_or_default()?,
    };

    match cli.command {
        Command::Render { floor, out } => {
            let editor = open_floor(&floor, config).await?;
            let plan = editor.export_plan().plan;
            match out {
                Some(path) => {
                    std::fs::write(&path, plan)
                        .with_context(|| format!("writing {}", path.display()))?;
                    info!("Plan written to {}", path.display());
                }
                None => println!("{plan}"),
            }
        }
        Command::Add {
            floor,
            chairs,
            x,
            y,
        } => {
            let mut editor = open_floor(&floor, config).await?;
            if editor.insert(chairs, x, y).is_none() {
                bail!("no table drawing registered for {chairs} seats");
            }
            let table_ref = editor
                .schema()
                .last()
                .map(|e| e.table_ref.clone())
                .unwrap_or_default();
            std::fs::write(&floor.schema, editor.export_schema_json()?)
                .with_context(|| format!("writing {}", floor.schema.display()))?;
            println!("{table_ref}");
        }
        Command::Store { file, action } => run_store(&file, action, config).await?,
    }
    Ok(())
}

async fn run_store(file: &Path, action: StoreAction, config: EditorConfig) -> anyhow::Result<()> {
    let mut store = FloorStore::load(file)?;
    match action {
        StoreAction::List => {
            for floor in store.list() {
                let tables = floor.tables.as_ref().map_or(0, Vec::len);
                println!("{}\t{}\t{} tables", floor.id, floor.name, tables);
            }
        }
        StoreAction::Save { floor, name } => {
            let editor = open_floor(&floor, config).await?;
            let record = FloorRecord::from_export(name, &editor.export_plan())?;
            let id = record.id.clone();
            store.create(record)?;
            println!("{id}");
        }
        StoreAction::Show { id } => {
            let Some(floor) = store.get(&id) else {
                bail!("no floor with id {id}");
            };
            println!("{}", serde_json::to_string_pretty(&floor.schema()?)?);
        }
        StoreAction::Remove { id } => {
            if !store.remove(&id)? {
                bail!("no floor with id {id}");
            }
        }
    }
    Ok(())
}

/// Editor holding the schema file's tables with every drawing loaded. A
/// missing schema file is an empty floor.
async fn open_floor(floor: &FloorArgs, mut config: EditorConfig) -> anyhow::Result<FloorEditor> {
    if let Some(assets) = &floor.assets {
        config.assets.root = Some(assets.clone());
    }
    let serialized = match std::fs::read_to_string(&floor.schema) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => "[]".to_string(),
        Err(e) => {
            return Err(e).with_context(|| format!("reading {}", floor.schema.display()));
        }
    };

    let mut editor =
        FloorEditor::with_default_assets(Surface::new(floor.width, floor.height), config)?;
    editor
        .import_floor(&serialized)
        .with_context(|| format!("parsing {}", floor.schema.display()))?;
    let rendered = editor.settle().await;
    info!(
        tables = editor.schema().len(),
        rendered,
        "Floor loaded from {}",
        floor.schema.display()
    );
    Ok(editor)
}
