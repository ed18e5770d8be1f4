use clap::Parser;
use floorkit::cli::{self, Cli};
use floorkit::init_logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.log_json)?;
    tracing::debug!("floorkit {} ({})", floorkit::VERSION, floorkit::BUILD_DATE);

    cli::run(cli).await
}
