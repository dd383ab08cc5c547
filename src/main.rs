use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use clipstat::cli::{commands, Cli};
use clipstat::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing; stdout is reserved for the report
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("clipstat=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let config = cli.apply(config);

    commands::scrape(&cli, config).await?;

    Ok(())
}
