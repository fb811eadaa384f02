use clap::Parser;
use color_eyre::eyre::Result;
use tracing_subscriber::EnvFilter;

use cfagent::cli::Cli;
use cfagent::config::AgentConfig;
use cfagent::{orchestrator, output};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    // stdout carries the metric protocol; everything else goes to stderr.
    let filter = if cli.verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("cfagent=debug"))
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = AgentConfig::from_cli(cli)?;
    let result = orchestrator::collect(&config).await?;

    print!("{}", output::render(&result));

    Ok(())
}
