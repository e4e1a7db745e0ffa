use aqi_dashboard::cli::Cli;
use anyhow::Result;
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    aqi_dashboard::run(cli).await
}
