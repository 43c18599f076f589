use anyhow::Result;
use clap::Parser;
use weather_spark::{cli::Cli, logging};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.log_file.as_deref())?;
    weather_spark::run(cli).await
}
