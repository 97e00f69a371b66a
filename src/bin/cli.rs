// src/bin/cli.rs
use apocrypha_scrape::cli;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    cli::run().await
}
