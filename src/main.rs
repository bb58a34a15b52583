use anyhow::Result;
use pika::cli;

#[tokio::main]
async fn main() -> Result<()> {
    cli::run().await
}
