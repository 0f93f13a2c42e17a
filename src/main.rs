//! Begrepsbro CLI entry point.

mod cli;

use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is fine; real env vars still apply.
    let _ = dotenvy::dotenv();

    let args = cli::Cli::parse();
    cli::init_tracing(&args);
    cli::run(args).await
}
