//! todonum - HTTP record store over SQLite
//!
//! Serves CRUD endpoints for the todos and numbers collections plus a
//! combined-create endpoint, backed by a single database file.

use anyhow::Result;
use clap::Parser;
use todonum_server::server::{run_server, ServerArgs};

mod tracing_setup;

#[derive(Parser, Debug)]
#[command(
    name = "todonum",
    author,
    version,
    about = "HTTP record store serving the todos and numbers collections"
)]
struct Cli {
    /// Enable debug logging (RUST_LOG overrides)
    #[arg(long)]
    debug: bool,

    #[command(flatten)]
    server: ServerArgs,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_setup::init(&tracing_setup::TracingConfig { debug: cli.debug })?;

    run_server(cli.server).await
}
