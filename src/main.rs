use clap::Parser;
use olamaps_gateway::{logging::init_logging, serve, ServerArgs};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; flags and the real environment still apply.
    let dotenv_loaded = dotenv::dotenv().is_ok();

    let args = ServerArgs::parse();
    init_logging(&args.log_level, args.log_json)?;
    info!(dotenv = dotenv_loaded, args = ?args, "Starting Ola Maps gateway");

    let config = args.into_config()?;
    serve(config).await
}
