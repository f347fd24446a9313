use std::sync::Arc;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use chirpy::app::{self, AppState};
use chirpy::{Config, Server};

#[tokio::main]
async fn main() -> Result<(), chirpy::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::parse();
    info!(
        root = %config.filepath_root.display(),
        platform = %config.platform,
        "serving files from {} on port {}",
        config.filepath_root.display(),
        config.port,
    );

    let addr = config.socket_addr();
    let state = Arc::new(AppState::in_memory(config));

    Server::bind(addr).serve(app::router(state)).await
}
