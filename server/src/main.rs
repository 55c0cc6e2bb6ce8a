use std::process::ExitCode;

use clap::Parser;
use shopping_list_server::{Config, ItemStore};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> ExitCode {
    let config = Config::parse();
    tracing_subscriber::fmt()
        .with_env_filter(config.log_filter())
        .init();

    let store = ItemStore::new(config.database.clone());
    if let Err(err) = store.initialize().await {
        tracing::error!(error = %err, path = %store.path().display(), "failed to initialize database");
        return ExitCode::FAILURE;
    }
    tracing::debug!(path = %store.path().display(), "database initialized");

    let addr = config.addr();
    let listener = match TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!(error = %err, %addr, "failed to bind listener");
            return ExitCode::FAILURE;
        }
    };
    tracing::info!(%addr, database = %store.path().display(), "listening");

    if let Err(err) = shopping_list_server::run(listener, store).await {
        tracing::error!(error = %err, "server stopped");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
