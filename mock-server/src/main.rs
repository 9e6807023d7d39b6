use std::path::PathBuf;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let port = std::env::var("PORT").unwrap_or_else(|_| "3002".to_string());
    let contacts = match std::env::var_os("CONTACTS_SEED") {
        Some(path) => mock_server::load_seed(&PathBuf::from(path)).await?,
        None => Vec::new(),
    };

    let addr = format!("127.0.0.1:{port}");
    let listener = TcpListener::bind(&addr).await?;
    info!(%addr, "listening");
    mock_server::run_with(listener, contacts).await?;
    Ok(())
}
