//! The Wordspy server daemon.
//!
//! Binds the address given as the first argument (default
//! `0.0.0.0:8080`) and serves rooms until terminated. Log verbosity is
//! controlled with `RUST_LOG`.

use tracing_subscriber::EnvFilter;

use wordspy::{WordspyError, WordspyServer};

#[tokio::main]
async fn main() -> Result<(), WordspyError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let addr = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "0.0.0.0:8080".to_string());

    let server = WordspyServer::builder().bind(&addr).build().await?;
    if let Ok(local) = server.local_addr() {
        tracing::info!(addr = %local, "wordspyd listening");
    }
    server.run().await
}
