//! Line-based Broadcast Chat Server - Entry Point
//!
//! Binds the TCP listener and accepts connections forever.

use std::env;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use line_chat::ChatServer;

/// Default server address
const DEFAULT_ADDR: &str = "127.0.0.1:12345";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging with environment filter
    // Use RUST_LOG env var to control log level
    // e.g., RUST_LOG=debug or RUST_LOG=line_chat=trace
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("line_chat=info")),
        )
        .init();

    // Get bind address from command line or use default
    let addr = env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_ADDR.to_string());

    let server = match ChatServer::bind(&addr).await {
        Ok(server) => server,
        Err(e) => {
            error!("Error listening: {}", e);
            return Err(e.into());
        }
    };
    info!("Server is listening on {}", server.local_addr()?);

    server.run().await;
    Ok(())
}
