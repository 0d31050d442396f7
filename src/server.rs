//! ChatServer acceptor
//!
//! Binds the listening socket and spawns one independent session task
//! per accepted connection. All sessions share a single registry.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{debug, error, info};

use crate::error::AppError;
use crate::registry::ClientRegistry;
use crate::session::handle_connection;

/// The listening chat server
pub struct ChatServer {
    listener: TcpListener,
    registry: Arc<ClientRegistry>,
}

impl ChatServer {
    /// Bind the listening endpoint with a fresh registry
    pub async fn bind(addr: &str) -> Result<Self, AppError> {
        Self::bind_with_registry(addr, Arc::new(ClientRegistry::new())).await
    }

    /// Bind the listening endpoint sharing an existing registry
    pub async fn bind_with_registry(
        addr: &str,
        registry: Arc<ClientRegistry>,
    ) -> Result<Self, AppError> {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| AppError::Bind {
                addr: addr.to_string(),
                source,
            })?;
        Ok(Self { listener, registry })
    }

    /// Address actually bound (useful with port 0)
    pub fn local_addr(&self) -> Result<SocketAddr, AppError> {
        Ok(self.listener.local_addr()?)
    }

    pub fn registry(&self) -> Arc<ClientRegistry> {
        Arc::clone(&self.registry)
    }

    /// Run the accept loop forever
    ///
    /// A failed accept is logged and the loop continues; existing
    /// sessions are unaffected.
    pub async fn run(self) {
        loop {
            match self.listener.accept().await {
                Ok((stream, addr)) => {
                    info!("New connection from {}", addr);
                    let registry = Arc::clone(&self.registry);

                    // Session errors end only that session
                    tokio::spawn(async move {
                        if let Err(e) = handle_connection(stream, registry).await {
                            debug!("Session from {} ended with error: {}", addr, e);
                        }
                    });
                }
                Err(e) => {
                    error!("Error accepting connection: {}", e);
                }
            }
        }
    }
}
