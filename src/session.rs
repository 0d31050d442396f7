//! Connection session
//!
//! Owns one accepted connection end to end: registers a client handle,
//! reads newline-terminated lines, applies commands or broadcasts chat,
//! and on every exit path unregisters the client and closes its
//! connection.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures_util::FutureExt;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, BufReader};
use tokio::net::TcpStream;
use tracing::{debug, error, info};

use crate::client::Client;
use crate::error::AppError;
use crate::message::{ClientMessage, LINE_FEED};
use crate::registry::ClientRegistry;

/// Handle a new TCP connection
pub async fn handle_connection(
    stream: TcpStream,
    registry: Arc<ClientRegistry>,
) -> Result<(), AppError> {
    let peer_addr = stream
        .peer_addr()
        .map(|a| a.to_string())
        .unwrap_or_else(|_| "unknown".to_string());

    debug!("New TCP connection from {}", peer_addr);

    let (reader, writer) = stream.into_split();
    run_session(reader, writer, registry).await
}

/// Run a session over any duplex byte stream
///
/// Returns `Ok(())` when the peer disconnects cleanly and an error when
/// reading fails. Either way the client has already been removed from
/// the registry and its connection closed.
pub async fn run_session<R, W>(
    reader: R,
    writer: W,
    registry: Arc<ClientRegistry>,
) -> Result<(), AppError>
where
    R: AsyncRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send + 'static,
{
    let client = Arc::new(Client::new(Box::new(writer)));
    registry.add(Arc::clone(&client)).await;

    let outcome = AssertUnwindSafe(read_loop(reader, &client, &registry))
        .catch_unwind()
        .await;

    // Unregister before closing so no broadcast picks up a closed handle
    registry.remove(&client).await;
    if let Err(e) = client.close().await {
        debug!("Failed to close connection for {}: {}", client.id(), e);
    }

    let name = client.display_name();
    let id = client.id();
    match outcome {
        Ok(Ok(())) => {
            info!("Connection closed: {name} ({id})");
            Ok(())
        }
        Ok(Err(e)) => {
            info!("Connection closed: {name} ({id}): {e}");
            Err(e)
        }
        Err(_) => {
            error!("Session for {id} panicked");
            Err(AppError::SessionPanicked)
        }
    }
}

/// Read lines until EOF or a read error
async fn read_loop<R>(reader: R, client: &Client, registry: &ClientRegistry) -> Result<(), AppError>
where
    R: AsyncRead + Unpin,
{
    let mut reader = BufReader::new(reader);
    let mut line = Vec::new();

    loop {
        line.clear();
        let n = reader.read_until(LINE_FEED, &mut line).await?;

        // A trailing partial line at EOF is dropped with the connection
        if n == 0 || line.last() != Some(&LINE_FEED) {
            return Ok(());
        }

        match ClientMessage::parse(&line) {
            ClientMessage::Nick(name) => {
                let old = client.set_display_name(name);
                info!("Client renamed from {} to {}", old, client.display_name());
            }
            ClientMessage::UnknownCommand => {
                debug!("Ignoring unknown command from {}", client.id());
            }
            ClientMessage::Chat(text) => {
                debug!(
                    "Received from {}: {}",
                    client.display_name(),
                    String::from_utf8_lossy(text).trim_end()
                );
                registry.broadcast(client, text).await;
            }
        }
    }
}
