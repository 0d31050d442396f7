//! Client handle definition
//!
//! Represents one connected peer: its identity, display name, and the
//! write half of its connection.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{PoisonError, RwLock};

use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::Mutex;

use crate::error::SendError;
use crate::types::{random_name, ClientId, DEFAULT_NAME_LEN};

/// Write half of a client connection
pub type BoxedWriter = Box<dyn AsyncWrite + Send + Unpin>;

/// Connected client handle
///
/// Shared between the owning session (reads, renames, closes) and
/// every broadcasting session (writes). Writes are serialized so two
/// frames never interleave on the wire.
pub struct Client {
    /// Unique identifier for this client
    id: ClientId,
    /// Display name, changed only by the owning session
    name: RwLock<String>,
    /// Server → Client byte stream
    writer: Mutex<BoxedWriter>,
    /// Set once the owning session has closed the connection
    closed: AtomicBool,
}

impl Client {
    /// Create a new client with a random display name
    pub fn new(writer: BoxedWriter) -> Self {
        Self::with_name(random_name(DEFAULT_NAME_LEN), writer)
    }

    /// Create a new client with the given display name
    pub fn with_name(name: impl Into<String>, writer: BoxedWriter) -> Self {
        Self {
            id: ClientId::new(),
            name: RwLock::new(name.into()),
            writer: Mutex::new(writer),
            closed: AtomicBool::new(false),
        }
    }

    pub fn id(&self) -> ClientId {
        self.id
    }

    /// Get the current display name
    pub fn display_name(&self) -> String {
        self.name
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replace the display name, returning the previous one
    pub fn set_display_name(&self, name: String) -> String {
        let mut guard = self.name.write().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *guard, name)
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// Write one frame to this client
    ///
    /// Returns an error if the connection was closed or the write fails.
    pub async fn send(&self, frame: &[u8]) -> Result<(), SendError> {
        let mut writer = self.writer.lock().await;
        if self.is_closed() {
            return Err(SendError::Closed);
        }
        writer.write_all(frame).await?;
        writer.flush().await?;
        Ok(())
    }

    /// Shut down the write half of the connection
    ///
    /// Only the first call does anything; it returns `Ok(true)`. Later
    /// calls return `Ok(false)`.
    pub async fn close(&self) -> std::io::Result<bool> {
        let mut writer = self.writer.lock().await;
        if self.closed.swap(true, Ordering::AcqRel) {
            return Ok(false);
        }
        writer.shutdown().await?;
        Ok(true)
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("id", &self.id)
            .field("name", &self.display_name())
            .field("closed", &self.is_closed())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{duplex, AsyncReadExt};

    #[tokio::test]
    async fn test_client_creation() {
        let (server, _peer) = duplex(64);
        let client = Client::new(Box::new(server));

        assert_eq!(client.display_name().len(), DEFAULT_NAME_LEN);
        assert!(!client.is_closed());
    }

    #[tokio::test]
    async fn test_client_rename() {
        let (server, _peer) = duplex(64);
        let client = Client::with_name("x7Qp", Box::new(server));

        assert_eq!(client.set_display_name("bob".to_string()), "x7Qp");
        assert_eq!(client.set_display_name("carol".to_string()), "bob");
        assert_eq!(client.display_name(), "carol");
    }

    #[tokio::test]
    async fn test_client_send() {
        let (server, mut peer) = duplex(64);
        let client = Client::with_name("x7Qp", Box::new(server));

        client.send(b"hi\n").await.unwrap();

        let mut buf = [0u8; 3];
        peer.read_exact(&mut buf).await.unwrap();
        assert_eq!(&buf, b"hi\n");
    }

    #[tokio::test]
    async fn test_client_close_once() {
        let (server, mut peer) = duplex(64);
        let client = Client::with_name("x7Qp", Box::new(server));

        assert!(client.close().await.unwrap());
        assert!(!client.close().await.unwrap());
        assert!(client.is_closed());

        // Peer sees EOF
        let mut buf = Vec::new();
        assert_eq!(peer.read_to_end(&mut buf).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_send_after_close() {
        let (server, _peer) = duplex(64);
        let client = Client::with_name("x7Qp", Box::new(server));

        client.close().await.unwrap();

        assert!(matches!(client.send(b"late\n").await, Err(SendError::Closed)));
    }

    #[tokio::test]
    async fn test_send_to_dropped_peer_fails() {
        let (server, peer) = duplex(64);
        let client = Client::with_name("x7Qp", Box::new(server));
        drop(peer);

        assert!(matches!(client.send(b"hi\n").await, Err(SendError::Io(_))));
    }
}
