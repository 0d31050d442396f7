//! Client registry
//!
//! The set of live client handles, keyed by `ClientId`. Any number of
//! broadcasts read the set together; add and remove wait for in-flight
//! broadcasts and block new ones until they finish.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::client::Client;
use crate::message::chat_frame;
use crate::types::ClientId;

/// Registry of connected clients
#[derive(Debug, Default)]
pub struct ClientRegistry {
    /// All registered clients: ClientId -> Client
    clients: RwLock<HashMap<ClientId, Arc<Client>>>,
}

impl ClientRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a fully constructed client
    pub async fn add(&self, client: Arc<Client>) {
        let id = client.id();
        let name = client.display_name();
        let total = {
            let mut clients = self.clients.write().await;
            clients.insert(id, client);
            clients.len()
        };
        info!("Client added: {} ({})", name, id);
        debug!("Total clients: {}", total);
    }

    /// Unregister a client
    ///
    /// Removing a client that is not registered is a no-op.
    pub async fn remove(&self, client: &Client) {
        let (removed, total) = {
            let mut clients = self.clients.write().await;
            let removed = clients.remove(&client.id()).is_some();
            (removed, clients.len())
        };
        if removed {
            let name = client.display_name();
            info!("Client removed: {} ({})", name, client.id());
            debug!("Total clients: {}", total);
        }
    }

    /// Send `line` from `sender` to every other registered client
    ///
    /// The frame is `"<sender name>: <line>"`. Each recipient is written
    /// to independently: a failed write is logged and skipped, never
    /// reported to the sender and never removes the recipient.
    pub async fn broadcast(&self, sender: &Client, line: &[u8]) {
        let frame = chat_frame(&sender.display_name(), line);
        let sender_id = sender.id();

        let clients = self.clients.read().await;
        let mut delivered = 0usize;
        let mut failed = 0usize;

        for (id, client) in clients.iter() {
            if *id == sender_id {
                continue;
            }
            match client.send(&frame).await {
                Ok(()) => delivered += 1,
                Err(e) => {
                    failed += 1;
                    debug!("Broadcast to {} failed: {}", id, e);
                }
            }
        }

        debug!("Broadcast from {sender_id}: delivered {delivered}, failed {failed}");
    }

    /// Number of registered clients
    pub async fn len(&self) -> usize {
        self.clients.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.clients.read().await.is_empty()
    }

    /// Check if a client is registered
    pub async fn contains(&self, id: ClientId) -> bool {
        self.clients.read().await.contains_key(&id)
    }
}
