//! Line-based Broadcast Chat Server Library
//!
//! A minimal TCP chat server built on tokio: every newline-terminated
//! line a client sends is relayed to all other connected clients as
//! `"<name>: <line>"`.
//!
//! # Features
//! - Random 4-character display names on connect
//! - `/nick <name>` renaming
//! - Best-effort broadcast to everyone but the sender
//! - Disconnection handling
//!
//! # Architecture
//! - `ClientRegistry` is the shared set of live clients behind a
//!   reader/writer lock: broadcasts run in parallel, add/remove are exclusive
//! - Each connection runs its own session task that owns its client handle
//! - The registry is created once and passed to every session as `Arc`
//!
//! # Example
//! ```ignore
//! use line_chat::ChatServer;
//!
//! #[tokio::main]
//! async fn main() {
//!     let server = ChatServer::bind("127.0.0.1:12345").await.unwrap();
//!     server.run().await;
//! }
//! ```

pub mod client;
pub mod error;
pub mod message;
pub mod registry;
pub mod server;
pub mod session;
pub mod types;

// Re-export main types for convenience
pub use client::Client;
pub use error::{AppError, SendError};
pub use message::ClientMessage;
pub use registry::ClientRegistry;
pub use server::ChatServer;
pub use session::{handle_connection, run_session};
pub use types::{random_name, ClientId};
