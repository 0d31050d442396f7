//! Error types for the chat server
//!
//! Defines application-level errors and per-recipient send errors.
//! Uses thiserror for ergonomic error definitions.

use thiserror::Error;

/// Application-level errors
///
/// `Bind` is fatal for the process. Everything else ends a single
/// session and never crosses into another task.
#[derive(Debug, Error)]
pub enum AppError {
    /// Listening endpoint could not be bound (fatal)
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    /// IO error (ends the session)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The session loop panicked; cleanup still ran
    #[error("session panicked")]
    SessionPanicked,
}

/// Message send errors
///
/// Returned when writing a frame to one client fails. Broadcast
/// discards these per recipient.
#[derive(Debug, Error)]
pub enum SendError {
    /// The client's connection was already closed by its session
    #[error("connection closed")]
    Closed,

    /// Writing to the connection failed
    #[error("write failed: {0}")]
    Io(#[from] std::io::Error),
}
