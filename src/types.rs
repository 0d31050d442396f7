//! Basic type definitions for the chat server
//!
//! Provides:
//! - `ClientId`: UUID-based identity of a connected client handle
//! - `random_name`: random alphanumeric display names for new clients

use rand::distributions::Alphanumeric;
use rand::Rng;
use uuid::Uuid;

/// Length of the display name a client gets on connect
pub const DEFAULT_NAME_LEN: usize = 4;

/// Unique client identifier (newtype pattern)
///
/// Registry key for a client handle. Display names are not unique and
/// can change, so routing never uses them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClientId(pub Uuid);

impl ClientId {
    /// Create a new random client ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ClientId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ClientId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Generate a display name of exactly `length` characters from `[a-zA-Z0-9]`
///
/// Characters are drawn uniformly with replacement. Collisions between
/// clients are allowed.
pub fn random_name(length: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_id_unique() {
        let id1 = ClientId::new();
        let id2 = ClientId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_random_name_length() {
        assert_eq!(random_name(DEFAULT_NAME_LEN).len(), 4);
        assert_eq!(random_name(32).len(), 32);
    }

    #[test]
    fn test_random_name_empty() {
        assert_eq!(random_name(0), "");
    }

    #[test]
    fn test_random_name_alphabet() {
        let name = random_name(256);
        assert!(name.chars().all(|c| c.is_ascii_alphanumeric()));
    }
}
