//! Credential storage capability
//!
//! The concrete store the host environment provides (browser storage, a
//! keychain, a test fixture) stays behind this narrow get/set interface;
//! the client never references a global store directly.

use parking_lot::RwLock;

/// Narrow capability interface over the bearer-token store.
///
/// Contract: written on login, read on every outbound request, cleared only
/// by explicit logout or manual clearing.
pub trait TokenStore: Send + Sync {
    /// Current token, if one has been stored.
    fn token(&self) -> Option<String>;

    /// Replace the stored token.
    fn set_token(&self, token: String);

    /// Remove the stored token.
    fn clear(&self);
}

impl std::fmt::Debug for dyn TokenStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("TokenStore")
    }
}

/// Process-local token store.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: RwLock<Option<String>>,
}

impl MemoryTokenStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    fn token(&self) -> Option<String> {
        self.token.read().clone()
    }

    fn set_token(&self, token: String) {
        *self.token.write() = Some(token);
    }

    fn clear(&self) {
        *self.token.write() = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_round_trip() {
        let store = MemoryTokenStore::new();
        assert_eq!(store.token(), None);

        store.set_token("abc123".to_string());
        assert_eq!(store.token().as_deref(), Some("abc123"));

        store.set_token("def456".to_string());
        assert_eq!(store.token().as_deref(), Some("def456"));

        store.clear();
        assert_eq!(store.token(), None);
    }
}
