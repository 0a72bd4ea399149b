//! LocalStorage access.

use crate::gateway::TokenStore;

/// Static access to `window.localStorage`. Every method degrades to a no-op
/// when storage is unavailable (private mode, no window).
pub struct LocalStorage;

impl LocalStorage {
    /// The page's `localStorage`, if the browser exposes one.
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }

    /// Reads the string stored under `key`.
    ///
    /// # Returns
    /// - `Some(String)` when the key exists
    /// - `None` when it is missing or storage is unavailable
    pub fn get(key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok()?
    }

    /// Stores `value` under `key`.
    ///
    /// # Arguments
    /// - `key`: storage key
    /// - `value`: string to store
    ///
    /// # Returns
    /// - `true` when the write succeeded
    /// - `false` when storage is unavailable or full
    pub fn set(key: &str, value: &str) -> bool {
        Self::storage()
            .and_then(|s| s.set_item(key, value).ok())
            .is_some()
    }

    /// Removes `key`.
    ///
    /// # Arguments
    /// - `key`: storage key to remove
    ///
    /// # Returns
    /// - `true` when the removal succeeded
    /// - `false` when storage is unavailable
    pub fn delete(key: &str) -> bool {
        Self::storage()
            .and_then(|s| s.remove_item(key).ok())
            .is_some()
    }
}

/// Bearer token kept under a single localStorage key.
#[derive(Debug, Clone, Copy)]
pub struct BrowserTokenStore {
    key: &'static str,
}

impl BrowserTokenStore {
    /// Token store backed by `key`.
    ///
    /// # Arguments
    /// - `key`: localStorage key, `token` in the running app
    pub fn new(key: &'static str) -> Self {
        Self { key }
    }
}

impl TokenStore for BrowserTokenStore {
    /// Empty strings count as no token.
    fn load(&self) -> Option<String> {
        LocalStorage::get(self.key).filter(|t| !t.is_empty())
    }

    /// A failed write is logged; the session keeps its in-memory identity.
    fn save(&self, token: &str) {
        if !LocalStorage::set(self.key, token) {
            tracing::warn!(key = self.key, "failed to persist token");
        }
    }

    fn clear(&self) {
        LocalStorage::delete(self.key);
    }
}
