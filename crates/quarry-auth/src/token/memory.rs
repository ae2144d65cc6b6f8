//! In-memory token store for tests and ephemeral runs.

use parking_lot::Mutex;

use quarry_core::{AccessToken, AppResult};

use super::store::TokenStore;

/// Token store that forgets everything when the process exits.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<AccessToken>>,
}

impl MemoryTokenStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that already holds `token`.
    pub fn with_token(token: AccessToken) -> Self {
        Self {
            token: Mutex::new(Some(token)),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> AppResult<Option<AccessToken>> {
        Ok(self.token.lock().clone())
    }

    fn save(&self, token: &AccessToken) -> AppResult<()> {
        *self.token.lock() = Some(token.clone());
        Ok(())
    }

    fn clear(&self) -> AppResult<()> {
        self.token.lock().take();
        Ok(())
    }
}
