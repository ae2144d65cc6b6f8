//! Token store trait.

use quarry_core::{AccessToken, AppResult};

/// Persists the single bearer token across process restarts.
///
/// Only [`SessionContext`](crate::SessionContext) writes to a store. The
/// operations are synchronous so `logout` never waits on the event loop.
pub trait TokenStore: Send + Sync + std::fmt::Debug {
    /// Read the persisted token, if any.
    fn load(&self) -> AppResult<Option<AccessToken>>;

    /// Replace the persisted token.
    fn save(&self, token: &AccessToken) -> AppResult<()>;

    /// Remove the persisted token. Succeeds when nothing is stored.
    fn clear(&self) -> AppResult<()>;
}
