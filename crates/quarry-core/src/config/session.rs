//! Session configuration.

use serde::{Deserialize, Serialize};

/// Token persistence and session event settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// File holding the persisted bearer token.
    #[serde(default = "default_token_file")]
    pub token_file: String,
    /// Key under which the token is stored inside the token file.
    #[serde(default = "default_token_key")]
    pub token_key: String,
    /// Capacity of the session event broadcast channel.
    #[serde(default = "default_event_buffer")]
    pub event_buffer: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            token_file: default_token_file(),
            token_key: default_token_key(),
            event_buffer: default_event_buffer(),
        }
    }
}

fn default_token_file() -> String {
    "data/session.json".to_string()
}

fn default_token_key() -> String {
    "token".to_string()
}

fn default_event_buffer() -> usize {
    64
}
