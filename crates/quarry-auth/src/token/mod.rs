//! Bearer token persistence.

pub mod file;
pub mod memory;
pub mod store;

pub use file::FileTokenStore;
pub use memory::MemoryTokenStore;
pub use store::TokenStore;
