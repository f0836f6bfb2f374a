pub mod error_handling;
pub mod errors;
pub mod formatting;
pub mod kv_store;
pub mod oauth;
pub mod token_store;

// Re-export commonly used types
pub use errors::{AuthError, ConfigError, StoreError};
pub use kv_store::{KeyValueStore, MemoryStore, SharedStore, SqliteStore};
pub use token_store::{AccessToken, TokenStore};
