/// Services module - business logic layer
///
/// Services contain reusable logic that sits between the session and the
/// remote catalog.

pub mod playlist_sync;

// Re-export commonly used types
pub use playlist_sync::{sync_loved_track, SyncOutcome};
