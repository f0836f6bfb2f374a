use std::sync::{Mutex, MutexGuard};
use tokio::runtime::Runtime;

/// Creates the single-threaded Tokio runtime the whole app runs on
///
/// Every piece of shared state (ledger counters, token, queue) is touched from
/// this one thread, so the current_thread scheduler is all we need and no
/// locking discipline beyond the swipe gate applies.
///
/// Returns `Ok(Runtime)` if successful, or `Err(String)` with error message
pub fn create_runtime() -> Result<Runtime, String> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("Failed to create runtime: {}", e))
}

/// Locks a mutex, recovering the inner value if a previous holder panicked
///
/// Used for the SQLite connection and in-memory store maps, where a poisoned
/// lock still holds usable data.
pub fn safe_lock<'a, T>(mutex: &'a Mutex<T>, context: &str) -> MutexGuard<'a, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => {
            log::warn!("[{}] Mutex poisoned, recovering from panic", context);
            poisoned.into_inner()
        }
    }
}
