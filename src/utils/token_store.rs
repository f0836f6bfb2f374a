//! Access token lifecycle: save, expiry-checked load, clear

use super::kv_store::SharedStore;
use crate::constants::{KEY_ACCESS_TOKEN, KEY_TOKEN_TIMESTAMP, TOKEN_TTL};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub struct AccessToken {
    pub value: String,
    pub issued_at_ms: i64,
}

impl AccessToken {
    pub fn is_valid_at(&self, now_ms: i64, ttl: Duration) -> bool {
        now_ms - self.issued_at_ms < ttl.as_millis() as i64
    }
}

pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

pub struct TokenStore {
    store: SharedStore,
    ttl: Duration,
    // Survives a rejected write for the rest of the session
    current: Option<AccessToken>,
}

impl TokenStore {
    pub fn new(store: SharedStore) -> Self {
        Self::with_ttl(store, TOKEN_TTL)
    }

    pub fn with_ttl(store: SharedStore, ttl: Duration) -> Self {
        Self {
            store,
            ttl,
            current: None,
        }
    }

    pub fn save(&mut self, value: &str, issued_at_ms: i64) -> AccessToken {
        let token = AccessToken {
            value: value.to_string(),
            issued_at_ms,
        };
        self.current = Some(token.clone());

        let entries = [
            (KEY_ACCESS_TOKEN, value.to_string()),
            (KEY_TOKEN_TIMESTAMP, issued_at_ms.to_string()),
        ];
        if let Err(e) = self.store.set_many(&entries) {
            log::warn!("[TokenStore] Could not persist token, keeping it for this session only: {}", e);
        }

        token
    }

    pub fn load(&mut self) -> Option<AccessToken> {
        self.load_at(now_millis())
    }

    /// Returns the token only while `now - issued_at < TTL`; a stale token is
    /// cleared on the way out
    pub fn load_at(&mut self, now_ms: i64) -> Option<AccessToken> {
        let token = self.current.clone().or_else(|| self.read_persisted())?;

        if token.is_valid_at(now_ms, self.ttl) {
            self.current = Some(token.clone());
            Some(token)
        } else {
            log::info!("[TokenStore] Token expired, clearing it");
            self.clear();
            None
        }
    }

    pub fn clear(&mut self) {
        self.current = None;
        for key in [KEY_ACCESS_TOKEN, KEY_TOKEN_TIMESTAMP] {
            if let Err(e) = self.store.remove(key) {
                log::warn!("[TokenStore] Failed to remove '{}': {}", key, e);
            }
        }
    }

    fn read_persisted(&self) -> Option<AccessToken> {
        let read = |key: &str| match self.store.get(key) {
            Ok(value) => value,
            Err(e) => {
                log::warn!("[TokenStore] Failed to read '{}': {}", key, e);
                None
            }
        };

        let value = read(KEY_ACCESS_TOKEN).filter(|v| !v.is_empty())?;
        // A missing or garbled timestamp counts as issued at the epoch, i.e. expired
        let issued_at_ms = read(KEY_TOKEN_TIMESTAMP)
            .and_then(|t| t.parse::<i64>().ok())
            .unwrap_or(0);

        Some(AccessToken {
            value,
            issued_at_ms,
        })
    }
}
