//! Durable record of accepted ("loved") and rejected ("passed") tracks
//!
//! Each field lives under its own key so a missing or corrupt entry only
//! resets that field. Writes are fire-and-forget: a failed write is logged and
//! the in-memory state stays authoritative for the session.

use crate::constants::{
    KEY_DISCOVERED_COUNT, KEY_LOVED_COUNT, KEY_LOVED_SONGS, KEY_PASSED_COUNT, KEY_PLAYLIST_ID,
    LEDGER_CAPACITY,
};
use crate::models::{LovedTrack, Track};
use crate::utils::kv_store::{get_json, to_json, SharedStore};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LedgerStats {
    pub accepted: u64,
    pub rejected: u64,
    pub discovered: u64,
}

pub struct DecisionLedger {
    store: SharedStore,
    capacity: usize,
    accepted_tracks: Vec<LovedTrack>, // most recent first
    accepted_count: u64,
    rejected_count: u64,
    total_discovered: u64,
    playlist_id: Option<String>,
}

impl DecisionLedger {
    pub fn load(store: SharedStore) -> Self {
        Self::load_with_capacity(store, LEDGER_CAPACITY)
    }

    pub fn load_with_capacity(store: SharedStore, capacity: usize) -> Self {
        let mut accepted_tracks: Vec<LovedTrack> =
            get_json(store.as_ref(), KEY_LOVED_SONGS).unwrap_or_default();
        accepted_tracks.truncate(capacity);

        // Older saves have no loved counter; the history length is the best guess
        let accepted_count = get_json::<u64>(store.as_ref(), KEY_LOVED_COUNT)
            .unwrap_or(accepted_tracks.len() as u64)
            .max(accepted_tracks.len() as u64);
        let rejected_count = get_json::<u64>(store.as_ref(), KEY_PASSED_COUNT).unwrap_or(0);
        let total_discovered = accepted_count + rejected_count;

        if let Some(saved) = get_json::<u64>(store.as_ref(), KEY_DISCOVERED_COUNT) {
            if saved != total_discovered {
                log::warn!(
                    "[Ledger] Saved discovered count {} disagrees with loved + passed ({}), using the latter",
                    saved,
                    total_discovered
                );
            }
        }

        let playlist_id = get_json::<String>(store.as_ref(), KEY_PLAYLIST_ID);

        log::info!(
            "[Ledger] Loaded {} loved track(s), {} loved / {} passed",
            accepted_tracks.len(),
            accepted_count,
            rejected_count
        );

        Self {
            store,
            capacity,
            accepted_tracks,
            accepted_count,
            rejected_count,
            total_discovered,
            playlist_id,
        }
    }

    pub fn record_accept(&mut self, track: &Track) -> LovedTrack {
        self.record_accept_at(track, Utc::now())
    }

    /// Prepend a snapshot, evict the oldest beyond capacity, bump counters, persist
    pub fn record_accept_at(&mut self, track: &Track, at: DateTime<Utc>) -> LovedTrack {
        let snapshot = LovedTrack::snapshot(track, at);

        self.accepted_tracks.insert(0, snapshot.clone());
        self.accepted_tracks.truncate(self.capacity);
        self.accepted_count += 1;
        self.total_discovered += 1;

        log::info!("[Ledger] Loved '{}' by {}", snapshot.name, snapshot.artist);
        self.persist(KEY_LOVED_SONGS, &self.accepted_tracks);
        self.persist_counters();

        snapshot
    }

    pub fn record_reject(&mut self) {
        self.rejected_count += 1;
        self.total_discovered += 1;
        self.persist_counters();
    }

    /// Most recent remote playlist wins
    pub fn set_playlist_id(&mut self, id: &str) {
        self.playlist_id = Some(id.to_string());
        self.persist(KEY_PLAYLIST_ID, &self.playlist_id);
    }

    pub fn playlist_id(&self) -> Option<&str> {
        self.playlist_id.as_deref()
    }

    pub fn accepted_tracks(&self) -> &[LovedTrack] {
        &self.accepted_tracks
    }

    pub fn recent(&self, n: usize) -> &[LovedTrack] {
        &self.accepted_tracks[..n.min(self.accepted_tracks.len())]
    }

    pub fn contains(&self, track_id: &str) -> bool {
        self.accepted_tracks.iter().any(|t| t.id == track_id)
    }

    pub fn accepted_ids(&self) -> std::collections::HashSet<String> {
        self.accepted_tracks.iter().map(|t| t.id.clone()).collect()
    }

    pub fn stats(&self) -> LedgerStats {
        LedgerStats {
            accepted: self.accepted_count,
            rejected: self.rejected_count,
            discovered: self.total_discovered,
        }
    }

    /// Forget everything, including the remote playlist association
    pub fn reset(&mut self) {
        self.accepted_tracks.clear();
        self.accepted_count = 0;
        self.rejected_count = 0;
        self.total_discovered = 0;
        self.playlist_id = None;

        for key in [
            KEY_LOVED_SONGS,
            KEY_LOVED_COUNT,
            KEY_PASSED_COUNT,
            KEY_DISCOVERED_COUNT,
            KEY_PLAYLIST_ID,
        ] {
            if let Err(e) = self.store.remove(key) {
                log::warn!("[Ledger] Failed to remove '{}': {}", key, e);
            }
        }
        log::info!("[Ledger] Reset");
    }

    fn persist_counters(&self) {
        self.persist(KEY_LOVED_COUNT, &self.accepted_count);
        self.persist(KEY_PASSED_COUNT, &self.rejected_count);
        self.persist(KEY_DISCOVERED_COUNT, &self.total_discovered);
    }

    fn persist<T: serde::Serialize>(&self, key: &str, value: &T) {
        let result = to_json(key, value).and_then(|json| self.store.set(key, &json));
        if let Err(e) = result {
            log::warn!("[Ledger] Failed to persist '{}': {}", key, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::kv_store::{KeyValueStore, MemoryStore};
    use std::sync::Arc;

    fn ledger_with(capacity: usize) -> (Arc<MemoryStore>, DecisionLedger) {
        let mem = MemoryStore::shared();
        let ledger = DecisionLedger::load_with_capacity(mem.clone(), capacity);
        (mem, ledger)
    }

    #[test]
    fn accepts_are_bounded_and_most_recent_first() {
        let (_mem, mut ledger) = ledger_with(3);

        for i in 0..7 {
            ledger.record_accept(&Track::mock(&i.to_string(), "t", "a"));
            assert!(ledger.accepted_tracks().len() <= 3);
        }

        let ids: Vec<&str> = ledger.accepted_tracks().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["6", "5", "4"]);
        assert_eq!(ledger.stats().accepted, 7);
    }

    #[test]
    fn reject_never_touches_accepted_tracks() {
        let (_mem, mut ledger) = ledger_with(50);
        ledger.record_accept(&Track::mock("x", "t", "a"));
        let before = ledger.accepted_tracks().to_vec();

        ledger.record_reject();
        ledger.record_reject();

        assert_eq!(ledger.accepted_tracks(), before.as_slice());
        let stats = ledger.stats();
        assert_eq!(stats.rejected, 2);
        assert_eq!(stats.discovered, stats.accepted + stats.rejected);
    }

    #[test]
    fn discovered_always_equals_accepted_plus_rejected() {
        let (_mem, mut ledger) = ledger_with(2);
        for i in 0..20 {
            if i % 3 == 0 {
                ledger.record_reject();
            } else {
                ledger.record_accept(&Track::mock(&i.to_string(), "t", "a"));
            }
            let stats = ledger.stats();
            assert_eq!(stats.discovered, stats.accepted + stats.rejected);
        }
    }

    #[test]
    fn state_survives_reload() {
        let (mem, mut ledger) = ledger_with(50);
        ledger.record_accept(&Track::mock("a", "Blinding Lights", "The Weeknd"));
        ledger.record_reject();
        ledger.set_playlist_id("pl1");

        let reloaded = DecisionLedger::load(mem.clone());
        assert_eq!(reloaded.accepted_tracks()[0].name, "Blinding Lights");
        assert_eq!(reloaded.stats(), LedgerStats { accepted: 1, rejected: 1, discovered: 2 });
        assert_eq!(reloaded.playlist_id(), Some("pl1"));
    }

    #[test]
    fn corrupt_field_reverts_to_default_only() {
        let mem = MemoryStore::shared();
        mem.set(KEY_LOVED_SONGS, "{broken").unwrap();
        mem.set(KEY_PASSED_COUNT, "4").unwrap();

        let ledger = DecisionLedger::load(mem.clone());
        assert!(ledger.accepted_tracks().is_empty());
        assert_eq!(ledger.stats().rejected, 4);
        assert_eq!(ledger.stats().discovered, 4);
        assert_eq!(ledger.playlist_id(), None);
    }

    #[test]
    fn failed_writes_keep_memory_state() {
        let (mem, mut ledger) = ledger_with(50);
        mem.set_reject_writes(true);

        let snapshot = ledger.record_accept(&Track::mock("a", "t", "a"));
        assert_eq!(snapshot.id, "a");
        assert!(ledger.contains("a"));
        assert_eq!(ledger.stats().accepted, 1);
        assert!(mem.is_empty());
    }

    #[test]
    fn playlist_id_is_overwritten() {
        let (_mem, mut ledger) = ledger_with(50);
        ledger.set_playlist_id("old");
        ledger.set_playlist_id("new");
        assert_eq!(ledger.playlist_id(), Some("new"));
    }

    #[test]
    fn recent_and_reset() {
        let (mem, mut ledger) = ledger_with(50);
        for i in 0..8 {
            ledger.record_accept(&Track::mock(&i.to_string(), "t", "a"));
        }
        assert_eq!(ledger.recent(5).len(), 5);
        assert_eq!(ledger.recent(5)[0].id, "7");

        ledger.reset();
        assert!(ledger.accepted_tracks().is_empty());
        assert_eq!(ledger.stats(), LedgerStats::default());
        assert!(mem.is_empty());
    }
}
