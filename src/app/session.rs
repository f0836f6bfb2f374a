//! The application-state aggregate
//!
//! One `DiscoverySession` owns every piece of mutable state (credentials,
//! ledger, current queue, gesture engine, pending notices) and is handed its
//! collaborators at construction. The glue layer drives it from a single
//! thread.

use crate::api::{CatalogApi, CatalogError, CatalogResult};
use crate::data::{is_demo_track, PipelineSettings, RecommendationBatch, RecommendationPipeline};
use crate::models::{Decision, DecisionKind, Track, UserProfile};
use crate::services::{sync_loved_track, SyncOutcome};
use crate::state::queue::RunTicket;
use crate::state::{
    AuthState, CardPose, DecisionLedger, GestureSettings, LedgerStats, NoticeBoard, Point,
    QueueSlot, ReleaseOutcome, SwipeDirection, SwipeEngine,
};
use crate::utils::kv_store::SharedStore;
use crate::utils::token_store::TokenStore;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;

#[derive(Debug, Clone, Default)]
pub struct SessionConfig {
    pub pipeline: PipelineSettings,
    pub gesture: GestureSettings,
    pub playlist_sync: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RefreshOutcome {
    Loaded { cards: usize, degraded: bool },
    /// Another refresh is already running
    Coalesced,
    /// A newer run (or a logout) superseded this one
    Stale,
    Unauthenticated,
    /// The pipeline failed for a reason other than credentials
    Failed,
}

/// Shown once the queue runs dry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExhaustionSummary {
    pub discovered: u64,
    pub loved: u64,
}

/// Network half of a refresh; owns everything it needs so the session stays
/// free to handle input while it runs
pub struct RefreshJob {
    ticket: RunTicket,
    token: String,
    market: Option<String>,
    excluded_ids: HashSet<String>,
    pipeline: Arc<RecommendationPipeline>,
}

pub struct RefreshResult {
    ticket: RunTicket,
    result: CatalogResult<RecommendationBatch>,
}

impl RefreshJob {
    pub fn ticket(&self) -> RunTicket {
        self.ticket
    }

    pub async fn run(self) -> RefreshResult {
        let result = self
            .pipeline
            .load_recommendations(&self.token, self.market.as_deref(), &self.excluded_ids)
            .await;
        RefreshResult {
            ticket: self.ticket,
            result,
        }
    }
}

pub struct DiscoverySession {
    catalog: Arc<dyn CatalogApi>,
    pipeline: Arc<RecommendationPipeline>,
    pub auth: AuthState,
    pub ledger: DecisionLedger,
    pub notices: NoticeBoard,
    slot: QueueSlot,
    swipe: SwipeEngine,
    playlist_sync: bool,
    pending_sync: Vec<String>,
}

impl DiscoverySession {
    pub fn new(catalog: Arc<dyn CatalogApi>, store: SharedStore, config: SessionConfig) -> Self {
        let pipeline = Arc::new(RecommendationPipeline::new(catalog.clone(), config.pipeline));
        Self {
            catalog,
            pipeline,
            auth: AuthState::new(TokenStore::new(store.clone())),
            ledger: DecisionLedger::load(store),
            notices: NoticeBoard::new(),
            slot: QueueSlot::new(),
            swipe: SwipeEngine::new(config.gesture),
            playlist_sync: config.playlist_sync,
            pending_sync: Vec::new(),
        }
    }

    /// Resume with a persisted token if it is still fresh
    pub async fn restore(&mut self) -> bool {
        if self.auth.get_token().is_none() {
            log::info!("[Session] No valid saved token, login required");
            return false;
        }
        self.start().await
    }

    pub async fn sign_in(&mut self, access_token: &str, issued_at_ms: i64) -> bool {
        self.auth.sign_in(access_token, issued_at_ms);
        self.start().await
    }

    /// Load the profile, then the first batch of cards
    pub async fn start(&mut self) -> bool {
        let Some(token) = self.auth.get_token() else {
            self.auth.needs_reauth = true;
            return false;
        };

        match self.catalog.get_profile(&token.value).await {
            Ok(profile) => {
                log::info!("[Session] Signed in as {}", profile.label());
                self.auth.profile = Some(profile);
            }
            Err(CatalogError::Unauthorized) => {
                self.handle_unauthorized();
                return false;
            }
            Err(e) => {
                log::warn!("[Session] Profile unavailable: {}", e);
                self.notices
                    .show_warning("Couldn't load your profile, using default region");
            }
        }

        !matches!(
            self.refresh_recommendations().await,
            RefreshOutcome::Unauthenticated
        )
    }

    pub async fn refresh_recommendations(&mut self) -> RefreshOutcome {
        match self.begin_refresh() {
            Ok(job) => {
                let result = job.run().await;
                self.finish_refresh(result)
            }
            Err(outcome) => outcome,
        }
    }

    /// Start a pipeline run, or say why none was started
    pub fn begin_refresh(&mut self) -> Result<RefreshJob, RefreshOutcome> {
        let Some(token) = self.auth.get_token() else {
            self.auth.needs_reauth = true;
            return Err(RefreshOutcome::Unauthenticated);
        };
        let Some(ticket) = self.slot.begin_refresh() else {
            return Err(RefreshOutcome::Coalesced);
        };

        Ok(RefreshJob {
            ticket,
            token: token.value,
            market: self.auth.market().map(str::to_string),
            excluded_ids: self.ledger.accepted_ids(),
            pipeline: self.pipeline.clone(),
        })
    }

    pub fn finish_refresh(&mut self, done: RefreshResult) -> RefreshOutcome {
        match done.result {
            Ok(batch) => {
                let cards = batch.tracks.len();
                let degraded = batch.degraded;
                if !self.slot.complete(done.ticket, batch.tracks, degraded) {
                    return RefreshOutcome::Stale;
                }
                self.swipe.cancel_drag();
                if degraded {
                    self.notices
                        .show_warning("Couldn't load recommendations, showing demo tracks");
                }
                log::info!("[Session] Queue ready with {} card(s)", cards);
                RefreshOutcome::Loaded { cards, degraded }
            }
            Err(e) => {
                self.slot.abandon(done.ticket);
                if e.is_unauthorized() {
                    self.handle_unauthorized();
                    return RefreshOutcome::Unauthenticated;
                }
                // The pipeline only lets auth failures through
                log::error!("[Session] Unexpected pipeline failure: {}", e);
                self.notices.show_error("Couldn't load recommendations");
                RefreshOutcome::Failed
            }
        }
    }

    pub fn current_card(&self) -> Option<&Track> {
        self.slot.queue().current()
    }

    pub fn remaining_cards(&self) -> usize {
        self.slot.queue().remaining()
    }

    pub fn is_exhausted(&self) -> bool {
        self.slot.queue().is_exhausted()
    }

    pub fn is_degraded(&self) -> bool {
        self.slot.is_degraded()
    }

    pub fn is_refreshing(&self) -> bool {
        self.slot.is_refreshing()
    }

    pub fn profile(&self) -> Option<&UserProfile> {
        self.auth.profile.as_ref()
    }

    pub fn stats(&self) -> LedgerStats {
        self.ledger.stats()
    }

    pub fn summary(&self) -> ExhaustionSummary {
        let stats = self.ledger.stats();
        ExhaustionSummary {
            discovered: stats.discovered,
            loved: stats.accepted,
        }
    }

    pub fn swipe_enabled(&self, now: Instant) -> bool {
        self.swipe.is_enabled(now)
    }

    pub fn press(&mut self, point: Point, now: Instant) -> bool {
        self.current_card().is_some() && self.swipe.press(point, now)
    }

    pub fn drag(&mut self, point: Point) -> Option<CardPose> {
        self.swipe.drag(point)
    }

    pub fn release(&mut self, now: Instant) -> Option<Decision> {
        match self.swipe.release(now) {
            ReleaseOutcome::Committed(direction) => self.apply_decision(direction),
            ReleaseOutcome::Cancelled | ReleaseOutcome::Ignored => None,
        }
    }

    /// Button or keyboard decision
    pub fn command(&mut self, direction: SwipeDirection, now: Instant) -> Option<Decision> {
        self.current_card()?;
        let direction = self.swipe.command(direction, now)?;
        self.apply_decision(direction)
    }

    /// Mirror accepted tracks queued since the last call into the remote
    /// playlist; returns how many were added
    pub async fn flush_playlist_sync(&mut self) -> usize {
        if self.pending_sync.is_empty() {
            return 0;
        }
        let Some(token) = self.auth.get_token() else {
            log::debug!("[Session] {} sync(s) waiting for sign-in", self.pending_sync.len());
            return 0;
        };

        let profile = self.auth.profile.clone();
        let mut added = 0;
        let mut queued = std::mem::take(&mut self.pending_sync).into_iter();
        while let Some(uri) = queued.next() {
            let outcome = sync_loved_track(
                self.catalog.as_ref(),
                &token.value,
                profile.as_ref(),
                &mut self.ledger,
                &uri,
            )
            .await;

            if let Some(message) = outcome.message() {
                match &outcome {
                    SyncOutcome::Failed(_) => self.notices.show_warning(message),
                    _ => self.notices.show_info(message),
                }
            }
            match outcome {
                SyncOutcome::Synced { .. } => added += 1,
                SyncOutcome::Failed(CatalogError::Unauthorized) => {
                    self.handle_unauthorized();
                    // Retried after the next sign-in
                    self.pending_sync.push(uri);
                    self.pending_sync.extend(queued);
                    log::warn!(
                        "[Session] Session expired, {} track(s) left to sync",
                        self.pending_sync.len()
                    );
                    break;
                }
                SyncOutcome::Failed(_) | SyncOutcome::Skipped(_) => {}
            }
        }
        added
    }

    pub fn pending_sync(&self) -> &[String] {
        &self.pending_sync
    }

    pub fn logout(&mut self) {
        log::info!("[Session] Logging out");
        self.auth.clear_session();
        self.slot.invalidate();
        self.swipe.reset();
        self.pending_sync.clear();
        self.notices.show_info("Logged out");
    }

    fn apply_decision(&mut self, direction: SwipeDirection) -> Option<Decision> {
        let track = self.slot.queue_mut().advance()?.clone();

        let kind = match direction {
            SwipeDirection::Accept => {
                self.ledger.record_accept(&track);
                if self.playlist_sync && !is_demo_track(&track) {
                    self.pending_sync.push(track.uri.clone());
                }
                DecisionKind::Accepted
            }
            SwipeDirection::Reject => {
                self.ledger.record_reject();
                DecisionKind::Rejected
            }
        };

        if self.slot.queue().is_exhausted() {
            let summary = self.summary();
            log::info!(
                "[Session] Queue exhausted: discovered {}, loved {}",
                summary.discovered,
                summary.loved
            );
        }
        Some(Decision::new(track.id, kind))
    }

    fn handle_unauthorized(&mut self) {
        self.auth.invalidate();
        self.slot.invalidate();
        self.swipe.reset();
        self.notices.show_error("Session expired. Please login again.");
    }
}
