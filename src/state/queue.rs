//! The active batch of recommendation cards and the guard around replacing it

use crate::models::Track;

/// Ordered cards plus a cursor; `cursor == items.len()` means exhausted
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecommendationQueue {
    items: Vec<Track>,
    cursor: usize,
}

impl RecommendationQueue {
    pub fn new(items: Vec<Track>) -> Self {
        Self { items, cursor: 0 }
    }

    pub fn current(&self) -> Option<&Track> {
        self.items.get(self.cursor)
    }

    /// Move past the current card; returns the card that was left behind
    pub fn advance(&mut self) -> Option<&Track> {
        if self.cursor >= self.items.len() {
            return None;
        }
        self.cursor += 1;
        self.items.get(self.cursor - 1)
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.items.len()
    }

    pub fn remaining(&self) -> usize {
        self.items.len() - self.cursor
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[Track] {
        &self.items
    }
}

/// Proof that a pipeline run was started; completions carry it back
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunTicket {
    generation: u64,
}

impl RunTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Owns the current queue and admits at most one refresh at a time.
///
/// Each started run bumps the generation; a completion whose ticket is not
/// the latest generation is dropped, so a slow response can never replace a
/// newer queue.
#[derive(Debug, Default)]
pub struct QueueSlot {
    queue: RecommendationQueue,
    degraded: bool,
    generation: u64,
    in_flight: bool,
}

impl QueueSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// `None` when a run is already pending (the request is coalesced)
    pub fn begin_refresh(&mut self) -> Option<RunTicket> {
        if self.in_flight {
            log::debug!("[Queue] Refresh already in flight, coalescing");
            return None;
        }
        self.in_flight = true;
        self.generation += 1;
        Some(RunTicket {
            generation: self.generation,
        })
    }

    /// Install a finished batch; `false` if the ticket is stale
    pub fn complete(&mut self, ticket: RunTicket, items: Vec<Track>, degraded: bool) -> bool {
        if ticket.generation != self.generation {
            log::info!(
                "[Queue] Discarding stale batch from run {} (current {})",
                ticket.generation,
                self.generation
            );
            return false;
        }
        self.in_flight = false;
        self.queue = RecommendationQueue::new(items);
        self.degraded = degraded;
        true
    }

    /// Release a run that produced nothing to install (e.g. auth failure)
    pub fn abandon(&mut self, ticket: RunTicket) {
        if ticket.generation == self.generation {
            self.in_flight = false;
        }
    }

    /// Drop the queue and orphan any pending run
    pub fn invalidate(&mut self) {
        self.generation += 1;
        self.in_flight = false;
        self.queue = RecommendationQueue::default();
        self.degraded = false;
    }

    pub fn queue(&self) -> &RecommendationQueue {
        &self.queue
    }

    pub fn queue_mut(&mut self) -> &mut RecommendationQueue {
        &mut self.queue
    }

    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    pub fn is_refreshing(&self) -> bool {
        self.in_flight
    }
}
