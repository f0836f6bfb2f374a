//! Swipe gesture state machine
//!
//! Pointer input (press, drag, release) and discrete commands (buttons, keys)
//! both end in the same commit path. One gate serialises commits against the
//! card exit animation: after a decision the engine refuses new gestures and
//! commands until the settle delay has passed.

use crate::constants::{
    SWIPE_COMMIT_THRESHOLD_PX, SWIPE_DEAD_ZONE_PX, SWIPE_ROTATION_PER_PX, SWIPE_SCALE_PER_PX,
    SWIPE_SETTLE_DELAY_MILLIS,
};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    Accept,
    Reject,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Indicator {
    Neutral,
    Accept(f32),
    Reject(f32),
}

/// How the card should be drawn mid-drag
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardPose {
    pub offset: Point,
    pub rotation_deg: f32,
    pub scale: f32,
    pub indicator: Indicator,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReleaseOutcome {
    /// Not dragging (or gated); nothing happened
    Ignored,
    /// Below the commit threshold; card snaps back
    Cancelled,
    Committed(SwipeDirection),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GesturePhase {
    Idle,
    Dragging { origin: Point, offset: Point },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureSettings {
    pub dead_zone: f32,
    pub commit_threshold: f32,
    pub settle_delay: Duration,
    pub rotation_per_px: f32,
    pub scale_per_px: f32,
}

impl Default for GestureSettings {
    fn default() -> Self {
        Self {
            dead_zone: SWIPE_DEAD_ZONE_PX,
            commit_threshold: SWIPE_COMMIT_THRESHOLD_PX,
            settle_delay: Duration::from_millis(SWIPE_SETTLE_DELAY_MILLIS),
            rotation_per_px: SWIPE_ROTATION_PER_PX,
            scale_per_px: SWIPE_SCALE_PER_PX,
        }
    }
}

pub struct SwipeEngine {
    settings: GestureSettings,
    phase: GesturePhase,
    gate_closed_until: Option<Instant>,
}

impl SwipeEngine {
    pub fn new(settings: GestureSettings) -> Self {
        Self {
            settings,
            phase: GesturePhase::Idle,
            gate_closed_until: None,
        }
    }

    pub fn settings(&self) -> &GestureSettings {
        &self.settings
    }

    pub fn phase(&self) -> GesturePhase {
        self.phase
    }

    pub fn is_enabled(&self, now: Instant) -> bool {
        match self.gate_closed_until {
            Some(until) => now >= until,
            None => true,
        }
    }

    /// Pointer-down / touch-start on the active card
    pub fn press(&mut self, point: Point, now: Instant) -> bool {
        if !self.is_enabled(now) || matches!(self.phase, GesturePhase::Dragging { .. }) {
            return false;
        }
        self.phase = GesturePhase::Dragging {
            origin: point,
            offset: Point::new(0.0, 0.0),
        };
        true
    }

    /// Pointer move; `None` unless a drag is in progress
    pub fn drag(&mut self, point: Point) -> Option<CardPose> {
        let GesturePhase::Dragging { origin, .. } = self.phase else {
            return None;
        };
        let offset = Point::new(point.x - origin.x, point.y - origin.y);
        self.phase = GesturePhase::Dragging { origin, offset };
        Some(self.pose_for(offset))
    }

    /// Pointer-up / touch-end
    pub fn release(&mut self, now: Instant) -> ReleaseOutcome {
        let GesturePhase::Dragging { offset, .. } = self.phase else {
            return ReleaseOutcome::Ignored;
        };
        self.phase = GesturePhase::Idle;

        if offset.x.abs() <= self.settings.commit_threshold {
            return ReleaseOutcome::Cancelled;
        }

        let direction = if offset.x > 0.0 {
            SwipeDirection::Accept
        } else {
            SwipeDirection::Reject
        };
        match self.commit(direction, now) {
            Some(d) => ReleaseOutcome::Committed(d),
            None => ReleaseOutcome::Ignored,
        }
    }

    /// Button or key binding; same gate and commit path as a swipe
    pub fn command(&mut self, direction: SwipeDirection, now: Instant) -> Option<SwipeDirection> {
        if matches!(self.phase, GesturePhase::Dragging { .. }) {
            self.phase = GesturePhase::Idle;
        }
        self.commit(direction, now)
    }

    /// Drop a half-finished drag (the card under it was replaced); the settle
    /// gate keeps running
    pub fn cancel_drag(&mut self) {
        self.phase = GesturePhase::Idle;
    }

    /// Abandon any drag and reopen the gate (logout, expired session)
    pub fn reset(&mut self) {
        self.phase = GesturePhase::Idle;
        self.gate_closed_until = None;
    }

    pub fn pose_for(&self, offset: Point) -> CardPose {
        let x = offset.x;
        let strength = (x.abs() / self.settings.commit_threshold).min(1.0);
        let indicator = if x > self.settings.dead_zone {
            Indicator::Accept(strength)
        } else if x < -self.settings.dead_zone {
            Indicator::Reject(strength)
        } else {
            Indicator::Neutral
        };

        CardPose {
            offset,
            rotation_deg: x * self.settings.rotation_per_px,
            scale: 1.0 - x.abs() * self.settings.scale_per_px,
            indicator,
        }
    }

    fn commit(&mut self, direction: SwipeDirection, now: Instant) -> Option<SwipeDirection> {
        if !self.is_enabled(now) {
            log::debug!("[Swipe] Ignoring {:?} while the previous card settles", direction);
            return None;
        }
        self.gate_closed_until = Some(now + self.settings.settle_delay);
        log::debug!("[Swipe] Committed {:?}", direction);
        Some(direction)
    }
}

impl Default for SwipeEngine {
    fn default() -> Self {
        Self::new(GestureSettings::default())
    }
}
