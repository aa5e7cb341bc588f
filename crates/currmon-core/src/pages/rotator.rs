//! Time-driven screen rotation.

use embassy_time::{Duration, Instant};
use log::debug;

use super::ScreenId;
use crate::config::ROTATION_INTERVAL;

/// Cyclic state machine choosing the active screen.
///
/// There is no input device; the only trigger is the dwell time running out.
/// A transition fires when strictly more than the interval has passed since
/// the previous one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayRotator {
    screen: ScreenId,
    last_transition: Instant,
    interval: Duration,
    include_raw: bool,
}

impl DisplayRotator {
    /// Start on [`ScreenId::Overview`] with `start` as the last transition.
    pub const fn new(start: Instant) -> Self {
        Self {
            screen: ScreenId::Overview,
            last_transition: start,
            interval: ROTATION_INTERVAL,
            include_raw: true,
        }
    }

    /// Include or skip the raw sensor screen in the cycle.
    pub const fn with_raw_screen(mut self, include: bool) -> Self {
        self.include_raw = include;
        self
    }

    /// Advance if the dwell time has elapsed and return the active screen.
    pub fn poll(&mut self, now: Instant) -> ScreenId {
        if now.saturating_duration_since(self.last_transition) > self.interval {
            let next = self.screen.next(self.include_raw);
            debug!("Rotating screen {:?} -> {:?}", self.screen, next);
            self.screen = next;
            self.last_transition = now;
        }
        self.screen
    }

    pub fn screen(&self) -> ScreenId {
        self.screen
    }

    pub fn last_transition(&self) -> Instant {
        self.last_transition
    }
}
