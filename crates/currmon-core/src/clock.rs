//! Time source abstraction and per-cycle timing.
//!
//! Time is an [`embassy_time::Instant`] (64-bit ticks since boot), so the
//! 49.7-day wrap of a 32-bit millisecond counter cannot happen here.

use embassy_time::{Duration, Instant};

/// Monotonic time since boot.
pub trait Clock {
    fn now(&self) -> Instant;
}

impl<T: Clock + ?Sized> Clock for &T {
    fn now(&self) -> Instant {
        (**self).now()
    }
}

/// Instant of boot, the origin for every timestamp the monitor keeps.
pub const BOOT: Instant = Instant::from_ticks(0);

/// Timestamps of the previous and current cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleClock {
    previous: Instant,
    current: Instant,
}

impl Default for CycleClock {
    fn default() -> Self {
        Self::new()
    }
}

impl CycleClock {
    /// Both timestamps start at boot, so the first tick measures time since boot.
    pub const fn new() -> Self {
        Self {
            previous: BOOT,
            current: BOOT,
        }
    }

    /// Start a new cycle at `now` and return the time since the last one.
    ///
    /// A clock that steps backwards yields zero elapsed time.
    pub fn tick(&mut self, now: Instant) -> Duration {
        self.previous = self.current;
        self.current = now;
        self.current.saturating_duration_since(self.previous)
    }

    pub fn previous(&self) -> Instant {
        self.previous
    }

    pub fn current(&self) -> Instant {
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_tick_measures_from_boot() {
        let mut clock = CycleClock::new();
        let elapsed = clock.tick(Instant::from_millis(250));
        assert_eq!(elapsed, Duration::from_millis(250));
        assert_eq!(clock.previous(), BOOT);
    }

    #[test]
    fn test_tick_shifts_timestamps() {
        let mut clock = CycleClock::new();
        clock.tick(Instant::from_millis(100));
        let elapsed = clock.tick(Instant::from_millis(140));
        assert_eq!(elapsed, Duration::from_millis(40));
        assert_eq!(clock.previous(), Instant::from_millis(100));
        assert_eq!(clock.current(), Instant::from_millis(140));
    }

    #[test]
    fn test_backwards_step_is_zero() {
        let mut clock = CycleClock::new();
        clock.tick(Instant::from_millis(500));
        assert_eq!(clock.tick(Instant::from_millis(400)), Duration::from_ticks(0));
    }
}
