//! Monitor-wide state and error types for currmon

use core::fmt::{Debug, Write};

use thiserror_no_std::Error;

use crate::clock::{BOOT, CycleClock};
use crate::config::WINDOW_SIZE;
use crate::filter::MovingAverage;
use crate::metrics::{ChargeAccumulator, PeakTracker};
use crate::pages::DisplayRotator;

/// Every piece of state the control loop mutates, bundled in one place.
///
/// Owned by [`Monitor`](crate::monitor::Monitor) and updated exactly once per
/// cycle. Nothing here is shared or global.
#[derive(Debug, Clone)]
pub struct MonitorState {
    pub window: MovingAverage<WINDOW_SIZE>,
    pub peak: PeakTracker,
    pub charge: ChargeAccumulator,
    pub clock: CycleClock,
    pub rotator: DisplayRotator,
}

impl MonitorState {
    pub fn new(show_raw_screen: bool) -> Self {
        Self {
            window: MovingAverage::new(),
            peak: PeakTracker::new(),
            charge: ChargeAccumulator::new(),
            clock: CycleClock::new(),
            rotator: DisplayRotator::new(BOOT).with_raw_screen(show_raw_screen),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MonitorError {
    #[error("Display error: {0}")]
    Display(heapless::String<64>),
}

impl MonitorError {
    /// Capture a hardware display error by its debug representation.
    pub fn display<E: Debug>(error: E) -> Self {
        let mut message = heapless::String::new();
        // Overlong messages are cut at capacity.
        write!(message, "{:?}", error).ok();
        Self::Display(message)
    }
}
