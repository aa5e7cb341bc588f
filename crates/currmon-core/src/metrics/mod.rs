//! Derived quantities computed each cycle.
//!
//! This module holds the charge integrator, the peak tracker, and the
//! per-cycle [`Readings`] snapshot that the screens render from.

mod charge;
mod peak;

pub use charge::ChargeAccumulator;
pub use peak::PeakTracker;

/// Everything a screen needs to draw one frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Readings {
    /// Raw current ADC sample from this cycle
    pub raw_current: u16,
    /// Raw voltage ADC sample from this cycle
    pub raw_voltage: u16,
    /// This cycle's un-smoothed current in amps
    pub sample_amps: f32,
    /// Moving-average current in amps
    pub current_amps: f32,
    /// Highest smoothed current since boot
    pub peak_amps: f32,
    /// Estimated pack voltage in volts
    pub voltage: f32,
    /// Consumed charge since boot in mAh
    pub charge_mah: f64,
}

impl Readings {
    /// Estimated power draw in watts.
    pub fn power_watts(&self) -> f32 {
        self.voltage * self.current_amps
    }
}

impl core::fmt::Display for Readings {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "raw={} i={:.3}A avg={:.3}A peak={:.3}A q={:.2}mAh",
            self.raw_current, self.sample_amps, self.current_amps, self.peak_amps, self.charge_mah
        )
    }
}
