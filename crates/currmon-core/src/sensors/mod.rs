//! Analog sensor access and raw-to-physical conversion.
//!
//! The ADC itself is a collaborator: firmware and simulator provide an
//! [`AnalogSource`]. Everything here is a pure function of the raw sample and
//! the fixed [`Calibration`].

use crate::config::NOMINAL_PACK_VOLTAGE;

/// Analog inputs wired to the monitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorChannel {
    /// Hall-effect current sensor output
    Current,
    /// Divided-down pack voltage (read, but not yet calibrated)
    Voltage,
}

/// Synchronous source of raw ADC samples in the 10-bit range `0..=1023`.
///
/// Reads never fail from the caller's point of view. Implementations that can
/// fail at the hardware level report the failure through the log and return 0.
pub trait AnalogSource {
    fn read_raw(&mut self, channel: SensorChannel) -> u16;
}

impl<T: AnalogSource + ?Sized> AnalogSource for &mut T {
    fn read_raw(&mut self, channel: SensorChannel) -> u16 {
        (**self).read_raw(channel)
    }
}

/// Linear transform from a raw current sample to amps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Calibration {
    /// Raw reading at zero current
    pub zero_offset: u16,
    /// ADC reference voltage in volts
    pub reference_voltage: f32,
    /// Number of ADC codes across the reference range
    pub resolution: f32,
    /// Sensor output in volts per amp
    pub sensitivity: f32,
    /// Magnitudes below this many amps read as exactly zero
    pub dead_zone: f32,
}

impl Calibration {
    /// 50 A bidirectional hall sensor (40 mV/A) on a 5 V, 10-bit converter.
    pub const DEFAULT: Self = Self {
        zero_offset: 526,
        reference_voltage: 5.0,
        resolution: 1024.0,
        sensitivity: 0.04,
        dead_zone: 0.15,
    };

    /// Convert a raw current sample to amps, suppressing noise around zero.
    pub fn current_amps(&self, raw: u16) -> f32 {
        let counts = raw as f32 - self.zero_offset as f32;
        let amps = counts * self.reference_voltage / self.resolution / self.sensitivity;

        if libm::fabsf(amps) < self.dead_zone {
            0.0
        } else {
            amps
        }
    }

    /// Raw sample that decodes to `amps`, rounded to the nearest code.
    ///
    /// Used by the simulator's synthetic load.
    pub fn raw_for_amps(&self, amps: f32) -> u16 {
        let counts = amps * self.sensitivity * self.resolution / self.reference_voltage;
        let raw = libm::roundf(self.zero_offset as f32 + counts);
        raw.clamp(0.0, self.resolution - 1.0) as u16
    }
}

impl Default for Calibration {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Pack voltage estimate.
///
/// The voltage divider is not calibrated yet, so this ignores `_raw` and
/// returns [`NOMINAL_PACK_VOLTAGE`]. Power figures are estimates until it is.
pub fn estimate_pack_voltage(_raw: u16) -> f32 {
    NOMINAL_PACK_VOLTAGE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_offset_reads_zero() {
        assert_eq!(Calibration::DEFAULT.current_amps(526), 0.0);
    }

    #[test]
    fn test_dead_zone_is_exact_zero() {
        let cal = Calibration::DEFAULT;
        // One code is ~0.122 A, inside the 0.15 A dead-zone on both sides.
        assert_eq!(cal.current_amps(527), 0.0);
        assert_eq!(cal.current_amps(525), 0.0);
        // Two codes is ~0.244 A and passes through.
        assert!(cal.current_amps(528) > 0.15);
        assert!(cal.current_amps(524) < -0.15);
    }

    #[test]
    fn test_linear_transform() {
        let cal = Calibration::DEFAULT;
        // (1023 - 526) * 5 / 1024 / 0.04
        let expected = 497.0 * 5.0 / 1024.0 / 0.04;
        assert!((cal.current_amps(1023) - expected).abs() < 1e-3);
        assert!((cal.current_amps(0) + 526.0 * 5.0 / 1024.0 / 0.04).abs() < 1e-3);
    }

    #[test]
    fn test_raw_for_amps_inverts_transform() {
        let cal = Calibration::DEFAULT;
        let raw = cal.raw_for_amps(10.0);
        assert!((cal.current_amps(raw) - 10.0).abs() < 0.13);
        assert_eq!(cal.raw_for_amps(-1000.0), 0);
        assert_eq!(cal.raw_for_amps(1000.0), 1023);
    }

    #[test]
    fn test_pack_voltage_is_nominal() {
        assert_eq!(estimate_pack_voltage(0), NOMINAL_PACK_VOLTAGE);
        assert_eq!(estimate_pack_voltage(1023), NOMINAL_PACK_VOLTAGE);
    }
}
