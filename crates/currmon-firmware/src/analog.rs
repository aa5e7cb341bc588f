//! On-chip ADC access for the hall sensor and the pack voltage divider.

use currmon_core::sensors::{AnalogSource, SensorChannel};
use esp_hal::Blocking;
use esp_hal::analog::adc::{Adc, AdcConfig, AdcPin, Attenuation};
use esp_hal::peripherals::{ADC1, GPIO8, GPIO9};
use log::warn;

/// The ESP32-S3 converts to 12 bits; the calibration expects 10.
const RESOLUTION_SHIFT: u16 = 2;

/// Both monitor inputs on ADC1, read one-shot.
///
/// GPIO8 carries the hall sensor output, GPIO9 the divided pack voltage.
pub struct AnalogInputs<'d> {
    adc: Adc<'d, ADC1<'d>, Blocking>,
    current: AdcPin<GPIO8<'d>, ADC1<'d>>,
    voltage: AdcPin<GPIO9<'d>, ADC1<'d>>,
}

impl<'d> AnalogInputs<'d> {
    pub fn new(adc1: ADC1<'d>, current_pin: GPIO8<'d>, voltage_pin: GPIO9<'d>) -> Self {
        let mut config = AdcConfig::new();
        // 11 dB covers the full 0..3.1 V input range.
        let current = config.enable_pin(current_pin, Attenuation::_11dB);
        let voltage = config.enable_pin(voltage_pin, Attenuation::_11dB);

        Self {
            adc: Adc::new(adc1, config),
            current,
            voltage,
        }
    }
}

impl AnalogSource for AnalogInputs<'_> {
    fn read_raw(&mut self, channel: SensorChannel) -> u16 {
        let reading = match channel {
            SensorChannel::Current => nb::block!(self.adc.read_oneshot(&mut self.current)),
            SensorChannel::Voltage => nb::block!(self.adc.read_oneshot(&mut self.voltage)),
        };

        match reading {
            Ok(raw) => (raw >> RESOLUTION_SHIFT).min(1023),
            Err(e) => {
                warn!("ADC read failed on {:?}: {:?}", channel, e);
                0
            }
        }
    }
}
