//! The control loop body.
//!
//! One call to [`Monitor::step`] is one cycle: tick the clock, sample both
//! channels, convert and smooth the current, integrate charge, update the
//! peak, pick the screen and draw it. The caller waits
//! [`REFRESH_INTERVAL`](crate::config::REFRESH_INTERVAL) between cycles.

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::DrawTarget;
use embedded_hal::delay::DelayNs;
use log::{error, info, trace};

use crate::app_state::{MonitorError, MonitorState};
use crate::clock::Clock;
use crate::config::{SHOW_RAW_SENSOR_SCREEN, STARTUP_SETTLE};
use crate::display_manager::DisplayManager;
use crate::metrics::Readings;
use crate::pages::{self, ScreenId};
use crate::sensors::{AnalogSource, Calibration, SensorChannel, estimate_pack_voltage};

/// Current monitor bundling the collaborators and all loop state.
pub struct Monitor<A, K, D>
where
    A: AnalogSource,
    K: Clock,
    D: DrawTarget,
    D::Color: From<BinaryColor>,
{
    adc: A,
    clock: K,
    display: DisplayManager<D>,
    calibration: Calibration,
    state: MonitorState,
}

impl<A, K, D> Monitor<A, K, D>
where
    A: AnalogSource,
    K: Clock,
    D: DrawTarget,
    D::Color: From<BinaryColor>,
    D::Error: core::fmt::Debug,
{
    pub fn new(adc: A, clock: K, display: DisplayManager<D>) -> Self {
        Self {
            adc,
            clock,
            display,
            calibration: Calibration::DEFAULT,
            state: MonitorState::new(SHOW_RAW_SENSOR_SCREEN),
        }
    }

    pub fn with_calibration(mut self, calibration: Calibration) -> Self {
        self.calibration = calibration;
        self
    }

    /// Include or skip the raw sensor screen in the rotation.
    pub fn with_raw_screen(mut self, include: bool) -> Self {
        self.state.rotator = self.state.rotator.with_raw_screen(include);
        self
    }

    /// Wipe the panel, give it a moment, and start from a blank page.
    pub fn init<T: DelayNs>(&mut self, delay: &mut T) -> Result<(), MonitorError> {
        info!("Initializing current monitor");
        self.display.clear_all().map_err(MonitorError::display)?;
        self.display.flush().map_err(MonitorError::display)?;
        delay.delay_ms(STARTUP_SETTLE.as_millis() as u32);
        self.display.clear_page();
        Ok(())
    }

    /// Run one cycle and return what was measured.
    pub fn step(&mut self) -> Result<Readings, MonitorError> {
        let now = self.clock.now();
        let elapsed = self.state.clock.tick(now);

        let raw_voltage = self.adc.read_raw(SensorChannel::Voltage);
        let raw_current = self.adc.read_raw(SensorChannel::Current);

        let sample_amps = self.calibration.current_amps(raw_current);
        let current_amps = self.state.window.update(sample_amps);
        let charge_mah = self.state.charge.integrate(sample_amps, elapsed);
        let peak_amps = self.state.peak.observe(current_amps);

        let readings = Readings {
            raw_current,
            raw_voltage,
            sample_amps,
            current_amps,
            peak_amps,
            voltage: estimate_pack_voltage(raw_voltage),
            charge_mah,
        };
        trace!("{}", readings);

        let screen = self.state.rotator.poll(now);
        pages::render(screen, &readings, &mut self.display).map_err(MonitorError::display)?;

        Ok(readings)
    }

    /// Run one cycle, logging display failures instead of returning them.
    ///
    /// Measurement state is updated before drawing, so a failed draw never
    /// loses a sample.
    pub fn cycle(&mut self) {
        if let Err(e) = self.step() {
            error!("Monitor cycle error: {}", e);
        }
    }

    /// Screen shown on the last cycle.
    pub fn screen(&self) -> ScreenId {
        self.state.rotator.screen()
    }

    pub fn state(&self) -> &MonitorState {
        &self.state
    }

    pub fn display(&self) -> &DisplayManager<D> {
        &self.display
    }
}
