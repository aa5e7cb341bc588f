//! Desktop simulator for the currmon battery current monitor.
//!
//! Runs the real `currmon_core` control loop against an SDL2 window via
//! `embedded-graphics-simulator`, with a synthetic load standing in for the
//! hall sensor.
//!
//! # Key bindings
//!
//! | Key   | Action                      |
//! |-------|-----------------------------|
//! | Up    | Increase the load by 1 A    |
//! | Down  | Decrease the load by 1 A    |
//! | 0     | Drop the load to zero       |
//! | Q     | Quit                        |

use std::cell::Cell;
use std::time::Instant as StdInstant;

use embassy_time::{Delay, Instant};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::{
    BinaryColorTheme, OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window,
    sdl2::Keycode,
};
use log::info;

use currmon_core::clock::Clock;
use currmon_core::config::{DISPLAY_HEIGHT_PX, DISPLAY_WIDTH_PX, REFRESH_INTERVAL};
use currmon_core::display_manager::DisplayManager;
use currmon_core::monitor::Monitor;
use currmon_core::sensors::{AnalogSource, Calibration, SensorChannel};

// ---------------------------------------------------------------------------
// Display constants
// ---------------------------------------------------------------------------

/// Pixel scale factor for the simulator window.
const WINDOW_SCALE: u32 = 6;

/// Load change per key press, in amps.
const LOAD_STEP_AMPS: f32 = 1.0;

/// Load range the synthetic sensor can express.
const MAX_LOAD_AMPS: f32 = 60.0;

/// Raw code reported on the (uncalibrated) voltage channel.
const MOCK_VOLTAGE_RAW: u16 = 700;

// ---------------------------------------------------------------------------
// Mock collaborators
// ---------------------------------------------------------------------------

/// Synthetic hall sensor: a user-controlled load plus a slow ripple.
struct MockLoad<'a> {
    target_amps: &'a Cell<f32>,
    calibration: Calibration,
    started: StdInstant,
}

impl<'a> MockLoad<'a> {
    fn new(target_amps: &'a Cell<f32>) -> Self {
        Self {
            target_amps,
            calibration: Calibration::DEFAULT,
            started: StdInstant::now(),
        }
    }

    fn amps(&self) -> f32 {
        let target = self.target_amps.get();
        if target == 0.0 {
            return 0.0;
        }
        let t = self.started.elapsed().as_secs_f32();
        target + 0.05 * target * (t / 2.0).sin()
    }
}

impl AnalogSource for MockLoad<'_> {
    fn read_raw(&mut self, channel: SensorChannel) -> u16 {
        match channel {
            SensorChannel::Current => self.calibration.raw_for_amps(self.amps()),
            SensorChannel::Voltage => MOCK_VOLTAGE_RAW,
        }
    }
}

/// Host clock backed by embassy-time's std driver.
struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Map an SDL keycode to a new load target.
fn keycode_to_load(keycode: Keycode, current: f32) -> Option<f32> {
    let next = match keycode {
        Keycode::Up => current + LOAD_STEP_AMPS,
        Keycode::Down => current - LOAD_STEP_AMPS,
        Keycode::Num0 | Keycode::Kp0 => 0.0,
        _ => return None,
    };
    Some(next.clamp(-MAX_LOAD_AMPS, MAX_LOAD_AMPS))
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() {
    env_logger::init();
    info!("Starting currmon simulator");
    info!(
        "Display: {}×{} (scale {}×)",
        DISPLAY_WIDTH_PX, DISPLAY_HEIGHT_PX, WINDOW_SCALE
    );
    info!("Keys: Up/Down=Load ±1A  0=No load  Q=Quit");

    let display = SimulatorDisplay::<BinaryColor>::new(Size::new(
        DISPLAY_WIDTH_PX as u32,
        DISPLAY_HEIGHT_PX as u32,
    ));

    let output_settings = OutputSettingsBuilder::new()
        .scale(WINDOW_SCALE)
        .theme(BinaryColorTheme::OledBlue)
        .build();
    let mut window = Window::new("Current Monitor Simulator", &output_settings);

    let load = Cell::new(0.0_f32);
    let mut monitor = Monitor::new(MockLoad::new(&load), SystemClock, DisplayManager::new(display));

    if let Err(e) = monitor.init(&mut Delay) {
        log::error!("Display wipe failed: {}", e);
    }

    // The SDL window is lazily initialized on the first `update()` call.
    // We must call `update()` once before `events()` or it will panic.
    window.update(monitor.display().display());

    let refresh = std::time::Duration::from_millis(REFRESH_INTERVAL.as_millis());

    'running: loop {
        for event in window.events() {
            match event {
                SimulatorEvent::Quit => break 'running,

                SimulatorEvent::KeyDown { keycode, .. } => {
                    if keycode == Keycode::Q || keycode == Keycode::Escape {
                        break 'running;
                    }

                    if let Some(target) = keycode_to_load(keycode, load.get()) {
                        info!("Load set to {:.0} A", target);
                        load.set(target);
                    }
                }

                _ => {}
            }
        }

        monitor.cycle();
        window.update(monitor.display().display());

        std::thread::sleep(refresh);
    }

    info!(
        "Simulator exiting after {:.1} mAh",
        monitor.state().charge.total_mah()
    );
}
