//! Compile-time tunables for the monitor.
//!
//! There is no runtime configuration: the window size, loop cadence, rotation
//! interval and display thresholds are fixed when the firmware is built.

use embassy_time::Duration;

/// Number of samples averaged by the smoothing filter.
pub const WINDOW_SIZE: usize = 25;

/// Fixed delay at the end of every cycle (40 ms = 25 Hz refresh).
pub const REFRESH_INTERVAL: Duration = Duration::from_millis(40);

/// Dwell time on each screen before rotating to the next one.
pub const ROTATION_INTERVAL: Duration = Duration::from_millis(3000);

/// Pause after wiping the display at startup so the wipe is visible.
pub const STARTUP_SETTLE: Duration = Duration::from_millis(100);

/// Assumed pack voltage: 3.9 V per cell on a 14S pack.
pub const NOMINAL_PACK_VOLTAGE: f32 = 3.9 * 14.0;

/// Above this many mAh the consumed charge is shown in Ah.
pub const AMP_HOUR_THRESHOLD_MAH: f64 = 10_000.0;

/// Whether the raw ADC diagnostic screen takes part in the rotation.
pub const SHOW_RAW_SENSOR_SCREEN: bool = true;

/// Logical display width in pixels (MicroView-class OLED).
pub const DISPLAY_WIDTH_PX: u16 = 64;

/// Logical display height in pixels.
pub const DISPLAY_HEIGHT_PX: u16 = 48;
