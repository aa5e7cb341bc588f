use currmon_core::clock::Clock;
use embassy_time::Instant;

/// Monotonic time from the embassy time driver started by `esp_rtos::start`.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyClock;

impl Clock for EmbassyClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}
