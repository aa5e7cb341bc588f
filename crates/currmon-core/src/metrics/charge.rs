use embassy_time::Duration;

/// One mAh expressed in amp-milliseconds.
const AMP_MS_PER_MAH: f64 = 3600.0;

/// Running total of consumed charge.
///
/// Integrates with left rectangles: the current passed in is assumed constant
/// over the whole elapsed interval. The total is `f64` so millions of short
/// cycles do not lose the small per-cycle increments.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ChargeAccumulator {
    total_mah: f64,
}

impl ChargeAccumulator {
    pub const fn new() -> Self {
        Self { total_mah: 0.0 }
    }

    /// Add `current_amps` held for `elapsed` and return the total in mAh.
    ///
    /// Negative current (regeneration) reduces the total.
    pub fn integrate(&mut self, current_amps: f32, elapsed: Duration) -> f64 {
        self.total_mah += current_amps as f64 * elapsed.as_millis() as f64 / AMP_MS_PER_MAH;
        self.total_mah
    }

    pub fn total_mah(&self) -> f64 {
        self.total_mah
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_amp_for_one_hour() {
        let mut acc = ChargeAccumulator::new();
        let total = acc.integrate(1.0, Duration::from_secs(3600));
        assert!((total - 1000.0).abs() < 1e-9);
    }

    #[test]
    fn test_two_amps_for_an_hour_of_short_cycles() {
        let mut acc = ChargeAccumulator::new();
        let step = Duration::from_millis(40);
        for _ in 0..(3_600_000 / 40) {
            acc.integrate(2.0, step);
        }
        assert!((acc.total_mah() - 2000.0).abs() < 0.01);
    }

    #[test]
    fn test_two_amps_for_an_hour_of_millisecond_cycles() {
        let mut acc = ChargeAccumulator::new();
        let step = Duration::from_millis(1);
        for _ in 0..3_600_000 {
            acc.integrate(2.0, step);
        }
        assert!((acc.total_mah() - 2000.0).abs() < 0.01);
    }

    #[test]
    fn test_non_negative_current_never_decreases_total() {
        let mut acc = ChargeAccumulator::new();
        let mut last = acc.total_mah();
        for i in 0..500u64 {
            let amps = (i % 7) as f32 * 0.9;
            let total = acc.integrate(amps, Duration::from_millis(i % 90));
            assert!(total >= last);
            last = total;
        }
    }

    #[test]
    fn test_negative_current_reduces_total() {
        let mut acc = ChargeAccumulator::new();
        acc.integrate(3.0, Duration::from_secs(60));
        let before = acc.total_mah();
        let after = acc.integrate(-1.5, Duration::from_secs(60));
        assert!(after < before);
        assert!((after - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_elapsed_adds_nothing() {
        let mut acc = ChargeAccumulator::new();
        assert_eq!(acc.integrate(40.0, Duration::from_millis(0)), 0.0);
    }
}
