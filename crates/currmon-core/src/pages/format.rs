//! Value formatting for the status screens.
//!
//! Values strictly between 0 and 1 keep one decimal so a small but real draw
//! does not show as "0"; everything else is a rounded integer to stay narrow
//! on a 64-pixel-wide screen.

use core::fmt::Write;

use crate::config::AMP_HOUR_THRESHOLD_MAH;
use crate::ui::FIELD_CAPACITY;

pub type FieldText = heapless::String<FIELD_CAPACITY>;

/// Round half away from zero without ever producing `-0`.
fn rounded(value: f64) -> i64 {
    libm::round(value) as i64
}

/// Write `value` with `unit`, using one decimal inside `(0, 1)`.
fn fractional_or_integer(value: f64, unit: &str) -> FieldText {
    let mut text = FieldText::new();
    // Overflowing the field truncates it; the screen shows what fits.
    if value > 0.0 && value < 1.0 {
        write!(text, "{:.1}{}", value, unit).ok();
    } else {
        write!(text, "{}{}", rounded(value), unit).ok();
    }
    text
}

/// Smoothed current, e.g. `"0.5A"` or `"12A"`.
pub fn current(amps: f32) -> FieldText {
    fractional_or_integer(amps as f64, "A")
}

/// Peak current, always a rounded integer.
pub fn peak(amps: f32) -> FieldText {
    let mut text = FieldText::new();
    write!(text, "{}A", rounded(amps as f64)).ok();
    text
}

/// Estimated power as a rounded integer in watts.
pub fn power(watts: f32) -> FieldText {
    let mut text = FieldText::new();
    write!(text, "{}W", rounded(watts as f64)).ok();
    text
}

/// Consumed charge: mAh up to the threshold, Ah with two decimals above it.
pub fn charge(mah: f64) -> FieldText {
    if mah > AMP_HOUR_THRESHOLD_MAH {
        let mut text = FieldText::new();
        write!(text, "{:.2}Ah", mah / 1000.0).ok();
        text
    } else {
        fractional_or_integer(mah, "mAh")
    }
}

/// Raw ADC code with no unit.
pub fn raw(sample: u16) -> FieldText {
    let mut text = FieldText::new();
    write!(text, "{}", sample).ok();
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_fractional_below_one() {
        assert_eq!(current(0.5).as_str(), "0.5A");
        assert_eq!(current(0.04).as_str(), "0.0A");
        assert_eq!(current(0.96).as_str(), "1.0A");
    }

    #[test]
    fn test_current_integer_outside_unit_interval() {
        assert_eq!(current(0.0).as_str(), "0A");
        assert_eq!(current(1.0).as_str(), "1A");
        assert_eq!(current(12.6).as_str(), "13A");
        assert_eq!(current(-0.3).as_str(), "0A");
        assert_eq!(current(-2.5).as_str(), "-3A");
    }

    #[test]
    fn test_peak_and_power_are_integers() {
        assert_eq!(peak(0.5).as_str(), "1A");
        assert_eq!(peak(31.2).as_str(), "31A");
        assert_eq!(power(27.3).as_str(), "27W");
        assert_eq!(power(0.4).as_str(), "0W");
    }

    #[test]
    fn test_charge_thresholds() {
        assert_eq!(charge(0.26).as_str(), "0.3mAh");
        assert_eq!(charge(0.0).as_str(), "0mAh");
        assert_eq!(charge(1234.4).as_str(), "1234mAh");
        assert_eq!(charge(10_000.0).as_str(), "10000mAh");
        assert_eq!(charge(10_500.0).as_str(), "10.50Ah");
        assert_eq!(charge(23_456.0).as_str(), "23.46Ah");
    }

    #[test]
    fn test_raw_is_plain_integer() {
        assert_eq!(raw(526).as_str(), "526");
        assert_eq!(raw(0).as_str(), "0");
    }
}
