use embedded_graphics::prelude::Point;

use super::{Layout, Screen, format};
use crate::metrics::Readings;
use crate::ui::{FontId, TextField};

/// Left column x for every row.
const LEFT_X: i32 = 0;

/// Peak column; seven 6-pixel cells of current fit to its left.
const PEAK_X: i32 = 5 * 9;

const CURRENT_ROW_Y: i32 = 0;
const POWER_ROW_Y: i32 = 16;
const CHARGE_ROW_Y: i32 = 32;

/// Screen 1: current and peak on top, estimated power, then consumed charge.
pub struct OverviewScreen;

impl Screen for OverviewScreen {
    fn layout(&self, readings: &Readings) -> Layout {
        let fields = [
            (Point::new(LEFT_X, CURRENT_ROW_Y), format::current(readings.current_amps)),
            (Point::new(PEAK_X, CURRENT_ROW_Y), format::peak(readings.peak_amps)),
            (Point::new(LEFT_X, POWER_ROW_Y), format::power(readings.power_watts())),
            (Point::new(LEFT_X, CHARGE_ROW_Y), format::charge(readings.charge_mah)),
        ];

        let mut layout = Layout::new();
        for (cursor, text) in fields {
            layout.push(TextField::new(FontId::Small, cursor, text)).ok();
        }
        layout
    }
}
