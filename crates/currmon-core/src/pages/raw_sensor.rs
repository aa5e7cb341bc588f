use embedded_graphics::prelude::Point;

use super::{Layout, Screen, format};
use crate::metrics::Readings;
use crate::ui::{FontId, TextField};

/// Screen 3: the raw current ADC code, for checking the zero offset.
pub struct RawSensorScreen;

impl Screen for RawSensorScreen {
    fn layout(&self, readings: &Readings) -> Layout {
        let mut layout = Layout::new();
        layout
            .push(TextField::new(
                FontId::Large,
                Point::zero(),
                format::raw(readings.raw_current),
            ))
            .ok();
        layout
    }
}
