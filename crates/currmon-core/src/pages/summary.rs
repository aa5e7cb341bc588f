use embedded_graphics::prelude::Point;

use super::{Layout, Screen, format};
use crate::metrics::Readings;
use crate::ui::{FontId, TextField};

const CHARGE_ROW_Y: i32 = 24;

/// Screen 2: current and consumed charge only, in the medium font.
pub struct SummaryScreen;

impl Screen for SummaryScreen {
    fn layout(&self, readings: &Readings) -> Layout {
        let mut layout = Layout::new();
        layout
            .push(TextField::new(
                FontId::Medium,
                Point::zero(),
                format::current(readings.current_amps),
            ))
            .ok();
        layout
            .push(TextField::new(
                FontId::Medium,
                Point::new(0, CHARGE_ROW_Y),
                format::charge(readings.charge_mah),
            ))
            .ok();
        layout
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_fields() {
        let readings = Readings {
            current_amps: 0.3,
            charge_mah: 10_001.0,
            ..Default::default()
        };

        let layout = SummaryScreen.layout(&readings);
        assert_eq!(layout.len(), 2);
        assert_eq!(layout[0].text.as_str(), "0.3A");
        assert_eq!(layout[1].text.as_str(), "10.00Ah");
        assert_eq!(layout[1].cursor, Point::new(0, 24));
        assert!(layout.iter().all(|f| f.font == FontId::Medium));
    }
}
