//! The three status screens and the machinery that picks and draws them.
//!
//! Each screen turns a [`Readings`] snapshot into a [`Layout`]: a short list of
//! text fields with a font and a cursor position. [`render`] replays a layout
//! against the [`DisplayManager`] as clear / font / cursor / print / flush
//! calls.

pub mod format;
mod overview;
mod raw_sensor;
mod rotator;
mod summary;

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::DrawTarget;
use heapless::Vec;

use crate::display_manager::DisplayManager;
use crate::metrics::Readings;
use crate::ui::TextField;

pub use overview::OverviewScreen;
pub use raw_sensor::RawSensorScreen;
pub use rotator::DisplayRotator;
pub use summary::SummaryScreen;

/// Most fields any screen places.
pub const MAX_FIELDS: usize = 4;

/// Text fields of one screen, in draw order.
pub type Layout = Vec<TextField, MAX_FIELDS>;

/// Identifiers for the rotating screens, in rotation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenId {
    /// Current, peak, power and charge
    Overview,
    /// Current and charge in a larger font
    Summary,
    /// Raw current ADC code for diagnostics
    RawSensor,
}

impl ScreenId {
    /// The screen after this one. Without the raw screen the cycle is
    /// Overview and Summary only.
    pub const fn next(self, include_raw: bool) -> Self {
        match self {
            Self::Overview => Self::Summary,
            Self::Summary if include_raw => Self::RawSensor,
            Self::Summary | Self::RawSensor => Self::Overview,
        }
    }

    /// Build this screen's layout for `readings`.
    pub fn layout(self, readings: &Readings) -> Layout {
        match self {
            Self::Overview => OverviewScreen.layout(readings),
            Self::Summary => SummaryScreen.layout(readings),
            Self::RawSensor => RawSensorScreen.layout(readings),
        }
    }
}

/// A status screen.
pub trait Screen {
    /// Place this screen's fields for the given readings.
    fn layout(&self, readings: &Readings) -> Layout;
}

/// Draw `screen` for `readings` and push the result to the panel.
pub fn render<D>(
    screen: ScreenId,
    readings: &Readings,
    display: &mut DisplayManager<D>,
) -> Result<(), D::Error>
where
    D: DrawTarget,
    D::Color: From<BinaryColor>,
{
    display.clear_page();
    for field in screen.layout(readings) {
        display.set_font(field.font);
        display.set_cursor(field.cursor);
        display.print_text(&field.text);
    }
    display.flush()
}
