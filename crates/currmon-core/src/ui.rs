//! Text primitives shared by the screens and the display manager.

use embedded_graphics::mono_font::MonoFont;
use embedded_graphics::mono_font::ascii::{FONT_6X10, FONT_9X18_BOLD, FONT_10X20};
use embedded_graphics::prelude::Point;

/// Capacity of a single rendered field.
pub const FIELD_CAPACITY: usize = 16;

/// Font presets available on the 64×48 screen
///
/// - `Small`: 6x10, fits four rows
/// - `Medium`: 9x18 bold, fits two rows
/// - `Large`: 10x20, one big number
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontId {
    Small,
    Medium,
    Large,
}

impl FontId {
    pub fn font(&self) -> &'static MonoFont<'static> {
        match self {
            FontId::Small => &FONT_6X10,
            FontId::Medium => &FONT_9X18_BOLD,
            FontId::Large => &FONT_10X20,
        }
    }
}

/// One piece of text placed on a screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextField {
    pub font: FontId,
    pub cursor: Point,
    pub text: heapless::String<FIELD_CAPACITY>,
}

impl TextField {
    pub fn new(font: FontId, cursor: Point, text: heapless::String<FIELD_CAPACITY>) -> Self {
        Self { font, cursor, text }
    }
}
