//! Display Manager exposing the text-terminal style operations the screens use
//!
//! This module wraps a hardware panel behind the small set of operations a
//! MicroView-class OLED offers:
//! - Wipe everything (`clear_all`) or just the drawing page (`clear_page`)
//! - Choose a font and a cursor, then print text at the cursor
//! - Flush the finished page to the panel
//!
//! Drawing goes to a [`FrameBuffer`]; only changed pixels reach the hardware.

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text};
use log::debug;

use crate::framebuffer::FrameBuffer;
use crate::ui::FontId;

/// Display manager that owns the panel and the page being drawn
pub struct DisplayManager<D>
where
    D: DrawTarget,
    D::Color: From<BinaryColor>,
{
    display: D,
    frame: FrameBuffer,
    font: FontId,
    cursor: Point,
    origin: Point,
    scale: u32,
}

impl<D> DisplayManager<D>
where
    D: DrawTarget,
    D::Color: From<BinaryColor>,
{
    /// Create a display manager drawing 1:1 at the panel's top-left corner
    pub fn new(display: D) -> Self {
        Self {
            display,
            frame: FrameBuffer::new(),
            font: FontId::Small,
            cursor: Point::zero(),
            origin: Point::zero(),
            scale: 1,
        }
    }

    /// Magnify every page pixel to a `scale`×`scale` block placed at `origin`
    pub fn with_placement(mut self, origin: Point, scale: u32) -> Self {
        self.origin = origin;
        self.scale = scale.max(1);
        self
    }

    /// Wipe both the page and the panel memory
    ///
    /// The page only forgets what the panel shows once the panel confirms
    /// the wipe, so a failed wipe is repaired by the next flush.
    pub fn clear_all(&mut self) -> Result<(), D::Error> {
        debug!("Clearing display memory");
        self.display.clear(BinaryColor::Off.into())?;
        self.frame.reset();
        self.cursor = Point::zero();
        Ok(())
    }

    /// Blank the page; the panel keeps its content until the next flush
    pub fn clear_page(&mut self) {
        let Ok(()) = self.frame.clear(BinaryColor::Off);
        self.cursor = Point::zero();
    }

    pub fn set_font(&mut self, font: FontId) {
        self.font = font;
    }

    pub fn set_cursor(&mut self, cursor: Point) {
        self.cursor = cursor;
    }

    /// Print `text` at the cursor and move the cursor past it
    pub fn print_text(&mut self, text: &str) {
        let style = MonoTextStyle::new(self.font.font(), BinaryColor::On);
        let Ok(next) =
            Text::with_baseline(text, self.cursor, style, Baseline::Top).draw(&mut self.frame);
        self.cursor = next;
    }

    /// Send the changed part of the page to the panel
    pub fn flush(&mut self) -> Result<(), D::Error> {
        self.frame.flush_scaled(&mut self.display, self.origin, self.scale)
    }

    /// Current cursor position in page coordinates
    pub fn cursor(&self) -> Point {
        self.cursor
    }

    /// The page as drawn so far
    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    /// The underlying panel
    pub fn display(&self) -> &D {
        &self.display
    }
}
