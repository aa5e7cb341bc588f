//! In-RAM monochrome framebuffer with per-pixel change detection.
//!
//! All screen drawing targets this buffer instead of the panel. After a frame
//! is drawn, only the rectangular region whose pixels differ from what the
//! panel shows is flushed, optionally magnified by an integer factor.

use core::convert::Infallible;
use core::iter;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use log::debug;

use crate::config::{DISPLAY_HEIGHT_PX, DISPLAY_WIDTH_PX};

const WIDTH: usize = DISPLAY_WIDTH_PX as usize;
const HEIGHT: usize = DISPLAY_HEIGHT_PX as usize;

/// Total number of pixels in the framebuffer (64 x 48 = 3,072).
const PIXEL_COUNT: usize = WIDTH * HEIGHT;

/// Bounding box of pixels that have changed since the last flush.
#[derive(Debug, Clone, Copy)]
struct DirtyRect {
    min_x: usize,
    min_y: usize,
    max_x: usize,
    max_y: usize,
}

impl DirtyRect {
    /// Expand the dirty region to include the given pixel coordinate.
    fn expand(&mut self, x: usize, y: usize) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }

    /// Create a new dirty rect covering a single pixel.
    fn from_point(x: usize, y: usize) -> Self {
        Self {
            min_x: x,
            min_y: y,
            max_x: x,
            max_y: y,
        }
    }
}

/// Statically sized framebuffer implementing `DrawTarget<Color = BinaryColor>`.
///
/// Tracks a dirty bounding box of touched pixels plus a copy of what the
/// hardware currently shows. At flush time the dirty box is narrowed to the
/// pixels that really differ, so clearing and redrawing identical content
/// sends nothing.
pub struct FrameBuffer {
    pixels: [BinaryColor; PIXEL_COUNT],
    shown: [BinaryColor; PIXEL_COUNT],
    dirty: Option<DirtyRect>,
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameBuffer {
    /// A framebuffer with every pixel off.
    pub const fn new() -> Self {
        Self {
            pixels: [BinaryColor::Off; PIXEL_COUNT],
            shown: [BinaryColor::Off; PIXEL_COUNT],
            dirty: None,
        }
    }

    /// Forget all content after the hardware itself was wiped.
    pub fn reset(&mut self) {
        self.pixels = [BinaryColor::Off; PIXEL_COUNT];
        self.shown = [BinaryColor::Off; PIXEL_COUNT];
        self.dirty = None;
    }

    /// Write a single pixel, expanding the dirty rect only if the color changed.
    #[inline]
    fn set_pixel(&mut self, x: usize, y: usize, color: BinaryColor) {
        let idx = y * WIDTH + x;
        if self.pixels[idx] != color {
            self.pixels[idx] = color;
            match &mut self.dirty {
                Some(rect) => rect.expand(x, y),
                None => self.dirty = Some(DirtyRect::from_point(x, y)),
            }
        }
    }

    /// Color of the pixel at `point`, or `None` outside the buffer.
    pub fn pixel(&self, point: Point) -> Option<BinaryColor> {
        let (x, y) = (point.x, point.y);
        if x >= 0 && y >= 0 && (x as usize) < WIDTH && (y as usize) < HEIGHT {
            Some(self.pixels[y as usize * WIDTH + x as usize])
        } else {
            None
        }
    }

    /// Whether any pixel was written with a new color since the last flush.
    pub fn is_dirty(&self) -> bool {
        self.dirty.is_some()
    }

    /// Shrink `candidate` to the pixels that differ from what is shown.
    fn changed_within(&self, candidate: DirtyRect) -> Option<DirtyRect> {
        let mut changed: Option<DirtyRect> = None;
        for y in candidate.min_y..=candidate.max_y {
            for x in candidate.min_x..=candidate.max_x {
                let idx = y * WIDTH + x;
                if self.pixels[idx] != self.shown[idx] {
                    match &mut changed {
                        Some(rect) => rect.expand(x, y),
                        None => changed = Some(DirtyRect::from_point(x, y)),
                    }
                }
            }
        }
        changed
    }

    /// Flush the dirty region 1:1 to the top-left of `display`.
    pub fn flush<D>(&mut self, display: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget,
        D::Color: From<BinaryColor>,
    {
        self.flush_scaled(display, Point::zero(), 1)
    }

    /// Flush the changed region to `display`, then reset the dirty state.
    ///
    /// Every framebuffer pixel becomes a `scale`×`scale` block with the
    /// buffer's origin placed at `origin`. Only the bounding rectangle of
    /// changed pixels is sent via `fill_contiguous`. If nothing changed, this
    /// is a no-op. On error the region stays dirty and is retried next flush.
    pub fn flush_scaled<D>(
        &mut self,
        display: &mut D,
        origin: Point,
        scale: u32,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget,
        D::Color: From<BinaryColor>,
    {
        let Some(candidate) = self.dirty.take() else {
            return Ok(());
        };
        let Some(rect) = self.changed_within(candidate) else {
            return Ok(());
        };

        let scale = scale.max(1);
        let width = rect.max_x - rect.min_x + 1;
        let height = rect.max_y - rect.min_y + 1;

        debug!(
            "Flushing {}x{} dirty region at ({}, {}) scale {}",
            width, height, rect.min_x, rect.min_y, scale
        );

        let area = Rectangle::new(
            origin
                + Point::new(
                    (rect.min_x as u32 * scale) as i32,
                    (rect.min_y as u32 * scale) as i32,
                ),
            Size::new(width as u32 * scale, height as u32 * scale),
        );

        // Borrow the pixel array so the closures capture a shared reference.
        let pixels = &self.pixels;
        let repeat = scale as usize;
        let pixel_iter = (rect.min_y..=rect.max_y)
            .flat_map(move |y| iter::repeat_n(y, repeat))
            .flat_map(move |y| {
                let row_start = y * WIDTH + rect.min_x;
                pixels[row_start..row_start + width]
                    .iter()
                    .flat_map(move |&color| iter::repeat_n(color, repeat))
            })
            .map(<D::Color as From<BinaryColor>>::from);

        if let Err(e) = display.fill_contiguous(&area, pixel_iter) {
            self.dirty = Some(rect);
            return Err(e);
        }

        for y in rect.min_y..=rect.max_y {
            let row_start = y * WIDTH + rect.min_x;
            self.shown[row_start..row_start + width]
                .copy_from_slice(&self.pixels[row_start..row_start + width]);
        }
        Ok(())
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        Size::new(WIDTH as u32, HEIGHT as u32)
    }
}

impl DrawTarget for FrameBuffer {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(coord, color) in pixels {
            let x = coord.x;
            let y = coord.y;
            if x >= 0 && y >= 0 && (x as usize) < WIDTH && (y as usize) < HEIGHT {
                self.set_pixel(x as usize, y as usize, color);
            }
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let x_start = (area.top_left.x.max(0) as usize).min(WIDTH);
        let y_start = (area.top_left.y.max(0) as usize).min(HEIGHT);
        let x_end = (area.top_left.x.max(0) as usize)
            .saturating_add(area.size.width as usize)
            .min(WIDTH);
        let y_end = (area.top_left.y.max(0) as usize)
            .saturating_add(area.size.height as usize)
            .min(HEIGHT);

        for y in y_start..y_end {
            for x in x_start..x_end {
                self.set_pixel(x, y, color);
            }
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        for y in 0..HEIGHT {
            for x in 0..WIDTH {
                self.set_pixel(x, y, color);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::mock_display::MockDisplay;
    use embedded_graphics::primitives::PrimitiveStyle;

    /// Hardware stand-in that only counts the pixels it receives.
    #[derive(Default)]
    struct CountingTarget {
        pixels: usize,
    }

    impl OriginDimensions for CountingTarget {
        fn size(&self) -> Size {
            Size::new(320, 240)
        }
    }

    impl DrawTarget for CountingTarget {
        type Color = BinaryColor;
        type Error = Infallible;

        fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
        where
            I: IntoIterator<Item = Pixel<Self::Color>>,
        {
            self.pixels += pixels.into_iter().count();
            Ok(())
        }
    }

    #[test]
    fn test_new_buffer_is_clean() {
        let fb = FrameBuffer::new();
        assert!(!fb.is_dirty());
        assert_eq!(fb.pixel(Point::zero()), Some(BinaryColor::Off));
        assert_eq!(fb.pixel(Point::new(64, 0)), None);
    }

    #[test]
    fn test_flush_sends_only_dirty_rect() {
        let mut fb = FrameBuffer::new();
        Rectangle::new(Point::new(10, 5), Size::new(3, 2))
            .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
            .draw(&mut fb)
            .unwrap();

        let mut target = CountingTarget::default();
        fb.flush(&mut target).unwrap();
        assert_eq!(target.pixels, 6);
        assert!(!fb.is_dirty());
    }

    #[test]
    fn test_identical_redraw_flushes_nothing() {
        let mut fb = FrameBuffer::new();
        let square = Rectangle::new(Point::new(1, 1), Size::new(4, 4))
            .into_styled(PrimitiveStyle::with_fill(BinaryColor::On));
        square.draw(&mut fb).unwrap();

        let mut target = CountingTarget::default();
        fb.flush(&mut target).unwrap();
        let first = target.pixels;

        fb.clear(BinaryColor::Off).unwrap();
        square.draw(&mut fb).unwrap();
        fb.flush(&mut target).unwrap();
        assert_eq!(target.pixels, first);
    }

    #[test]
    fn test_failed_flush_is_retried() {
        struct FailingTarget;

        impl OriginDimensions for FailingTarget {
            fn size(&self) -> Size {
                Size::new(64, 48)
            }
        }

        impl DrawTarget for FailingTarget {
            type Color = BinaryColor;
            type Error = ();

            fn draw_iter<I>(&mut self, _pixels: I) -> Result<(), Self::Error>
            where
                I: IntoIterator<Item = Pixel<Self::Color>>,
            {
                Err(())
            }
        }

        let mut fb = FrameBuffer::new();
        Pixel(Point::new(3, 3), BinaryColor::On).draw(&mut fb).unwrap();
        assert!(fb.flush(&mut FailingTarget).is_err());
        assert!(fb.is_dirty());

        let mut target = CountingTarget::default();
        fb.flush(&mut target).unwrap();
        assert_eq!(target.pixels, 1);
    }

    #[test]
    fn test_scaled_flush_magnifies_pixels() {
        let mut fb = FrameBuffer::new();
        Pixel(Point::new(1, 1), BinaryColor::On).draw(&mut fb).unwrap();

        let mut display = MockDisplay::<BinaryColor>::new();
        fb.flush_scaled(&mut display, Point::zero(), 2).unwrap();

        display.assert_pattern(&[
            "    ", //
            "    ", //
            "  ##", //
            "  ##", //
        ]);
    }

    #[test]
    fn test_out_of_bounds_draws_are_clipped() {
        let mut fb = FrameBuffer::new();
        Rectangle::new(Point::new(-5, 40), Size::new(100, 100))
            .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
            .draw(&mut fb)
            .unwrap();

        assert_eq!(fb.pixel(Point::new(0, 47)), Some(BinaryColor::On));
        assert_eq!(fb.pixel(Point::new(63, 40)), Some(BinaryColor::On));
        assert_eq!(fb.pixel(Point::new(0, 39)), Some(BinaryColor::Off));
    }
}
