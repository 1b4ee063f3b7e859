//! Scoped drawing surface
//!
//! A `DrawingSurface` is the only way output rules mutate a leftover
//! canvas. It holds the canvas mutably for its lifetime and records the
//! release when dropped, including during error propagation.

use image::{GenericImageView, Rgba};
use log::debug;

use super::buffer::{composite, Canvas};
use super::region::Region;

/// Mutable drawing handle on a canvas, released on drop
pub struct DrawingSurface<'a> {
    canvas: &'a mut Canvas,
}

impl<'a> DrawingSurface<'a> {
    pub(super) fn new(canvas: &'a mut Canvas) -> Self {
        DrawingSurface { canvas }
    }

    pub fn width(&self) -> u32 {
        self.canvas.width()
    }

    pub fn height(&self) -> u32 {
        self.canvas.height()
    }

    /// Read back a pixel of the underlying canvas
    pub fn pixel(&self, x: u32, y: u32) -> Rgba<u8> {
        self.canvas.pixel(x, y)
    }

    /// Composite an image onto the canvas (source-over, clipped)
    pub fn draw_image<I>(&mut self, source: &I, x: i64, y: i64)
    where
        I: GenericImageView<Pixel = Rgba<u8>>,
    {
        self.canvas.draw_image(source, x, y);
    }

    /// Make every pixel of a region fully transparent
    ///
    /// Parts of the region outside the canvas are ignored.
    pub fn clear_rect(&mut self, region: Region) {
        let Some(visible) = region.clipped_to(self.width(), self.height()) else {
            return;
        };

        for y in visible.y..visible.y + visible.height {
            for x in visible.x..visible.x + visible.width {
                self.canvas.pixels.put_pixel(x, y, Rgba([0, 0, 0, 0]));
            }
        }
    }

    /// Composite a solid colour over a region (source-over, clipped)
    pub fn fill_rect(&mut self, region: Region, color: Rgba<u8>) {
        let Some(visible) = region.clipped_to(self.width(), self.height()) else {
            return;
        };

        for y in visible.y..visible.y + visible.height {
            for x in visible.x..visible.x + visible.width {
                composite(self.canvas.pixels.get_pixel_mut(x, y), color);
            }
        }
    }
}

impl Drop for DrawingSurface<'_> {
    fn drop(&mut self) {
        self.canvas.releases += 1;
        debug!("Released drawing surface #{}", self.canvas.releases);
    }
}
