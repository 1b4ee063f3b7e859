//! Region structure for defining a pixel rectangle
//!
//! This module defines the Region structure that specifies a rectangular
//! area of an image. The coordinates are in pixels and follow the typical
//! image coordinate system where (0,0) is the top-left corner of the image.

use crate::errors::{SliceError, SliceResult};

/// Region of an image (in pixel coordinates)
///
/// Represents a rectangular area defined by its top-left corner coordinates
/// and dimensions. Output rules use it both to read from the source image
/// and to mark the matching area of the leftover canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Region {
    /// X-coordinate of the top-left corner (pixels from left)
    pub x: u32,

    /// Y-coordinate of the top-left corner (pixels from top)
    pub y: u32,

    /// Width of the region in pixels
    pub width: u32,

    /// Height of the region in pixels
    pub height: u32,
}

impl Region {
    /// Create a new region
    ///
    /// # Arguments
    /// * `x` - X-coordinate of the top-left corner
    /// * `y` - Y-coordinate of the top-left corner
    /// * `width` - Width of the region in pixels
    /// * `height` - Height of the region in pixels
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Region { x, y, width, height }
    }

    /// Region covering a whole image of the given size
    pub fn full(width: u32, height: u32) -> Self {
        Region::new(0, 0, width, height)
    }

    /// Get the rightmost X coordinate (exclusive)
    pub fn end_x(&self) -> u64 {
        self.x as u64 + self.width as u64
    }

    /// Get the bottommost Y coordinate (exclusive)
    pub fn end_y(&self) -> u64 {
        self.y as u64 + self.height as u64
    }

    /// Whether the region covers no pixels
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Check whether the region lies entirely inside an image
    ///
    /// # Arguments
    /// * `width` - Width of the image
    /// * `height` - Height of the image
    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        self.end_x() <= width as u64 && self.end_y() <= height as u64
    }

    /// Fail with an `InvalidGeometry` error unless the region is non-empty
    /// and fits inside an image of the given size
    ///
    /// # Arguments
    /// * `width` - Width of the image
    /// * `height` - Height of the image
    /// * `what` - Description of the region used in the error message
    pub fn ensure_within(&self, width: u32, height: u32, what: &str) -> SliceResult<()> {
        if self.is_empty() {
            return Err(SliceError::InvalidGeometry(format!("{} {} is empty", what, self)));
        }
        if !self.fits_within(width, height) {
            return Err(SliceError::InvalidGeometry(format!(
                "{} {} exceeds image bounds {}x{}",
                what, self, width, height
            )));
        }
        Ok(())
    }

    /// Multiply every coordinate by an integer factor
    ///
    /// Used to map template coordinates onto a higher resolution source.
    /// Saturates instead of overflowing so bounds checks still reject it.
    pub fn scaled(&self, factor: u32) -> Self {
        Region {
            x: self.x.saturating_mul(factor),
            y: self.y.saturating_mul(factor),
            width: self.width.saturating_mul(factor),
            height: self.height.saturating_mul(factor),
        }
    }

    /// Intersect the region with an image of the given size
    ///
    /// Returns `None` when nothing of the region remains visible.
    pub fn clipped_to(&self, width: u32, height: u32) -> Option<Self> {
        let end_x = self.end_x().min(width as u64);
        let end_y = self.end_y().min(height as u64);
        if (self.x as u64) >= end_x || (self.y as u64) >= end_y {
            return None;
        }
        Some(Region {
            x: self.x,
            y: self.y,
            width: (end_x - self.x as u64) as u32,
            height: (end_y - self.y as u64) as u32,
        })
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}+{}+{}", self.width, self.height, self.x, self.y)
    }
}
