//! Output rule strategy definitions
//!
//! This module defines the strategy interface every output rule
//! implements, allowing new kinds of slicing rules to be added without
//! touching the per-input orchestration.

use std::path::Path;

use image::{Rgba, RgbaImage};

use crate::canvas::{DrawingSurface, Region};
use crate::errors::SliceResult;

/// Strategy for producing one output image from a source image
///
/// Implementations read a part of the source, write a derived image below
/// the output root, and record which source pixels they consumed on the
/// leftover surface. They must not keep references to either argument.
pub trait OutputSpec {
    /// Produce the output image and mark the consumed pixels
    ///
    /// # Arguments
    /// * `output_root` - Directory the output path is resolved against
    /// * `source_path` - Resolved path of the source image
    /// * `source` - Decoded source pixels
    /// * `leftover` - Drawing surface on the leftover canvas of the source
    ///
    /// # Returns
    /// Result indicating success or the failure that aborts this input
    fn process(&self, output_root: &Path, source_path: &Path, source: &RgbaImage,
               leftover: &mut DrawingSurface<'_>) -> SliceResult<()>;

    /// Destination path relative to the output root
    fn destination(&self) -> &str;
}

/// How an output rule marks consumed pixels on the leftover canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LeftoverMark {
    /// Make the consumed pixels fully transparent
    #[default]
    Clear,
    /// Composite a solid marker colour over the consumed pixels
    Fill(Rgba<u8>),
}

impl LeftoverMark {
    /// Apply the mark to a region of the leftover surface
    pub fn apply(&self, surface: &mut DrawingSurface<'_>, region: Region) {
        match self {
            LeftoverMark::Clear => surface.clear_rect(region),
            LeftoverMark::Fill(color) => surface.fill_rect(region, *color),
        }
    }
}
