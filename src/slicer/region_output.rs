//! Single region output rule
//!
//! Crops one rectangle out of the source and writes it as its own image.

use std::path::Path;

use image::RgbaImage;
use log::info;

use crate::canvas::{save_png, DrawingSurface, Region};
use crate::errors::SliceResult;

use super::output_spec::{LeftoverMark, OutputSpec};

/// Output rule that exports one source region unchanged
#[derive(Debug, Clone)]
pub struct RegionOutput {
    /// Destination path relative to the output root
    path: String,
    /// Source region to export
    region: Region,
    /// How the exported region is marked on the leftover canvas
    mark: LeftoverMark,
}

impl RegionOutput {
    /// Create a new region output that clears the exported pixels
    ///
    /// # Arguments
    /// * `path` - Destination path relative to the output root
    /// * `region` - Source region to export
    pub fn new(path: impl Into<String>, region: Region) -> Self {
        RegionOutput {
            path: path.into(),
            region,
            mark: LeftoverMark::Clear,
        }
    }

    /// Use a different leftover mark
    pub fn with_mark(mut self, mark: LeftoverMark) -> Self {
        self.mark = mark;
        self
    }

    pub fn region(&self) -> Region {
        self.region
    }
}

impl OutputSpec for RegionOutput {
    fn process(&self, output_root: &Path, source_path: &Path, source: &RgbaImage,
               leftover: &mut DrawingSurface<'_>) -> SliceResult<()> {
        let region = self.region;
        region.ensure_within(source.width(), source.height(), "Output region")?;

        info!("Exporting {} of {} to {}", region, source_path.display(), self.path);
        let cropped = image::imageops::crop_imm(source, region.x, region.y, region.width, region.height)
            .to_image();
        save_png(&cropped, &output_root.join(&self.path))?;

        self.mark.apply(leftover, region);
        Ok(())
    }

    fn destination(&self) -> &str {
        &self.path
    }
}
