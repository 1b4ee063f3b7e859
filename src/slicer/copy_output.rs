//! Whole image output rule

use std::path::Path;

use image::RgbaImage;
use log::info;

use crate::canvas::{save_png, DrawingSurface, Region};
use crate::errors::SliceResult;

use super::output_spec::{LeftoverMark, OutputSpec};

/// Output rule that copies the entire source and consumes all of it
#[derive(Debug, Clone)]
pub struct CopyOutput {
    path: String,
    mark: LeftoverMark,
}

impl CopyOutput {
    pub fn new(path: impl Into<String>) -> Self {
        CopyOutput {
            path: path.into(),
            mark: LeftoverMark::Clear,
        }
    }

    pub fn with_mark(mut self, mark: LeftoverMark) -> Self {
        self.mark = mark;
        self
    }
}

impl OutputSpec for CopyOutput {
    fn process(&self, output_root: &Path, source_path: &Path, source: &RgbaImage,
               leftover: &mut DrawingSurface<'_>) -> SliceResult<()> {
        info!("Copying {} to {}", source_path.display(), self.path);
        save_png(source, &output_root.join(&self.path))?;

        self.mark.apply(leftover, Region::full(source.width(), source.height()));
        Ok(())
    }

    fn destination(&self) -> &str {
        &self.path
    }
}
