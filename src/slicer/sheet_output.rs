//! Sheet output rule
//!
//! A sheet output assembles several source regions into one new image.
//! Rules are written against a template resolution; when the actual source
//! is an integer multiple of that resolution (for example a 2x texture),
//! every coordinate is scaled by the same factor.

use std::path::Path;

use image::RgbaImage;
use log::{debug, info};

use crate::canvas::{save_png, DrawingSurface, Region};
use crate::errors::{SliceError, SliceResult};

use super::output_spec::{LeftoverMark, OutputSpec};

/// Mirroring applied to a placed region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Flip {
    #[default]
    None,
    Horizontal,
    Vertical,
    Both,
}

impl Flip {
    /// Parse a flip name ("none", "horizontal", "vertical", "both")
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "none" => Some(Flip::None),
            "horizontal" | "h" => Some(Flip::Horizontal),
            "vertical" | "v" => Some(Flip::Vertical),
            "both" | "hv" => Some(Flip::Both),
            _ => None,
        }
    }

    fn apply(&self, image: RgbaImage) -> RgbaImage {
        match self {
            Flip::None => image,
            Flip::Horizontal => image::imageops::flip_horizontal(&image),
            Flip::Vertical => image::imageops::flip_vertical(&image),
            Flip::Both => image::imageops::rotate180(&image),
        }
    }
}

/// One source region copied to an offset of the output sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Source region in template coordinates
    pub from: Region,
    /// Destination X in template coordinates
    pub to_x: u32,
    /// Destination Y in template coordinates
    pub to_y: u32,
    /// Mirroring applied before placing
    pub flip: Flip,
}

impl Placement {
    pub fn new(from: Region, to_x: u32, to_y: u32) -> Self {
        Placement { from, to_x, to_y, flip: Flip::None }
    }

    pub fn flipped(mut self, flip: Flip) -> Self {
        self.flip = flip;
        self
    }

    /// Destination rectangle in template coordinates
    fn target(&self) -> Region {
        Region::new(self.to_x, self.to_y, self.from.width, self.from.height)
    }
}

/// Output rule that assembles placements into a new image
#[derive(Debug, Clone)]
pub struct SheetOutput {
    path: String,
    /// Output size in template coordinates
    width: u32,
    height: u32,
    /// Source size the template coordinates refer to
    template_width: u32,
    template_height: u32,
    placements: Vec<Placement>,
    mark: LeftoverMark,
}

impl SheetOutput {
    /// Create a new sheet output
    ///
    /// # Arguments
    /// * `path` - Destination path relative to the output root
    /// * `width` - Output width in template coordinates
    /// * `height` - Output height in template coordinates
    /// * `template_width` - Source width the rule was authored against
    /// * `template_height` - Source height the rule was authored against
    pub fn new(path: impl Into<String>, width: u32, height: u32,
               template_width: u32, template_height: u32) -> Self {
        SheetOutput {
            path: path.into(),
            width,
            height,
            template_width,
            template_height,
            placements: Vec::new(),
            mark: LeftoverMark::Clear,
        }
    }

    /// Add a placement
    pub fn place(mut self, placement: Placement) -> Self {
        self.placements.push(placement);
        self
    }

    pub fn with_mark(mut self, mark: LeftoverMark) -> Self {
        self.mark = mark;
        self
    }

    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// Determine the integer factor between the template and the source
    fn scale_for(&self, source_width: u32, source_height: u32) -> SliceResult<u32> {
        if self.template_width == 0 || self.template_height == 0 {
            return Err(SliceError::InvalidGeometry(format!(
                "Template size of {} must not be zero", self.path)));
        }

        let scale = source_width / self.template_width;
        if scale == 0
            || source_width % self.template_width != 0
            || source_height as u64 != self.template_height as u64 * scale as u64
        {
            return Err(SliceError::InvalidGeometry(format!(
                "Source {}x{} is not an integer multiple of template {}x{} for {}",
                source_width, source_height, self.template_width, self.template_height, self.path)));
        }

        Ok(scale)
    }
}

impl OutputSpec for SheetOutput {
    fn process(&self, output_root: &Path, source_path: &Path, source: &RgbaImage,
               leftover: &mut DrawingSurface<'_>) -> SliceResult<()> {
        let scale = self.scale_for(source.width(), source.height())?;
        let out_width = self.width.checked_mul(scale);
        let out_height = self.height.checked_mul(scale);
        let (Some(out_width), Some(out_height)) = (out_width, out_height) else {
            return Err(SliceError::InvalidGeometry(format!("Sheet {} is too large", self.path)));
        };
        debug!("Sheet {} uses scale {} ({}x{})", self.path, scale, out_width, out_height);

        // Check every placement before anything is written
        for placement in &self.placements {
            placement.from.scaled(scale)
                .ensure_within(source.width(), source.height(), "Sheet source region")?;
            placement.target().scaled(scale)
                .ensure_within(out_width, out_height, "Sheet target region")?;
        }

        info!("Assembling {} from {} placements of {}",
              self.path, self.placements.len(), source_path.display());

        let mut sheet = RgbaImage::new(out_width, out_height);
        for placement in &self.placements {
            let from = placement.from.scaled(scale);
            let target = placement.target().scaled(scale);
            let part = image::imageops::crop_imm(source, from.x, from.y, from.width, from.height)
                .to_image();
            let part = placement.flip.apply(part);
            image::imageops::overlay(&mut sheet, &part, target.x as i64, target.y as i64);
        }
        save_png(&sheet, &output_root.join(&self.path))?;

        for placement in &self.placements {
            self.mark.apply(leftover, placement.from.scaled(scale));
        }
        Ok(())
    }

    fn destination(&self) -> &str {
        &self.path
    }
}
