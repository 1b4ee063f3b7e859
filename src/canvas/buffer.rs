//! RGBA pixel canvas
//!
//! A canvas wraps an RGBA8 image buffer and keeps track of how often a
//! drawing surface was handed out and given back, so callers can verify
//! that every acquisition was released.

use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

use image::{GenericImageView, ImageFormat, ImageReader, Pixel, Rgba, RgbaImage};
use log::{debug, info};

use crate::errors::{SliceError, SliceResult};

use super::surface::DrawingSurface;

/// Addressable 2D RGBA pixel buffer
#[derive(Debug, Clone)]
pub struct Canvas {
    /// Pixel storage
    pub(super) pixels: RgbaImage,
    /// Number of drawing surfaces handed out
    pub(super) acquisitions: u32,
    /// Number of drawing surfaces given back
    pub(super) releases: u32,
}

impl Canvas {
    /// Create a fully transparent canvas
    ///
    /// # Arguments
    /// * `width` - Width in pixels
    /// * `height` - Height in pixels
    pub fn new(width: u32, height: u32) -> Self {
        Canvas::from_image(RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 0])))
    }

    /// Wrap an existing RGBA image
    pub fn from_image(pixels: RgbaImage) -> Self {
        Canvas {
            pixels,
            acquisitions: 0,
            releases: 0,
        }
    }

    /// Load an image file into a canvas
    ///
    /// # Arguments
    /// * `path` - Path to any raster format the codec can decode
    ///
    /// # Returns
    /// The decoded canvas, or a `Decode` error naming the path
    pub fn load(path: &Path) -> SliceResult<Self> {
        decode_rgba(path).map(Canvas::from_image)
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Get a single pixel
    pub fn pixel(&self, x: u32, y: u32) -> Rgba<u8> {
        *self.pixels.get_pixel(x, y)
    }

    /// Borrow the underlying pixel buffer
    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Consume the canvas and return its pixel buffer
    pub fn into_image(self) -> RgbaImage {
        self.pixels
    }

    /// Composite another image onto this canvas (source-over)
    ///
    /// Parts of `source` that fall outside the canvas are clipped. Drawing
    /// onto fully transparent pixels copies the source bytes unchanged.
    ///
    /// # Arguments
    /// * `source` - Image to draw
    /// * `x` - Horizontal offset of the source's top-left corner
    /// * `y` - Vertical offset of the source's top-left corner
    pub fn draw_image<I>(&mut self, source: &I, x: i64, y: i64)
    where
        I: GenericImageView<Pixel = Rgba<u8>>,
    {
        let (source_width, source_height) = source.dimensions();
        let start_x = x.max(0);
        let start_y = y.max(0);
        let end_x = x.saturating_add(source_width as i64).min(self.width() as i64);
        let end_y = y.saturating_add(source_height as i64).min(self.height() as i64);

        for canvas_y in start_y..end_y {
            for canvas_x in start_x..end_x {
                let pixel = source.get_pixel((canvas_x - x) as u32, (canvas_y - y) as u32);
                composite(self.pixels.get_pixel_mut(canvas_x as u32, canvas_y as u32), pixel);
            }
        }
    }

    /// Hand out a drawing surface
    ///
    /// The surface borrows the canvas mutably and is released when dropped.
    pub fn acquire_surface(&mut self) -> DrawingSurface<'_> {
        self.acquisitions += 1;
        debug!("Acquired drawing surface #{} on {}x{} canvas",
               self.acquisitions, self.width(), self.height());
        DrawingSurface::new(self)
    }

    /// Number of drawing surfaces acquired so far
    pub fn acquisitions(&self) -> u32 {
        self.acquisitions
    }

    /// Number of drawing surfaces released so far
    pub fn releases(&self) -> u32 {
        self.releases
    }

    /// Save the canvas as a PNG file, creating parent directories
    ///
    /// # Arguments
    /// * `path` - Destination path
    pub fn save(&self, path: &Path) -> SliceResult<()> {
        save_png(&self.pixels, path)
    }
}

/// Composite one pixel over another (source-over)
///
/// `Pixel::blend` works in floats and truncates, so it is only used when
/// both pixels are partially covered. Over a transparent destination or
/// with an opaque source the result is the source pixel itself.
pub(super) fn composite(destination: &mut Rgba<u8>, source: Rgba<u8>) {
    if destination[3] == 0 || source[3] == u8::MAX {
        *destination = source;
    } else if source[3] != 0 {
        destination.blend(&source);
    }
}

/// Decode an image file into RGBA8 pixels
///
/// The file handle lives only inside this function, so it is closed on
/// both the success and the failure path.
///
/// # Arguments
/// * `path` - Path to the image file
///
/// # Returns
/// The decoded pixels or a `Decode` error carrying the path
pub fn decode_rgba(path: &Path) -> SliceResult<RgbaImage> {
    debug!("Decoding {}", path.display());

    let reader = BufReader::new(File::open(path)?);
    let reader = ImageReader::new(reader).with_guessed_format()?;
    let image = reader.decode().map_err(|source| SliceError::Decode {
        path: path.to_path_buf(),
        source,
    })?;

    debug!("Decoded {}: {}x{}", path.display(), image.width(), image.height());
    Ok(image.to_rgba8())
}

/// Write RGBA pixels as PNG, creating parent directories as needed
///
/// # Arguments
/// * `pixels` - Image to encode
/// * `path` - Destination path
pub fn save_png(pixels: &RgbaImage, path: &Path) -> SliceResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    pixels.save_with_format(path, ImageFormat::Png)?;
    info!("Saved {}x{} image to {}", pixels.width(), pixels.height(), path.display());
    Ok(())
}
