//! Pixel canvases and drawing surfaces
//!
//! This module provides the RGBA canvas used for leftover tracking, the
//! scoped drawing surface through which it is mutated, and the pixel
//! Region type shared by all output rules.

mod buffer;
mod region;
mod surface;
#[cfg(test)]
mod tests;

pub use buffer::{decode_rgba, save_png, Canvas};
pub use region::Region;
pub use surface::DrawingSurface;
