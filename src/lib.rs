pub mod errors;
pub mod canvas;
pub mod slicer;
pub mod manifest;
pub mod utils;
pub mod commands;
pub mod api;

pub use crate::api::{RunReport, Slicer, SlicerConfig};

pub use errors::{SliceError, SliceResult};
pub use canvas::{Canvas, DrawingSurface, Region};
pub use slicer::{InputTask, LeftoverMap, OutputSpec, TaskOutcome};
pub use manifest::Manifest;
