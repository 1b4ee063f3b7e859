//! Slicing of source images into output images
//!
//! This module provides the per-input task that drives output rules
//! against a decoded source image, the run-scoped leftover map, and the
//! output rule strategies shipped with the crate.

mod output_spec;
mod region_output;
mod sheet_output;
mod copy_output;
mod leftover_map;
mod input_task;

// Public exports
pub use output_spec::{LeftoverMark, OutputSpec};
pub use region_output::RegionOutput;
pub use sheet_output::{Flip, Placement, SheetOutput};
pub use copy_output::CopyOutput;
pub use leftover_map::LeftoverMap;
pub use input_task::{InputTask, TaskOutcome};
