//! Main interface to the slicing pipeline
//!
//! `Slicer` owns one run: it processes input tasks strictly in order
//! against a single leftover map, applies the failure policy, and persists
//! the leftover canvases once every task has finished.

use std::path::{Path, PathBuf};

use log::{error, info, warn};

use crate::errors::SliceResult;
use crate::slicer::{InputTask, LeftoverMap, TaskOutcome};
use crate::utils::logger::Logger;
use crate::utils::progress::ProgressTracker;

/// Run configuration
#[derive(Debug, Clone)]
pub struct SlicerConfig {
    /// Directory source paths are resolved against
    pub input_root: PathBuf,
    /// Directory outputs are written below
    pub output_root: PathBuf,
    /// Directory leftover images are written below, if any
    pub leftover_root: Option<PathBuf>,
    /// Continue with the remaining inputs after a failed one
    pub keep_going: bool,
    /// Draw a progress bar over the inputs
    pub show_progress: bool,
}

impl SlicerConfig {
    /// Create a configuration with the default policy
    ///
    /// # Arguments
    /// * `input_root` - Directory source paths are resolved against
    /// * `output_root` - Directory outputs are written below
    pub fn new(input_root: impl Into<PathBuf>, output_root: impl Into<PathBuf>) -> Self {
        SlicerConfig {
            input_root: input_root.into(),
            output_root: output_root.into(),
            leftover_root: None,
            keep_going: false,
            show_progress: false,
        }
    }

    pub fn leftover_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.leftover_root = Some(root.into());
        self
    }

    pub fn keep_going(mut self, keep_going: bool) -> Self {
        self.keep_going = keep_going;
        self
    }

    pub fn show_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }
}

/// Summary of a finished run
#[derive(Debug, Default)]
pub struct RunReport {
    /// Source paths that were processed
    pub processed: Vec<String>,
    /// Absolute paths of sources that did not exist
    pub skipped: Vec<PathBuf>,
    /// Source paths that failed, with the error message
    pub failed: Vec<(String, String)>,
    /// Number of leftover images written
    pub leftovers_written: usize,
}

impl RunReport {
    /// Whether no input failed
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Sequential slicing pipeline
pub struct Slicer<'a> {
    config: SlicerConfig,
    /// Logger for recording run milestones
    logger: &'a Logger,
}

impl<'a> Slicer<'a> {
    /// Create a new slicer
    ///
    /// # Arguments
    /// * `config` - Run configuration
    /// * `logger` - Logger for recording run milestones
    pub fn new(config: SlicerConfig, logger: &'a Logger) -> Self {
        Slicer { config, logger }
    }

    pub fn config(&self) -> &SlicerConfig {
        &self.config
    }

    /// Run every task with a fresh leftover map
    ///
    /// # Arguments
    /// * `tasks` - Input tasks in processing order
    ///
    /// # Returns
    /// The run report, or the first error when not keeping going
    pub fn run(&self, tasks: &[InputTask]) -> SliceResult<RunReport> {
        let mut leftovers = LeftoverMap::new();
        self.run_with(tasks, &mut leftovers)
    }

    /// Run every task against a caller-owned leftover map
    ///
    /// Leftovers are saved only after all tasks ran. In fail-fast mode the
    /// first error is returned immediately and nothing is saved.
    pub fn run_with(&self, tasks: &[InputTask], leftovers: &mut LeftoverMap) -> SliceResult<RunReport> {
        info!("Slicing {} inputs from {} into {}",
              tasks.len(), self.config.input_root.display(), self.config.output_root.display());

        let progress = if self.config.show_progress {
            ProgressTracker::new(tasks.len() as u64, "Slicing")
        } else {
            ProgressTracker::hidden()
        };

        let mut report = RunReport::default();
        for task in tasks {
            progress.set_message(task.path());
            let result = task.process(&self.config.input_root, &self.config.output_root, leftovers);
            progress.increment(1);

            match result {
                Ok(TaskOutcome::Processed { outputs }) => {
                    self.logger.log(&format!("Processed {} ({} outputs)", task.path(), outputs))?;
                    report.processed.push(task.path().to_string());
                }
                Ok(TaskOutcome::Skipped { path }) => {
                    self.logger.log(&format!("Skipped {}", path.display()))?;
                    report.skipped.push(path);
                }
                Err(e) if self.config.keep_going => {
                    error!("Input {} failed: {}", task.path(), e);
                    self.logger.log(&format!("Failed {}: {}", task.path(), e))?;
                    report.failed.push((task.path().to_string(), e.to_string()));
                }
                Err(e) => {
                    error!("Input {} failed, aborting run: {}", task.path(), e);
                    return Err(e);
                }
            }
        }
        progress.finish();

        if let Some(root) = &self.config.leftover_root {
            report.leftovers_written = self.save_leftovers(leftovers, root)?;
        }

        if !report.is_success() {
            warn!("{} of {} inputs failed", report.failed.len(), tasks.len());
        }
        info!("Run finished: {} processed, {} skipped, {} failed",
              report.processed.len(), report.skipped.len(), report.failed.len());
        Ok(report)
    }

    fn save_leftovers(&self, leftovers: &LeftoverMap, root: &Path) -> SliceResult<usize> {
        info!("Saving {} leftover images to {}", leftovers.len(), root.display());
        let written = leftovers.save_all(root)?;
        self.logger.log(&format!("Saved {} leftover images", written))?;
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Region;
    use crate::slicer::RegionOutput;
    use image::{Rgba, RgbaImage};

    fn setup() -> (tempfile::TempDir, SlicerConfig) {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in");
        std::fs::create_dir_all(&input).unwrap();
        RgbaImage::from_pixel(4, 4, Rgba([255, 0, 0, 255]))
            .save(input.join("sprite.png"))
            .unwrap();
        let config = SlicerConfig::new(input, dir.path().join("out"))
            .leftover_root(dir.path().join("leftovers"));
        (dir, config)
    }

    fn tasks() -> Vec<InputTask> {
        vec![
            InputTask::new("sprite.png")
                .output(RegionOutput::new("bad.png", Region::new(3, 3, 2, 2))),
            InputTask::new("missing.png"),
            InputTask::new("sprite.png")
                .output(RegionOutput::new("good.png", Region::new(0, 0, 2, 2))),
        ]
    }

    #[test]
    fn test_fail_fast_aborts_without_leftovers() {
        let (dir, config) = setup();
        let logger = Logger::sink();

        let result = Slicer::new(config, &logger).run(&tasks());

        assert!(result.is_err());
        assert!(!dir.path().join("out/good.png").exists());
        assert!(!dir.path().join("leftovers").exists());
    }

    #[test]
    fn test_keep_going_reports_and_saves() {
        let (dir, config) = setup();
        let logger = Logger::sink();

        let report = Slicer::new(config.keep_going(true), &logger).run(&tasks()).unwrap();

        assert!(!report.is_success());
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].0, "sprite.png");
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.processed, vec!["sprite.png".to_string()]);
        assert_eq!(report.leftovers_written, 1);
        assert!(dir.path().join("out/good.png").exists());

        let leftover = image::open(dir.path().join("leftovers/sprite.png")).unwrap().to_rgba8();
        assert_eq!(leftover.get_pixel(0, 0)[3], 0);
        assert_eq!(leftover.get_pixel(3, 3)[3], 255);
    }
}
