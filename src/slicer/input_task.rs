//! Per-source slicing task
//!
//! An input task decodes one source image, makes sure a leftover canvas
//! exists for it, and runs its output rules in declaration order against
//! a single drawing surface on that canvas.

use std::path::{Path, PathBuf};

use log::{debug, error, info, warn};

use crate::canvas::{decode_rgba, Canvas};
use crate::errors::{SliceError, SliceResult};

use super::leftover_map::LeftoverMap;
use super::output_spec::OutputSpec;

/// Result of processing one input task
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskOutcome {
    /// The source was decoded and every output rule ran
    Processed {
        /// Number of output rules executed
        outputs: usize,
    },
    /// The source file does not exist; nothing was done
    Skipped {
        /// Absolute path that was looked up
        path: PathBuf,
    },
}

impl std::fmt::Display for TaskOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskOutcome::Processed { outputs } => write!(f, "Processed {} outputs", outputs),
            TaskOutcome::Skipped { path } => {
                write!(f, "Input file {} not found, skipping!", path.display())
            }
        }
    }
}

/// One source image and the ordered output rules applied to it
pub struct InputTask {
    /// Source path relative to the input root
    path: String,
    /// Output rules in execution order
    outputs: Vec<Box<dyn OutputSpec>>,
}

impl InputTask {
    /// Create a task without output rules
    ///
    /// # Arguments
    /// * `path` - Source path relative to the input root
    pub fn new(path: impl Into<String>) -> Self {
        InputTask {
            path: path.into(),
            outputs: Vec::new(),
        }
    }

    /// Append an output rule
    pub fn output(mut self, output: impl OutputSpec + 'static) -> Self {
        self.outputs.push(Box::new(output));
        self
    }

    /// Append several boxed output rules
    pub fn with_outputs(mut self, outputs: Vec<Box<dyn OutputSpec>>) -> Self {
        self.outputs.extend(outputs);
        self
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn outputs(&self) -> &[Box<dyn OutputSpec>] {
        &self.outputs
    }

    /// Resolve the source path against an input root
    pub fn resolve(&self, input_root: &Path) -> PathBuf {
        input_root.join(&self.path)
    }

    /// Process the source image
    ///
    /// A missing source is reported and skipped. Decode failures and the
    /// first failing output rule abort this task; output rules after the
    /// failing one do not run.
    ///
    /// # Arguments
    /// * `input_root` - Directory source paths are resolved against
    /// * `output_root` - Directory output rules write below
    /// * `leftovers` - Leftover canvases of the current run
    ///
    /// # Returns
    /// What happened to the task, or the error that aborted it
    pub fn process(&self, input_root: &Path, output_root: &Path,
                   leftovers: &mut LeftoverMap) -> SliceResult<TaskOutcome> {
        let input_path = self.resolve(input_root);

        if !input_path.exists() {
            let absolute = std::path::absolute(&input_path).unwrap_or(input_path);
            let outcome = TaskOutcome::Skipped { path: absolute };
            eprintln!("{}", outcome);
            debug!("Skipped task for {}", self.path);
            return Ok(outcome);
        }

        info!("Processing {} with {} outputs", input_path.display(), self.outputs.len());
        let source = decode_rgba(&input_path)?;

        let canvas = leftovers.get_or_insert_with(&self.path, || {
            let mut canvas = Canvas::new(source.width(), source.height());
            canvas.draw_image(&source, 0, 0);
            canvas
        });
        if canvas.width() != source.width() || canvas.height() != source.height() {
            warn!("Leftover canvas for {} is {}x{} but source is {}x{}",
                  self.path, canvas.width(), canvas.height(), source.width(), source.height());
        }

        // Dropped on every return path, including `?` below
        let mut surface = canvas.acquire_surface();

        for (index, output) in self.outputs.iter().enumerate() {
            debug!("Running output {} ({}) for {}", index, output.destination(), self.path);
            output.process(output_root, &input_path, &source, &mut surface)
                .map_err(|e| {
                    error!("Output {} of {} failed: {}", output.destination(), self.path, e);
                    SliceError::OutputFailed {
                        input: self.path.clone(),
                        output: output.destination().to_string(),
                        source: Box::new(e),
                    }
                })?;
        }

        drop(surface);
        Ok(TaskOutcome::Processed { outputs: self.outputs.len() })
    }
}

impl std::fmt::Debug for InputTask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let destinations: Vec<&str> = self.outputs.iter().map(|o| o.destination()).collect();
        f.debug_struct("InputTask")
            .field("path", &self.path)
            .field("outputs", &destinations)
            .finish()
    }
}
