//! Manifest check command
//!
//! This module implements a dry run: the manifest is parsed and every
//! input is looked up, but no image is decoded or written.

use clap::ArgMatches;
use log::{info, warn};
use std::path::PathBuf;

use crate::commands::command_traits::Command;
use crate::errors::{SliceError, SliceResult};
use crate::manifest::Manifest;
use crate::utils::logger::Logger;

/// Command for validating a manifest against an input directory
pub struct CheckCommand<'a> {
    /// Path to the manifest file
    manifest_file: PathBuf,
    /// Directory the inputs are resolved against
    input_root: PathBuf,
    /// Logger for recording operations
    logger: &'a Logger,
}

impl<'a> CheckCommand<'a> {
    /// Create a new check command
    ///
    /// # Arguments
    /// * `args` - CLI argument matches from clap
    /// * `logger` - Logger for recording operations
    ///
    /// # Returns
    /// A new CheckCommand instance or an error
    pub fn new(args: &ArgMatches, logger: &'a Logger) -> SliceResult<Self> {
        let manifest_file = args.get_one::<String>("manifest")
            .ok_or_else(|| SliceError::GenericError("Missing manifest file".to_string()))?;
        let input_root = args.get_one::<String>("input")
            .ok_or_else(|| SliceError::GenericError("Missing input directory".to_string()))?;

        Ok(CheckCommand {
            manifest_file: PathBuf::from(manifest_file),
            input_root: PathBuf::from(input_root),
            logger,
        })
    }

    /// Resolved paths of the inputs whose source file is missing
    pub fn missing_inputs(&self, manifest: &Manifest) -> Vec<PathBuf> {
        manifest.tasks().iter()
            .map(|task| task.resolve(&self.input_root))
            .filter(|path| !path.exists())
            .collect()
    }
}

impl<'a> Command for CheckCommand<'a> {
    fn execute(&self) -> SliceResult<()> {
        info!("Checking manifest {}", self.manifest_file.display());

        let manifest = Manifest::from_file(&self.manifest_file)?;
        for task in manifest.tasks() {
            let state = if task.resolve(&self.input_root).exists() { "ok" } else { "missing" };
            println!("{:<8} {} ({} outputs)", state, task.path(), task.outputs().len());
        }

        let missing = self.missing_inputs(&manifest);
        if !missing.is_empty() {
            warn!("{} of {} inputs are missing", missing.len(), manifest.len());
        }

        self.logger.log(&format!("Checked {} inputs, {} missing", manifest.len(), missing.len()))?;
        Ok(())
    }
}
