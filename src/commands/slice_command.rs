//! Slicing command
//!
//! This module implements the command that runs a manifest: every input
//! is sliced into its outputs and the leftovers are saved afterwards.

use clap::ArgMatches;
use log::{info, error};
use std::path::PathBuf;

use crate::api::{Slicer, SlicerConfig};
use crate::commands::command_traits::Command;
use crate::errors::{SliceError, SliceResult};
use crate::manifest::Manifest;
use crate::utils::logger::Logger;

/// Command for slicing the inputs listed in a manifest
pub struct SliceCommand<'a> {
    /// Path to the manifest file
    manifest_file: PathBuf,
    /// Run configuration assembled from the arguments
    config: SlicerConfig,
    /// Logger for recording operations
    logger: &'a Logger,
}

impl<'a> SliceCommand<'a> {
    /// Create a new slice command
    ///
    /// # Arguments
    /// * `args` - CLI argument matches from clap
    /// * `logger` - Logger for recording operations
    ///
    /// # Returns
    /// A new SliceCommand instance or an error
    pub fn new(args: &ArgMatches, logger: &'a Logger) -> SliceResult<Self> {
        let manifest_file = args.get_one::<String>("manifest")
            .ok_or_else(|| SliceError::GenericError("Missing manifest file".to_string()))?;
        info!("Manifest file: {}", manifest_file);

        let input_root = args.get_one::<String>("input")
            .ok_or_else(|| SliceError::GenericError("Missing input directory".to_string()))?;
        info!("Input directory: {}", input_root);

        let output_root = args.get_one::<String>("output")
            .ok_or_else(|| SliceError::GenericError("Missing output directory for slicing".to_string()))?;
        info!("Output directory: {}", output_root);

        let mut config = SlicerConfig::new(input_root, output_root)
            .keep_going(args.get_flag("keep-going"))
            .show_progress(args.get_flag("progress"));

        if let Some(leftovers) = args.get_one::<String>("leftovers") {
            info!("Leftover directory: {}", leftovers);
            config = config.leftover_root(leftovers);
        }

        Ok(SliceCommand {
            manifest_file: PathBuf::from(manifest_file),
            config,
            logger,
        })
    }
}

impl<'a> Command for SliceCommand<'a> {
    fn execute(&self) -> SliceResult<()> {
        info!("Executing slice command with manifest {}", self.manifest_file.display());

        let manifest = Manifest::from_file(&self.manifest_file)?;
        let slicer = Slicer::new(self.config.clone(), self.logger);
        let report = slicer.run(manifest.tasks())?;

        println!("Processed: {}", report.processed.len());
        println!("Skipped:   {}", report.skipped.len());
        println!("Failed:    {}", report.failed.len());
        if self.config.leftover_root.is_some() {
            println!("Leftovers: {}", report.leftovers_written);
        }

        if !report.is_success() {
            for (input, message) in &report.failed {
                error!("{}: {}", input, message);
            }
            return Err(SliceError::GenericError(format!("{} inputs failed", report.failed.len())));
        }

        self.logger.log("Slicing successful")?;
        Ok(())
    }
}
