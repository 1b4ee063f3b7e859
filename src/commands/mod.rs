//! CLI command implementations
//!
//! This module contains implementations of various commands
//! supported by the CLI application using the Command pattern.

pub mod command_traits;
pub mod slice_command;
pub mod check_command;

pub use command_traits::{Command, CommandFactory};
pub use slice_command::SliceCommand;
pub use check_command::CheckCommand;

use clap::ArgMatches;
use crate::utils::logger::Logger;
use crate::errors::SliceResult;

/// Factory for creating command instances based on CLI arguments
///
/// This factory examines the command-line arguments and creates
/// the appropriate command instance for execution.
#[derive(Default)]
pub struct RasterSliceCommandFactory;

impl RasterSliceCommandFactory {
    /// Create a new factory instance
    pub fn new() -> Self {
        RasterSliceCommandFactory
    }
}

impl<'a> CommandFactory<'a> for RasterSliceCommandFactory {
    fn create_command(&self, args: &ArgMatches, logger: &'a Logger) -> SliceResult<Box<dyn Command + 'a>> {
        if args.get_flag("check") {
            Ok(Box::new(CheckCommand::new(args, logger)?))
        } else {
            // Default to slicing
            Ok(Box::new(SliceCommand::new(args, logger)?))
        }
    }
}
