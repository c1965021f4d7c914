//! CLI command implementations
//!
//! This module contains implementations of the commands
//! supported by the CLI application using the Command pattern.

pub mod command_traits;
pub mod convert_command;
pub mod catalog_command;

pub use command_traits::{Command, CommandFactory};
pub use convert_command::ConvertCommand;
pub use catalog_command::CatalogCommand;

use clap::ArgMatches;
use crate::errors::TerrainResult;

/// Factory for creating command instances based on CLI arguments
pub struct TerrainkitCommandFactory;

impl TerrainkitCommandFactory {
    /// Create a new factory instance
    pub fn new() -> Self {
        TerrainkitCommandFactory
    }
}

impl Default for TerrainkitCommandFactory {
    fn default() -> Self {
        TerrainkitCommandFactory::new()
    }
}

impl CommandFactory for TerrainkitCommandFactory {
    fn create_command(&self, args: &ArgMatches) -> TerrainResult<Box<dyn Command>> {
        if args.get_flag("list-regions") {
            Ok(Box::new(CatalogCommand::new(args)?))
        } else {
            // Default to conversion
            Ok(Box::new(ConvertCommand::new(args)?))
        }
    }
}
