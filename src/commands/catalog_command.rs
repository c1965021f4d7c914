//! Region listing command
//!
//! Prints the catalog that a conversion of the input would walk.

use std::path::PathBuf;

use clap::ArgMatches;

use crate::api::TerrainKit;
use crate::commands::command_traits::Command;
use crate::config::Settings;
use crate::errors::TerrainResult;

/// Command for listing catalog regions
pub struct CatalogCommand {
    /// Terrain sheet whose height sizes the debris column
    input: PathBuf,
}

impl CatalogCommand {
    pub fn new(args: &ArgMatches) -> TerrainResult<Self> {
        let settings = Settings::from_args(args)?;
        Ok(CatalogCommand { input: settings.input })
    }
}

impl Command for CatalogCommand {
    fn execute(&self) -> TerrainResult<()> {
        for region in TerrainKit::catalog(&self.input)? {
            println!("{:?}\t{}", region.classification, region);
        }
        Ok(())
    }
}
