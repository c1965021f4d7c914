//! Terrain conversion command
//!
//! This module implements the command that turns a terrain sheet into a
//! terrain directory.

use std::io::IsTerminal;

use clap::ArgMatches;
use log::info;

use crate::api::TerrainKit;
use crate::commands::command_traits::Command;
use crate::config::Settings;
use crate::converter::{ConversionOptions, ConversionReport};
use crate::errors::TerrainResult;

/// Command for converting a terrain sheet
pub struct ConvertCommand {
    /// Resolved run settings
    settings: Settings,
    /// Parsed colour and alignment
    options: ConversionOptions,
}

impl ConvertCommand {
    /// Create a new convert command
    ///
    /// # Arguments
    /// * `args` - CLI argument matches from clap
    ///
    /// # Returns
    /// A new ConvertCommand instance or an error for an invalid configuration
    pub fn new(args: &ArgMatches) -> TerrainResult<Self> {
        let settings = Settings::from_args(args)?;
        let options = settings.conversion_options()?;
        Ok(ConvertCommand { settings, options })
    }

    fn report(&self, report: &ConversionReport) {
        info!(
            "{} regions written, {} empty, {} may crash the game",
            report.produced_count(),
            report.empty_count(),
            report.warnings.len()
        );
    }
}

impl Command for ConvertCommand {
    fn execute(&self) -> TerrainResult<()> {
        let kit = TerrainKit::new(&self.settings.data_dir, &self.settings.output_dir, self.options)?;
        let report = kit.convert(&self.settings.input, std::io::stderr().is_terminal())?;

        self.report(&report);
        info!("Finished");
        Ok(())
    }
}
