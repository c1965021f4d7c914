use std::fs;
use std::path::{Path, PathBuf};

use log::info;

use crate::catalog::{standard_catalog, RegionDescriptor};
use crate::converter::{ConversionOptions, ConversionReport, TerrainConverter};
use crate::errors::TerrainResult;

/// Main interface to the terrainkit library
pub struct TerrainKit {
    data_dir: PathBuf,
    output_dir: PathBuf,
    options: ConversionOptions,
}

impl TerrainKit {
    /// Create a TerrainKit instance
    ///
    /// Creates the data and output directories if they do not exist yet.
    ///
    /// # Arguments
    /// * `data_dir` - Directory with templates and auxiliary assets
    /// * `output_dir` - Directory receiving the terrain files
    /// * `options` - Transparency colour and alignment
    ///
    /// # Returns
    /// A TerrainKit instance or an error if a directory cannot be created
    pub fn new(data_dir: &Path, output_dir: &Path, options: ConversionOptions) -> TerrainResult<Self> {
        fs::create_dir_all(output_dir)?;
        fs::create_dir_all(data_dir)?;
        Ok(TerrainKit {
            data_dir: data_dir.to_path_buf(),
            output_dir: output_dir.to_path_buf(),
            options,
        })
    }

    /// Convert a terrain sheet into the output directory
    ///
    /// # Arguments
    /// * `input` - Indexed or RGBA terrain sheet
    /// * `show_progress` - Draw a progress bar while regions are extracted
    ///
    /// # Returns
    /// The conversion report, or the fatal error that stopped the run
    pub fn convert(&self, input: &Path, show_progress: bool) -> TerrainResult<ConversionReport> {
        info!("Converting {} to {} directory", input.display(), self.output_dir.display());
        TerrainConverter::new(&self.data_dir, &self.output_dir, self.options)
            .with_progress(show_progress)
            .convert_file(input)
    }

    /// Region catalog that would be applied to `input`
    ///
    /// Only the image header is read.
    pub fn catalog(input: &Path) -> TerrainResult<Vec<RegionDescriptor>> {
        let (_, height) = image::image_dimensions(input)?;
        Ok(standard_catalog(height))
    }
}
