//! Static files shipped with every terrain

use std::fs;
use std::path::Path;

use log::{debug, warn};

use crate::errors::TerrainResult;

/// Files copied verbatim from the data directory
pub const AUXILIARY_ASSETS: [&str; 3] = ["gradient.img.bmp", "icon.img.bmp", "SpriteEditor.exe"];

/// What happened to one auxiliary asset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetCopy {
    Copied,
    /// The output already had the file; it was left untouched
    AlreadyPresent,
    /// The data directory lacks the file
    SourceMissing,
}

/// Copy the auxiliary assets that the output directory does not have yet
pub fn copy_auxiliary_assets(data_dir: &Path, output_dir: &Path) -> TerrainResult<Vec<(String, AssetCopy)>> {
    let mut results = Vec::with_capacity(AUXILIARY_ASSETS.len());

    for name in AUXILIARY_ASSETS {
        let source = data_dir.join(name);
        let target = output_dir.join(name);

        let status = if target.exists() {
            AssetCopy::AlreadyPresent
        } else if !source.is_file() {
            warn!("Auxiliary asset {} not found in {}", name, data_dir.display());
            AssetCopy::SourceMissing
        } else {
            fs::copy(&source, &target)?;
            debug!("Copied {}", name);
            AssetCopy::Copied
        };
        results.push((name.to_string(), status));
    }

    Ok(results)
}
