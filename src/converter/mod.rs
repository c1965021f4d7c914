//! Terrain directory generation
//!
//! Drives the extractor over the region catalog and writes everything that
//! goes next to the bitmaps: metadata templates, the manifest, the tile
//! index and the static assets.

mod assets;
mod manifest;
mod orchestrator;
mod template;

pub use assets::{copy_auxiliary_assets, AssetCopy, AUXILIARY_ASSETS};
pub use manifest::{Manifest, BOOTSTRAP_ENTRIES, INDEX_FILE, MANIFEST_FILE};
pub use orchestrator::{
    ConversionOptions, ConversionReport, CrashWarning, RegionReport, TerrainConverter,
    DEFAULT_TRANSPARENCY_COLOR,
};
pub use template::{fill_template, render_region_template, template_paths, TemplateOutcome};
