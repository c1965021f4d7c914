//! Region catalog
//!
//! The ordered list of sub-rectangles cut out of a terrain sheet.

mod builder;
mod descriptor;

pub use builder::{standard_catalog, tile_regions, TileGrid, BACK_PAIR_SIZE, DEBRIS_REGION_NAME, TILE_GRID, TILE_GROUPS};
pub use descriptor::{Classification, RegionDescriptor, RegionKind, TemplateKind};
