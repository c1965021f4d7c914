//! Region extraction from indexed terrain sheets
//!
//! Each catalog region is cropped, optionally trimmed to its visible
//! content, palette-remapped so transparency sits in slot 0, and written as
//! a BMP.

mod region_extractor;

pub use region_extractor::{
    remap_transparency, trim_border, ExtractionSettings, RegionExtractor, RegionOutcome, ALIGNMENT,
};
