pub mod errors;
pub mod geometry;
pub mod bitmap;
pub mod catalog;
pub mod extractor;
pub mod converter;
pub mod config;
pub mod utils;
pub mod commands;
pub mod api;

pub use crate::api::TerrainKit;

pub use errors::{TerrainError, TerrainResult};
pub use bitmap::{IndexedImage, Palette, RgbColor};
pub use catalog::{standard_catalog, RegionDescriptor};
pub use extractor::{RegionExtractor, RegionOutcome};
pub use converter::{ConversionOptions, ConversionReport, TerrainConverter};
