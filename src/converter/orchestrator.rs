//! Conversion of a whole terrain sheet
//!
//! Walks the region catalog in order, extracts every region, renders the
//! metadata templates of the ones that were produced, and writes the
//! manifest. Missing regions are classified by how badly the game takes
//! their absence and logged as soon as they are found, so they are not lost
//! when a later region aborts the run.

use std::fmt;
use std::path::{Path, PathBuf};

use log::{debug, error, info, warn};

use crate::bitmap::{ensure_indexed, load_source, locate_transparent_index, IndexedImage, RgbColor};
use crate::catalog::{standard_catalog, Classification, RegionDescriptor, BACK_PAIR_SIZE};
use crate::errors::TerrainResult;
use crate::extractor::{ExtractionSettings, RegionExtractor, RegionOutcome};
use crate::utils::progress::ProgressTracker;

use super::assets::{copy_auxiliary_assets, AssetCopy};
use super::manifest::Manifest;
use super::template::{render_region_template, TemplateOutcome};

/// Default colour of palette slot 0 in the output bitmaps
pub const DEFAULT_TRANSPARENCY_COLOR: RgbColor = RgbColor { r: 255, g: 0, b: 255 };

/// User-facing conversion options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConversionOptions {
    /// Colour written to palette slot 0
    pub transparency_color: RgbColor,
    /// Align `.img` crops to dimensions divisible by 4
    pub align: bool,
}

impl Default for ConversionOptions {
    fn default() -> Self {
        ConversionOptions {
            transparency_color: DEFAULT_TRANSPARENCY_COLOR,
            align: true,
        }
    }
}

/// A missing region the game may not survive
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrashWarning {
    /// A required region is empty
    MissingRequired { output_name: String },
    /// Every member of the back pair is empty
    MissingBackPair { members: Vec<String> },
}

impl fmt::Display for CrashWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CrashWarning::MissingRequired { output_name } => {
                write!(f, "{} is missing - this terrain may crash the game!!!", output_name)
            }
            CrashWarning::MissingBackPair { members } => {
                write!(f, "{} are missing - this terrain may crash the game!!!", members.join(" and "))
            }
        }
    }
}

/// Per-region result of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionReport {
    pub output_name: String,
    pub outcome: RegionOutcome,
    pub template: TemplateOutcome,
}

/// Everything a run produced, in catalog order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionReport {
    pub transparent_index: u8,
    pub regions: Vec<RegionReport>,
    pub warnings: Vec<CrashWarning>,
    pub manifest: Manifest,
    pub assets: Vec<(String, AssetCopy)>,
}

impl ConversionReport {
    /// Number of regions that produced a bitmap
    pub fn produced_count(&self) -> usize {
        self.regions
            .iter()
            .filter(|r| matches!(r.outcome, RegionOutcome::Produced { .. }))
            .count()
    }

    /// Number of regions that turned out empty
    pub fn empty_count(&self) -> usize {
        self.regions.len() - self.produced_count()
    }

    /// Report for the region with the given output name
    pub fn region(&self, output_name: &str) -> Option<&RegionReport> {
        self.regions.iter().find(|r| r.output_name == output_name)
    }
}

/// Tracks the back pair: the warning fires once, when its last member is missing
struct BackPairTracker {
    remaining: usize,
    missing: Vec<String>,
}

impl BackPairTracker {
    fn new() -> Self {
        BackPairTracker { remaining: BACK_PAIR_SIZE, missing: Vec::new() }
    }

    fn record_missing(&mut self, output_name: &str) -> Option<CrashWarning> {
        self.missing.push(output_name.to_string());
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 && self.missing.len() == BACK_PAIR_SIZE {
            Some(CrashWarning::MissingBackPair { members: self.missing.clone() })
        } else {
            None
        }
    }
}

/// Converts terrain sheets into a terrain directory
pub struct TerrainConverter {
    data_dir: PathBuf,
    output_dir: PathBuf,
    options: ConversionOptions,
    show_progress: bool,
}

impl TerrainConverter {
    /// Create a converter
    ///
    /// # Arguments
    /// * `data_dir` - Directory holding templates and auxiliary assets
    /// * `output_dir` - Directory receiving the terrain files; must exist
    /// * `options` - Transparency colour and alignment
    pub fn new(data_dir: &Path, output_dir: &Path, options: ConversionOptions) -> Self {
        TerrainConverter {
            data_dir: data_dir.to_path_buf(),
            output_dir: output_dir.to_path_buf(),
            options,
            show_progress: false,
        }
    }

    /// Show a progress bar advancing once per catalog region
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub fn options(&self) -> &ConversionOptions {
        &self.options
    }

    /// Decode `input` and convert it with the standard catalog
    pub fn convert_file(&self, input: &Path) -> TerrainResult<ConversionReport> {
        let source = load_source(input)?;
        let (width, height) = source.dimensions();
        info!("Loaded {} ({}x{}, mode {})", input.display(), width, height, source.mode());

        let image = ensure_indexed(source)?;
        let catalog = standard_catalog(image.height());
        self.convert_image(&image, &catalog)
    }

    /// Run `catalog` against an indexed sheet
    ///
    /// Stops at the first fatal error; files written before it stay in place.
    pub fn convert_image(&self, image: &IndexedImage, catalog: &[RegionDescriptor]) -> TerrainResult<ConversionReport> {
        let transparent_index = locate_transparent_index(image)?;
        debug!("Transparent color palette index: {}", transparent_index);

        let extractor = RegionExtractor::new(
            image,
            ExtractionSettings {
                transparent_index,
                display_color: self.options.transparency_color,
                align: self.options.align,
            },
        );

        let mut manifest = Manifest::new();
        let mut regions = Vec::with_capacity(catalog.len());
        let mut warnings = Vec::new();
        let mut back_pair = BackPairTracker::new();
        let progress = self
            .show_progress
            .then(|| ProgressTracker::new(catalog.len() as u64, "Extracting regions"));

        for region in catalog {
            if let Some(progress) = &progress {
                progress.set_message(&region.output_name());
            }

            let outcome = extractor.extract(region, &self.output_dir)?;
            let template = match outcome {
                RegionOutcome::Empty => {
                    let warning = match region.classification {
                        Classification::Required => Some(CrashWarning::MissingRequired {
                            output_name: region.output_name(),
                        }),
                        Classification::BackPairMember => back_pair.record_missing(&region.output_name()),
                        Classification::Optional => None,
                    };
                    if let Some(warning) = warning {
                        error!("{}", warning);
                        warnings.push(warning);
                    }
                    TemplateOutcome::NotConfigured
                }
                RegionOutcome::Produced { width, height } => {
                    manifest.push_file(region.output_name());
                    let template = render_region_template(region, width, height, &self.data_dir, &self.output_dir)?;
                    match &template {
                        TemplateOutcome::Written { file_name, stem } if region.add_to_index => {
                            manifest.push_file(file_name.clone());
                            manifest.push_index(stem.clone());
                        }
                        TemplateOutcome::Missing(path) => {
                            warn!("Template {} not found, skipped metadata for {}", path.display(), region.output_name());
                        }
                        _ => {}
                    }
                    template
                }
            };

            regions.push(RegionReport {
                output_name: region.output_name(),
                outcome,
                template,
            });

            if let Some(progress) = &progress {
                progress.increment(1);
            }
        }

        manifest.write(&self.output_dir)?;
        let assets = copy_auxiliary_assets(&self.data_dir, &self.output_dir)?;

        if let Some(progress) = &progress {
            progress.finish();
        }

        Ok(ConversionReport {
            transparent_index,
            regions,
            warnings,
            manifest,
            assets,
        })
    }
}
