//! Region extraction
//!
//! Cuts one catalog region out of the indexed terrain sheet, trims it to
//! its content, moves the transparent colour to palette slot 0 and writes
//! the result as a BMP.

use std::path::Path;

use log::debug;

use crate::bitmap::{write_indexed_bmp, IndexRemap, IndexedImage, RgbColor};
use crate::catalog::{RegionDescriptor, RegionKind, DEBRIS_REGION_NAME};
use crate::errors::{TerrainError, TerrainResult};
use crate::geometry::PixelBox;

/// Dimension multiple that aligned `.img` crops are grown to
pub const ALIGNMENT: i64 = 4;

/// Settings shared by every region of one run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractionSettings {
    /// Palette index of the transparent colour in the source
    pub transparent_index: u8,
    /// Colour written to palette slot 0 of every output
    pub display_color: RgbColor,
    /// Grow cropped `.img` regions to dimensions divisible by 4
    pub align: bool,
}

/// Result of extracting one region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionOutcome {
    /// A bitmap was written with these final dimensions
    Produced { width: u32, height: u32 },
    /// The region has no visible pixels; nothing was written
    Empty,
}

/// Extracts catalog regions from one terrain sheet
pub struct RegionExtractor<'a> {
    image: &'a IndexedImage,
    settings: ExtractionSettings,
}

impl<'a> RegionExtractor<'a> {
    pub fn new(image: &'a IndexedImage, settings: ExtractionSettings) -> Self {
        RegionExtractor { image, settings }
    }

    pub fn settings(&self) -> &ExtractionSettings {
        &self.settings
    }

    /// Extract `region` and write `<outputName>.bmp` into `output_dir`
    ///
    /// # Returns
    /// The final dimensions, `Empty` when the region has no content, or an
    /// error when the region lies outside the sheet
    pub fn extract(&self, region: &RegionDescriptor, output_dir: &Path) -> TerrainResult<RegionOutcome> {
        let Some(bitmap) = self.render(region)? else {
            return Ok(RegionOutcome::Empty);
        };

        let path = output_dir.join(format!("{}.bmp", region.output_name()));
        write_indexed_bmp(&bitmap, &path)?;
        debug!("\tWrote {} ({}x{})", path.display(), bitmap.width(), bitmap.height());

        Ok(RegionOutcome::Produced {
            width: bitmap.width(),
            height: bitmap.height(),
        })
    }

    /// Produce the bitmap for `region` without touching the filesystem
    ///
    /// # Returns
    /// `Some(bitmap)`, or `None` if cropping to content found nothing
    pub fn render(&self, region: &RegionDescriptor) -> TerrainResult<Option<IndexedImage>> {
        debug!("Converting region: {}", region);

        let rect = region.rect;
        let mut bitmap = self.image.crop(&rect).ok_or_else(|| TerrainError::RegionOutOfBounds {
            name: region.output_name(),
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
            image_width: self.image.width(),
            image_height: self.image.height(),
        })?;

        if region.crop_to_content {
            let Some(bbox) = bitmap.content_bbox() else {
                debug!("\tEmpty region");
                return Ok(None);
            };
            let bbox = if region.kind == RegionKind::Image && self.settings.align {
                bbox.aligned(ALIGNMENT)
            } else {
                bbox
            };
            bitmap = bitmap.crop_padded(&bbox, self.settings.transparent_index);
            debug!("\tCropped to: {}x{}", bitmap.width(), bitmap.height());
        }

        remap_transparency(&mut bitmap, self.settings.transparent_index, self.settings.display_color);

        if region.name == DEBRIS_REGION_NAME {
            bitmap = trim_border(&bitmap)?;
        }

        Ok(Some(bitmap))
    }
}

/// Make palette slot 0 the transparent colour, shown as `display_color`
///
/// A transparent colour already in slot 0 is only recoloured. Anywhere else
/// it is moved to slot 0 and the pixel indices are renumbered to match.
pub fn remap_transparency(bitmap: &mut IndexedImage, transparent_index: u8, display_color: RgbColor) {
    if transparent_index == 0 {
        let palette = bitmap.palette().with_slot_zero_color(display_color);
        bitmap.set_palette(palette);
        return;
    }

    let palette = bitmap.palette().with_transparency_moved(transparent_index, display_color);
    bitmap.set_palette(palette);
    bitmap.remap_indices(&IndexRemap::transparency_moved(transparent_index));
}

/// Drop the 1 pixel guard border baked into the debris column
pub fn trim_border(bitmap: &IndexedImage) -> TerrainResult<IndexedImage> {
    let (width, height) = bitmap.dimensions();
    if width <= 2 || height <= 2 {
        return Err(TerrainError::BorderTrimUnderflow { width, height });
    }
    let inner = PixelBox::new(0, 0, width as i64, height as i64).inset(1);
    Ok(bitmap.crop_padded(&inner, 0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitmap::{Palette, PaletteEntry};
    use crate::catalog::RegionDescriptor;
    use crate::geometry::Rect;

    const MAGENTA: RgbColor = RgbColor { r: 255, g: 0, b: 255 };

    /// Eight colours, index 5 transparent
    fn sheet_palette() -> Palette {
        Palette::new(
            (0..8u8)
                .map(|i| PaletteEntry {
                    color: RgbColor::new(i * 10, i * 20, i * 30),
                    alpha: if i == 5 { 0 } else { 255 },
                })
                .collect(),
        )
    }

    fn settings(transparent_index: u8, align: bool) -> ExtractionSettings {
        ExtractionSettings { transparent_index, display_color: MAGENTA, align }
    }

    fn blank_sheet() -> IndexedImage {
        IndexedImage::filled(64, 64, 5, sheet_palette())
    }

    #[test]
    fn test_fully_transparent_region_is_empty() {
        let sheet = blank_sheet();
        let extractor = RegionExtractor::new(&sheet, settings(5, true));
        let region = RegionDescriptor::image("bridge", 8, 8, 16, 16).cropped();
        assert_eq!(extractor.render(&region).unwrap(), None);

        let dir = tempfile::tempdir().unwrap();
        assert_eq!(extractor.extract(&region, dir.path()).unwrap(), RegionOutcome::Empty);
        assert!(!dir.path().join("bridge.img.bmp").exists());
    }

    #[test]
    fn test_uncropped_region_keeps_full_rectangle() {
        let mut sheet = blank_sheet();
        sheet.fill_rect(&Rect::new(8, 8, 16, 16), 2);
        let extractor = RegionExtractor::new(&sheet, settings(5, true));

        let bitmap = extractor.render(&RegionDescriptor::image("text", 4, 4, 32, 32)).unwrap().unwrap();
        assert_eq!(bitmap.dimensions(), (32, 32));
        assert_eq!(bitmap.palette().color(0), Some(MAGENTA));
        assert_eq!(bitmap.get_index(0, 0), Some(0));
        assert_eq!(bitmap.palette().color(bitmap.get_index(4, 4).unwrap()), Some(RgbColor::new(20, 40, 60)));
    }

    #[test]
    fn test_out_of_bounds_region_fails() {
        let sheet = blank_sheet();
        let extractor = RegionExtractor::new(&sheet, settings(5, true));
        let region = RegionDescriptor::image("text", 60, 0, 8, 8);
        match extractor.render(&region) {
            Err(TerrainError::RegionOutOfBounds { name, .. }) => assert_eq!(name, "text.img"),
            other => panic!("expected RegionOutOfBounds, got {:?}", other),
        }
    }

    #[test]
    fn test_image_crop_is_aligned_around_content() {
        let mut sheet = blank_sheet();
        sheet.fill_rect(&Rect::new(10, 10, 5, 6), 3);
        let extractor = RegionExtractor::new(&sheet, settings(5, true));

        let bitmap = extractor.render(&RegionDescriptor::image("grass", 0, 0, 32, 32).cropped()).unwrap().unwrap();
        assert_eq!(bitmap.dimensions(), (8, 8));
        // width 5 -> 8 shifts left by round(1.5) = 2, height 6 -> 8 by 1
        assert_eq!(bitmap.get_index(1, 0), Some(0));
        assert_eq!(bitmap.get_index(2, 1), Some(4));
        assert_eq!(bitmap.get_index(6, 6), Some(4));
        assert_eq!(bitmap.get_index(7, 7), Some(0));
    }

    #[test]
    fn test_alignment_can_be_disabled_and_skips_sprites() {
        let mut sheet = blank_sheet();
        sheet.fill_rect(&Rect::new(10, 10, 5, 6), 3);

        let unaligned = RegionExtractor::new(&sheet, settings(5, false));
        let bitmap = unaligned.render(&RegionDescriptor::image("grass", 0, 0, 32, 32).cropped()).unwrap().unwrap();
        assert_eq!(bitmap.dimensions(), (5, 6));

        let aligned = RegionExtractor::new(&sheet, settings(5, true));
        let sprite = aligned.render(&RegionDescriptor::sprite("back", 0, 0, 32, 32).cropped()).unwrap().unwrap();
        assert_eq!(sprite.dimensions(), (5, 6));
    }

    #[test]
    fn test_aligned_box_past_region_edge_is_transparent() {
        let mut sheet = blank_sheet();
        sheet.fill_rect(&Rect::new(0, 0, 3, 3), 1);
        let extractor = RegionExtractor::new(&sheet, settings(5, true));

        let bitmap = extractor.render(&RegionDescriptor::image("bridge", 0, 0, 16, 16).cropped()).unwrap().unwrap();
        assert_eq!(bitmap.dimensions(), (4, 4));
        // growth 1 keeps the left edge, padding lands on the right and bottom
        assert_eq!(bitmap.get_index(0, 0), Some(2));
        assert_eq!(bitmap.get_index(3, 3), Some(0));
    }

    #[test]
    fn test_nonzero_transparent_index_round_trips_colors() {
        let mut source = IndexedImage::filled(4, 2, 5, sheet_palette());
        for (x, index) in [0u8, 1, 4, 6, 7].iter().enumerate() {
            source.fill_rect(&Rect::new(x as u32 % 4, x as u32 / 4, 1, 1), *index);
        }

        let mut remapped = source.clone();
        remap_transparency(&mut remapped, 5, MAGENTA);

        assert_eq!(remapped.palette().color(0), Some(MAGENTA));
        for (old, new) in source.pixels().iter().zip(remapped.pixels()) {
            if *old == 5 {
                assert_eq!(*new, 0);
            } else {
                assert_eq!(*new, old + 1);
                assert_eq!(remapped.palette().color(*new), source.palette().color(*old));
            }
        }
    }

    #[test]
    fn test_zero_transparent_index_only_recolors_slot_zero() {
        let mut source = IndexedImage::filled(3, 3, 0, sheet_palette());
        source.fill_rect(&Rect::new(1, 1, 1, 1), 4);

        let mut remapped = source.clone();
        remap_transparency(&mut remapped, 0, MAGENTA);

        assert_eq!(remapped.pixels(), source.pixels());
        assert_eq!(remapped.palette().color(0), Some(MAGENTA));
        assert_eq!(&remapped.palette().entries()[1..], &source.palette().entries()[1..]);
    }

    #[test]
    fn test_debris_loses_one_pixel_border() {
        let mut sheet = blank_sheet();
        sheet.fill_rect(&Rect::new(20, 20, 10, 6), 2);
        let extractor = RegionExtractor::new(&sheet, settings(5, true));

        let debris = RegionDescriptor::sprite(DEBRIS_REGION_NAME, 0, 0, 64, 64).cropped();
        let bitmap = extractor.render(&debris).unwrap().unwrap();
        assert_eq!(bitmap.dimensions(), (8, 4));

        let other = RegionDescriptor::sprite("front", 0, 0, 64, 64).cropped();
        assert_eq!(extractor.render(&other).unwrap().unwrap().dimensions(), (10, 6));
    }

    #[test]
    fn test_debris_too_small_to_trim_fails() {
        let mut sheet = blank_sheet();
        sheet.fill_rect(&Rect::new(20, 20, 2, 9), 2);
        let extractor = RegionExtractor::new(&sheet, settings(5, true));

        let debris = RegionDescriptor::sprite(DEBRIS_REGION_NAME, 0, 0, 64, 64).cropped();
        match extractor.render(&debris) {
            Err(TerrainError::BorderTrimUnderflow { width, height }) => assert_eq!((width, height), (2, 9)),
            other => panic!("expected BorderTrimUnderflow, got {:?}", other),
        }
    }

    #[test]
    fn test_extract_writes_bitmap() {
        let mut sheet = blank_sheet();
        sheet.fill_rect(&Rect::new(8, 8, 8, 8), 1);
        let extractor = RegionExtractor::new(&sheet, settings(5, true));
        let dir = tempfile::tempdir().unwrap();

        let outcome = extractor.extract(&RegionDescriptor::image("soil", 0, 0, 32, 32), dir.path()).unwrap();
        assert_eq!(outcome, RegionOutcome::Produced { width: 32, height: 32 });

        let written = image::open(dir.path().join("soil.img.bmp")).unwrap().to_rgb8();
        assert_eq!(written.dimensions(), (32, 32));
        assert_eq!(written.get_pixel(0, 0).0, [255, 0, 255]);
        assert_eq!(written.get_pixel(8, 8).0, [10, 20, 30]);
    }
}
