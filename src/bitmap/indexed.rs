//! Palette-indexed image buffer

use crate::errors::{TerrainError, TerrainResult};
use crate::geometry::{PixelBox, Rect};

use super::palette::{IndexRemap, Palette, MAX_PALETTE_SIZE};

/// Image storing one palette index per pixel, row-major from the top-left
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
    palette: Palette,
}

impl IndexedImage {
    /// Create an image from raw indices
    ///
    /// # Returns
    /// The image, or an error if `pixels` does not hold `width * height` indices
    pub fn new(width: u32, height: u32, pixels: Vec<u8>, palette: Palette) -> TerrainResult<Self> {
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(TerrainError::GenericError(format!(
                "Pixel buffer holds {} indices, expected {} for {}x{}",
                pixels.len(),
                expected,
                width,
                height
            )));
        }
        Ok(IndexedImage { width, height, pixels, palette })
    }

    /// Create an image with every pixel set to `index`
    pub fn filled(width: u32, height: u32, index: u8, palette: Palette) -> Self {
        IndexedImage {
            width,
            height,
            pixels: vec![index; width as usize * height as usize],
            palette,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn set_palette(&mut self, palette: Palette) {
        self.palette = palette;
    }

    /// Palette index at (x, y), or `None` outside the image
    pub fn get_index(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[y as usize * self.width as usize + x as usize])
    }

    /// Set every pixel inside `rect` (clipped to the image) to `index`
    pub fn fill_rect(&mut self, rect: &Rect, index: u8) {
        let end_x = rect.end_x().min(self.width as u64) as usize;
        let end_y = rect.end_y().min(self.height as u64) as usize;
        let stride = self.width as usize;
        for y in rect.y as usize..end_y {
            if (rect.x as usize) < end_x {
                self.pixels[y * stride + rect.x as usize..y * stride + end_x].fill(index);
            }
        }
    }

    /// Copy out the pixels under `rect`
    ///
    /// # Returns
    /// The sub-image, or `None` if the rectangle is not fully inside the image
    pub fn crop(&self, rect: &Rect) -> Option<IndexedImage> {
        if !rect.fits_within(self.width, self.height) {
            return None;
        }
        let bbox = PixelBox::new(
            rect.x as i64,
            rect.y as i64,
            rect.end_x() as i64,
            rect.end_y() as i64,
        );
        Some(self.crop_padded(&bbox, 0))
    }

    /// Copy out the pixels under `bbox`, using `fill` where it leaves the image
    ///
    /// A box with non-positive width or height yields an empty image.
    pub fn crop_padded(&self, bbox: &PixelBox, fill: u8) -> IndexedImage {
        let out_width = bbox.width().max(0) as usize;
        let out_height = bbox.height().max(0) as usize;
        let mut pixels = vec![fill; out_width * out_height];

        // Intersection of the box with the image, in source coordinates
        let src_left = bbox.left.clamp(0, self.width as i64);
        let src_right = bbox.right.clamp(0, self.width as i64);
        let src_top = bbox.top.clamp(0, self.height as i64);
        let src_bottom = bbox.bottom.clamp(0, self.height as i64);

        if src_left < src_right && out_width > 0 {
            let stride = self.width as usize;
            let span = (src_right - src_left) as usize;
            let dst_x = (src_left - bbox.left) as usize;
            for src_y in src_top..src_bottom {
                let dst_y = (src_y - bbox.top) as usize;
                let src_start = src_y as usize * stride + src_left as usize;
                let dst_start = dst_y * out_width + dst_x;
                pixels[dst_start..dst_start + span]
                    .copy_from_slice(&self.pixels[src_start..src_start + span]);
            }
        }

        IndexedImage {
            width: out_width as u32,
            height: out_height as u32,
            pixels,
            palette: self.palette.clone(),
        }
    }

    /// Tight box around every pixel whose palette entry is not fully transparent
    ///
    /// # Returns
    /// The box, or `None` when the image has no visible pixel at all
    pub fn content_bbox(&self) -> Option<PixelBox> {
        let mut visible = [false; MAX_PALETTE_SIZE];
        for (index, slot) in visible.iter_mut().enumerate() {
            *slot = self.palette.alpha(index as u8) != 0;
        }

        let stride = self.width as usize;
        if stride == 0 {
            return None;
        }

        let mut bbox: Option<PixelBox> = None;
        for (y, row) in self.pixels.chunks_exact(stride).enumerate() {
            let first = match row.iter().position(|&p| visible[p as usize]) {
                Some(x) => x as i64,
                None => continue,
            };
            let last = row.iter().rposition(|&p| visible[p as usize]).unwrap_or(0) as i64;
            let y = y as i64;

            bbox = Some(match bbox {
                None => PixelBox::new(first, y, last + 1, y + 1),
                Some(b) => PixelBox::new(b.left.min(first), b.top, b.right.max(last + 1), y + 1),
            });
        }
        bbox
    }

    /// Rewrite every pixel index through `remap`
    pub fn remap_indices(&mut self, remap: &IndexRemap) {
        remap.apply(&mut self.pixels);
    }
}
