//! RGBA to indexed colour quantization
//!
//! Builds a fresh palette from the image with a weighted median cut, then
//! maps pixels onto it with Floyd-Steinberg error diffusion.

use std::cell::RefCell;
use std::collections::HashMap;

use image::imageops::{self, ColorMap};
use image::{Rgba, RgbaImage};
use log::{debug, info};

use crate::errors::TerrainResult;

use super::decoder::SourceImage;
use super::indexed::IndexedImage;
use super::palette::{Palette, PaletteEntry, RgbColor};

/// Palette size used when reducing RGBA sources
pub const QUANTIZED_PALETTE_SIZE: usize = 96;

const TRANSPARENT: [u8; 4] = [0, 0, 0, 0];

/// Return an indexed image, quantizing RGBA sources to 96 colours
pub fn ensure_indexed(source: SourceImage) -> TerrainResult<IndexedImage> {
    match source {
        SourceImage::Indexed(image) => Ok(image),
        SourceImage::Rgba(image) => {
            info!("Converting RGBA source to indexed mode");
            quantize_rgba(&image, QUANTIZED_PALETTE_SIZE)
        }
    }
}

/// Reduce an RGBA image to at most `max_colors` palette entries
///
/// Fully transparent pixels share a single palette entry with alpha 0.
pub fn quantize_rgba(image: &RgbaImage, max_colors: usize) -> TerrainResult<IndexedImage> {
    let max_colors = max_colors.clamp(1, super::palette::MAX_PALETTE_SIZE);

    // Step 1: Histogram of distinct colours, transparent pixels collapsed
    let mut histogram: HashMap<[u8; 4], u64> = HashMap::new();
    for pixel in image.pixels() {
        *histogram.entry(normalize(pixel.0)).or_insert(0) += 1;
    }

    // Step 2: Median cut over the visible colours
    let has_transparent = histogram.remove(&TRANSPARENT).is_some();
    let budget = if has_transparent { max_colors - 1 } else { max_colors };
    let visible: Vec<([u8; 4], u64)> = histogram.into_iter().collect();

    let mut colors = Vec::with_capacity(max_colors);
    if has_transparent {
        colors.push(TRANSPARENT);
    }
    if budget > 0 && !visible.is_empty() {
        colors.extend(median_cut(visible, budget));
    }
    if colors.is_empty() {
        colors.push(TRANSPARENT);
    }
    debug!("Quantized palette has {} entries", colors.len());

    // Step 3: Error diffusion onto the palette, then exact index lookup
    let color_map = PaletteColorMap::new(colors);
    let mut dithered = image.clone();
    for pixel in dithered.pixels_mut() {
        pixel.0 = normalize(pixel.0);
    }
    imageops::dither(&mut dithered, &color_map);

    let pixels = dithered
        .pixels()
        .map(|pixel| color_map.index_of(pixel) as u8)
        .collect();

    let palette = Palette::new(
        color_map
            .colors
            .iter()
            .map(|c| PaletteEntry { color: RgbColor::new(c[0], c[1], c[2]), alpha: c[3] })
            .collect(),
    );

    let (width, height) = image.dimensions();
    IndexedImage::new(width, height, pixels, palette)
}

fn normalize(rgba: [u8; 4]) -> [u8; 4] {
    if rgba[3] == 0 {
        TRANSPARENT
    } else {
        rgba
    }
}

/// A set of weighted colours being split by median cut
struct ColorBox {
    colors: Vec<([u8; 4], u64)>,
}

impl ColorBox {
    /// Channel with the widest value range, and that range
    fn widest_channel(&self) -> (usize, u8) {
        (0..4)
            .map(|channel| {
                let min = self.colors.iter().map(|(c, _)| c[channel]).min().unwrap_or(0);
                let max = self.colors.iter().map(|(c, _)| c[channel]).max().unwrap_or(0);
                (channel, max - min)
            })
            .max_by_key(|&(_, range)| range)
            .unwrap_or((0, 0))
    }

    /// Weighted average colour
    fn average(&self) -> [u8; 4] {
        let total: u64 = self.colors.iter().map(|(_, w)| w).sum::<u64>().max(1);
        let mut sums = [0u64; 4];
        for (color, weight) in &self.colors {
            for channel in 0..4 {
                sums[channel] += color[channel] as u64 * weight;
            }
        }
        let mut avg = [0u8; 4];
        for channel in 0..4 {
            avg[channel] = ((sums[channel] + total / 2) / total) as u8;
        }
        avg
    }

    /// Split at the weighted median of the widest channel
    fn split(mut self) -> (ColorBox, ColorBox) {
        let (channel, _) = self.widest_channel();
        self.colors.sort_unstable_by_key(|(c, _)| c[channel]);

        let total: u64 = self.colors.iter().map(|(_, w)| w).sum();
        let mut running = 0;
        let mut cut = 1;
        for (i, (_, weight)) in self.colors.iter().enumerate() {
            running += weight;
            if running * 2 >= total {
                cut = i + 1;
                break;
            }
        }
        // Both halves must keep at least one colour
        let cut = cut.clamp(1, self.colors.len() - 1);

        let upper = self.colors.split_off(cut);
        (self, ColorBox { colors: upper })
    }
}

fn median_cut(colors: Vec<([u8; 4], u64)>, target: usize) -> Vec<[u8; 4]> {
    let mut boxes = vec![ColorBox { colors }];

    while boxes.len() < target {
        let candidate = boxes
            .iter()
            .enumerate()
            .filter(|(_, b)| b.colors.len() > 1)
            .max_by_key(|(_, b)| b.widest_channel().1)
            .map(|(i, _)| i);

        let Some(index) = candidate else { break };
        let (lower, upper) = boxes.swap_remove(index).split();
        boxes.push(lower);
        boxes.push(upper);
    }

    boxes.iter().map(ColorBox::average).collect()
}

/// Nearest-colour lookup used by the dithering pass
struct PaletteColorMap {
    colors: Vec<[u8; 4]>,
    cache: RefCell<HashMap<[u8; 4], usize>>,
}

impl PaletteColorMap {
    fn new(colors: Vec<[u8; 4]>) -> Self {
        let cache = colors.iter().enumerate().map(|(i, c)| (*c, i)).collect();
        PaletteColorMap { colors, cache: RefCell::new(cache) }
    }

    fn nearest(&self, color: [u8; 4]) -> usize {
        if let Some(&index) = self.cache.borrow().get(&color) {
            return index;
        }
        let index = self
            .colors
            .iter()
            .enumerate()
            .min_by_key(|(_, candidate)| distance(candidate, &color))
            .map(|(i, _)| i)
            .unwrap_or(0);
        self.cache.borrow_mut().insert(color, index);
        index
    }
}

fn distance(a: &[u8; 4], b: &[u8; 4]) -> u32 {
    a.iter()
        .zip(b.iter())
        .map(|(&x, &y)| {
            let d = x as i32 - y as i32;
            (d * d) as u32
        })
        .sum()
}

impl ColorMap for PaletteColorMap {
    type Color = Rgba<u8>;

    fn index_of(&self, color: &Rgba<u8>) -> usize {
        self.nearest(normalize(color.0))
    }

    fn map_color(&self, color: &mut Rgba<u8>) {
        let index = self.index_of(color);
        color.0 = self.colors[index];
    }
}
