//! Palette handling for indexed bitmaps
//!
//! Palettes are immutable values: moving the transparent colour to slot 0
//! produces a new palette, and the matching pixel renumbering is a separate
//! [`IndexRemap`] table applied to the pixel data.

use crate::errors::{TerrainError, TerrainResult};

/// Largest palette an 8-bit indexed bitmap can carry
pub const MAX_PALETTE_SIZE: usize = 256;

/// Simple RGB color representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RgbColor {
    /// Red component (0-255)
    pub r: u8,
    /// Green component (0-255)
    pub g: u8,
    /// Blue component (0-255)
    pub b: u8,
}

impl RgbColor {
    /// Create a new RGB color
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        RgbColor { r, g, b }
    }

    /// Convert to hex string (#RRGGBB format)
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Create from hex string
    ///
    /// Accepts `RRGGBB` or the short `RGB` form, with or without a leading `#`.
    pub fn from_hex(hex: &str) -> TerrainResult<Self> {
        let digits = hex.trim().trim_start_matches('#');
        if !digits.is_ascii() {
            return Err(TerrainError::InvalidColor(hex.to_string()));
        }

        match digits.len() {
            6 => Ok(RgbColor {
                r: parse_hex_component(&digits[0..2], hex)?,
                g: parse_hex_component(&digits[2..4], hex)?,
                b: parse_hex_component(&digits[4..6], hex)?,
            }),
            3 => {
                // #abc is shorthand for #aabbcc
                let expand = |i: usize| parse_hex_component(&digits[i..i + 1], hex).map(|v| v * 17);
                Ok(RgbColor { r: expand(0)?, g: expand(1)?, b: expand(2)? })
            }
            _ => Err(TerrainError::InvalidColor(format!(
                "{} - must be 3 or 6 hexadecimal digits",
                hex
            ))),
        }
    }

    /// Components as an array, in the layout bitmap encoders expect
    pub fn to_array(&self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

/// Helper function to parse a hex color component
fn parse_hex_component(hex_part: &str, full_hex: &str) -> TerrainResult<u8> {
    u8::from_str_radix(hex_part, 16).map_err(|_| TerrainError::InvalidColor(full_hex.to_string()))
}

/// One palette slot: a colour plus the alpha it had in the source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteEntry {
    /// Display colour
    pub color: RgbColor,
    /// Source alpha, 0 = fully transparent
    pub alpha: u8,
}

impl PaletteEntry {
    /// Create an opaque entry
    pub fn opaque(color: RgbColor) -> Self {
        PaletteEntry { color, alpha: 255 }
    }
}

/// Ordered list of up to 256 colours
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Palette {
    entries: Vec<PaletteEntry>,
}

impl Palette {
    /// Create a palette from entries, keeping at most 256 of them
    pub fn new(mut entries: Vec<PaletteEntry>) -> Self {
        entries.truncate(MAX_PALETTE_SIZE);
        Palette { entries }
    }

    /// Create an opaque palette from plain colours
    pub fn from_colors(colors: &[RgbColor]) -> Self {
        Palette::new(colors.iter().copied().map(PaletteEntry::opaque).collect())
    }

    /// Create a palette from PNG `PLTE` bytes and an optional `tRNS` table
    ///
    /// Entries without a `tRNS` value are opaque.
    pub fn from_plte(plte: &[u8], trns: Option<&[u8]>) -> Self {
        let alpha = trns.unwrap_or(&[]);
        let entries = plte
            .chunks_exact(3)
            .enumerate()
            .map(|(i, rgb)| PaletteEntry {
                color: RgbColor::new(rgb[0], rgb[1], rgb[2]),
                alpha: alpha.get(i).copied().unwrap_or(255),
            })
            .collect();
        Palette::new(entries)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the palette has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries in slot order
    pub fn entries(&self) -> &[PaletteEntry] {
        &self.entries
    }

    /// Colour stored at `index`, if the slot exists
    pub fn color(&self, index: u8) -> Option<RgbColor> {
        self.entries.get(index as usize).map(|e| e.color)
    }

    /// Alpha of `index`; indices past the end of the palette count as opaque
    pub fn alpha(&self, index: u8) -> u8 {
        self.entries.get(index as usize).map_or(255, |e| e.alpha)
    }

    /// Colours in the `[r, g, b]` layout used by the BMP encoder
    pub fn to_rgb_table(&self) -> Vec<[u8; 3]> {
        self.entries.iter().map(|e| e.color.to_array()).collect()
    }

    /// Palette with the transparent colour moved to slot 0
    ///
    /// Slot 0 becomes `color` and every original entry shifts one slot up,
    /// growing the palette by one up to the 256 slot limit. A full palette
    /// cannot grow, so its last entry takes over the slot freed by the
    /// transparent colour at `index + 1`. Pair with
    /// [`IndexRemap::transparency_moved`] for the pixel data.
    pub fn with_transparency_moved(&self, index: u8, color: RgbColor) -> Palette {
        let len = self.entries.len();
        let new_len = (len + 1).min(MAX_PALETTE_SIZE);

        let mut entries = Vec::with_capacity(new_len);
        entries.push(PaletteEntry { color, alpha: 0 });
        entries.extend(self.entries.iter().take(new_len - 1).copied());

        if len == MAX_PALETTE_SIZE && (index as usize) < len - 1 {
            entries[index as usize + 1] = self.entries[len - 1];
        }

        Palette { entries }
    }

    /// Palette with slot 0 recoloured, used when transparency is already there
    pub fn with_slot_zero_color(&self, color: RgbColor) -> Palette {
        let mut entries = self.entries.clone();
        match entries.first_mut() {
            Some(first) => first.color = color,
            None => entries.push(PaletteEntry { color, alpha: 0 }),
        }
        Palette { entries }
    }
}

/// Precomputed old-index to new-index table for pixel data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexRemap {
    table: [u8; MAX_PALETTE_SIZE],
}

impl IndexRemap {
    /// Identity mapping
    pub fn identity() -> Self {
        IndexRemap { table: std::array::from_fn(|i| i as u8) }
    }

    /// Mapping that matches [`Palette::with_transparency_moved`]
    ///
    /// `transparent_index` goes to 0 and every other index `i` to `i + 1`,
    /// except 255 which has no slot above it and goes to `transparent_index + 1`.
    pub fn transparency_moved(transparent_index: u8) -> Self {
        let mut table: [u8; MAX_PALETTE_SIZE] = std::array::from_fn(|i| (i as u8).wrapping_add(1));
        table[MAX_PALETTE_SIZE - 1] = transparent_index.wrapping_add(1);
        table[transparent_index as usize] = 0;
        IndexRemap { table }
    }

    /// New index for `index`
    pub fn map(&self, index: u8) -> u8 {
        self.table[index as usize]
    }

    /// Rewrite pixel indices in a single pass
    pub fn apply(&self, pixels: &mut [u8]) {
        for pixel in pixels.iter_mut() {
            *pixel = self.table[*pixel as usize];
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient_palette(len: usize) -> Palette {
        let colors: Vec<RgbColor> = (0..len)
            .map(|i| RgbColor::new(i as u8, (i * 3 % 256) as u8, 255 - i as u8))
            .collect();
        Palette::from_colors(&colors)
    }

    #[test]
    fn test_hex_parsing() {
        assert_eq!(RgbColor::from_hex("#FF00FF").unwrap(), RgbColor::new(255, 0, 255));
        assert_eq!(RgbColor::from_hex("0a0b0c").unwrap(), RgbColor::new(10, 11, 12));
        assert_eq!(RgbColor::from_hex("#f0a").unwrap(), RgbColor::new(255, 0, 170));
        assert_eq!(RgbColor::new(255, 0, 255).to_hex(), "#ff00ff");
        assert!(RgbColor::from_hex("#12345").is_err());
        assert!(RgbColor::from_hex("#gg0000").is_err());
    }

    #[test]
    fn test_from_plte_applies_trns() {
        let palette = Palette::from_plte(&[1, 2, 3, 4, 5, 6, 7, 8, 9], Some(&[0]));
        assert_eq!(palette.len(), 3);
        assert_eq!(palette.alpha(0), 0);
        assert_eq!(palette.alpha(1), 255);
        assert_eq!(palette.alpha(200), 255);
        assert_eq!(palette.color(2), Some(RgbColor::new(7, 8, 9)));
    }

    #[test]
    fn test_transparency_moved_shifts_entries() {
        let magenta = RgbColor::new(255, 0, 255);
        let palette = gradient_palette(8);
        let moved = palette.with_transparency_moved(5, magenta);

        assert_eq!(moved.len(), 9);
        assert_eq!(moved.color(0), Some(magenta));
        for i in 0..8u8 {
            assert_eq!(moved.color(i + 1), palette.color(i));
        }
    }

    #[test]
    fn test_transparency_moved_round_trips_colors() {
        let magenta = RgbColor::new(255, 0, 255);
        for len in [2usize, 96, 255, 256] {
            let palette = gradient_palette(len);
            for t in [1u8, 7, (len - 1) as u8] {
                let moved = palette.with_transparency_moved(t, magenta);
                let remap = IndexRemap::transparency_moved(t);
                assert_eq!(remap.map(t), 0);
                for i in 0..len {
                    let i = i as u8;
                    if i == t {
                        continue;
                    }
                    assert_eq!(moved.color(remap.map(i)), palette.color(i), "len {} t {} i {}", len, t, i);
                }
            }
        }
    }

    #[test]
    fn test_transparency_remap_is_injective_on_used_indices() {
        let remap = IndexRemap::transparency_moved(40);
        let mut seen = std::collections::HashSet::new();
        for i in 0..=255u8 {
            assert!(seen.insert(remap.map(i)), "index {} collides", i);
        }
    }

    #[test]
    fn test_slot_zero_color_leaves_other_slots() {
        let palette = gradient_palette(4);
        let recolored = palette.with_slot_zero_color(RgbColor::new(1, 2, 3));
        assert_eq!(recolored.color(0), Some(RgbColor::new(1, 2, 3)));
        assert_eq!(&recolored.entries()[1..], &palette.entries()[1..]);
    }

    #[test]
    fn test_apply_rewrites_pixels() {
        let mut pixels = vec![0, 1, 2, 3, 2];
        IndexRemap::transparency_moved(2).apply(&mut pixels);
        assert_eq!(pixels, vec![1, 2, 0, 4, 0]);

        let mut untouched = vec![9, 8, 7];
        IndexRemap::identity().apply(&mut untouched);
        assert_eq!(untouched, vec![9, 8, 7]);
    }
}
