//! Source image decoding
//!
//! PNG sources are read with the `png` crate so palette indices, `PLTE` and
//! `tRNS` survive untouched. Paletted BMPs are decoded by the `image` crate
//! and mapped back onto their colour table. Anything else goes through the
//! `image` crate, which can only ever yield direct-colour pixels.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use image::codecs::bmp::BmpDecoder;
use image::{DynamicImage, RgbaImage};
use log::debug;
use png::{BitDepth, ColorType};

use crate::errors::{TerrainError, TerrainResult};

use super::indexed::IndexedImage;
use super::palette::{Palette, RgbColor};

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];

const BMP_SIGNATURE: [u8; 2] = [b'B', b'M'];

/// File header plus the `BITMAPINFOHEADER` fields up to the used colour count
const BMP_HEADER_LEN: usize = 50;

/// Size of the OS/2 `BITMAPCOREHEADER`, which has no colour count
const BMP_CORE_HEADER_SIZE: u32 = 12;

/// Decoded source image in one of the two supported modes
#[derive(Debug)]
pub enum SourceImage {
    /// Palette-indexed pixels
    Indexed(IndexedImage),
    /// 8-bit RGBA pixels, still to be quantized
    Rgba(RgbaImage),
}

impl SourceImage {
    /// Short mode name, as shown in diagnostics
    pub fn mode(&self) -> &'static str {
        match self {
            SourceImage::Indexed(_) => "P",
            SourceImage::Rgba(_) => "RGBA",
        }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            SourceImage::Indexed(image) => image.dimensions(),
            SourceImage::Rgba(image) => image.dimensions(),
        }
    }
}

/// Load a source image from disk
///
/// # Returns
/// The decoded image, or `UnsupportedFormat` if it is neither indexed nor RGBA
pub fn load_source(path: &Path) -> TerrainResult<SourceImage> {
    let header = read_header(path, BMP_HEADER_LEN)?;

    if header.starts_with(&PNG_SIGNATURE) {
        debug!("Decoding {} as PNG", path.display());
        decode_png(BufReader::new(File::open(path)?))
    } else if let Some(palette_len) = bmp_palette_len(&header) {
        debug!("Decoding {} as paletted BMP ({} colours)", path.display(), palette_len);
        decode_paletted_bmp(path, palette_len)
    } else {
        debug!("Decoding {} through the image crate", path.display());
        from_dynamic(image::open(path)?)
    }
}

/// Decode a PNG stream without expanding its palette
pub fn decode_png<R: Read>(reader: R) -> TerrainResult<SourceImage> {
    let mut decoder = png::Decoder::new(reader);
    decoder.set_transformations(png::Transformations::IDENTITY);
    let mut reader = decoder.read_info()?;

    let mut buffer = vec![0; reader.output_buffer_size()];
    let frame = reader.next_frame(&mut buffer)?;
    let (width, height) = (frame.width, frame.height);

    match (frame.color_type, frame.bit_depth) {
        (ColorType::Indexed, depth) => {
            let info = reader.info();
            let plte = info.palette.as_deref().ok_or_else(|| {
                TerrainError::GenericError("Indexed PNG has no PLTE chunk".to_string())
            })?;
            let palette = Palette::from_plte(plte, info.trns.as_deref());
            let pixels = unpack_indices(&buffer, frame.line_size, width, height, depth);
            debug!(
                "Indexed PNG {}x{}, {}-bit, {} palette entries",
                width,
                height,
                depth as u8,
                palette.len()
            );
            Ok(SourceImage::Indexed(IndexedImage::new(width, height, pixels, palette)?))
        }
        (ColorType::Rgba, BitDepth::Eight) => {
            buffer.truncate(frame.buffer_size());
            RgbaImage::from_raw(width, height, buffer)
                .map(SourceImage::Rgba)
                .ok_or_else(|| TerrainError::GenericError("RGBA buffer size mismatch".to_string()))
        }
        (color_type, depth) => Err(TerrainError::UnsupportedFormat(png_mode_name(color_type, depth))),
    }
}

/// Accept an `image` crate decode result if it is RGBA8
fn from_dynamic(image: DynamicImage) -> TerrainResult<SourceImage> {
    match image {
        DynamicImage::ImageRgba8(rgba) => Ok(SourceImage::Rgba(rgba)),
        other => Err(TerrainError::UnsupportedFormat(image_mode_name(other.color()))),
    }
}

/// Decode a 1/2/4/8-bit BMP and recover its palette indices
///
/// The `image` crate resolves every index to its colour; each pixel is
/// mapped back to the first table entry of that colour. BMP tables carry no
/// alpha, so every entry is opaque.
fn decode_paletted_bmp(path: &Path, palette_len: usize) -> TerrainResult<SourceImage> {
    let decoder = BmpDecoder::new(BufReader::new(File::open(path)?))?;
    let colors: Vec<RgbColor> = decoder
        .get_palette()
        .unwrap_or(&[])
        .iter()
        .take(palette_len)
        .map(|c| RgbColor::new(c[0], c[1], c[2]))
        .collect();

    let mut lookup: HashMap<[u8; 3], u8> = HashMap::with_capacity(colors.len());
    for (index, color) in colors.iter().enumerate() {
        lookup.entry(color.to_array()).or_insert(index as u8);
    }

    let rgb = DynamicImage::from_decoder(decoder)?.into_rgb8();
    let pixels = rgb
        .pixels()
        .map(|pixel| {
            lookup.get(&pixel.0).copied().ok_or_else(|| {
                let [r, g, b] = pixel.0;
                TerrainError::GenericError(format!(
                    "BMP pixel colour {} is not in its palette",
                    RgbColor::new(r, g, b).to_hex()
                ))
            })
        })
        .collect::<TerrainResult<Vec<u8>>>()?;

    let (width, height) = rgb.dimensions();
    Ok(SourceImage::Indexed(IndexedImage::new(width, height, pixels, Palette::from_colors(&colors))?))
}

/// Number of colour table entries of a paletted BMP, `None` for anything else
fn bmp_palette_len(header: &[u8]) -> Option<usize> {
    if header.len() < 30 || !header.starts_with(&BMP_SIGNATURE) {
        return None;
    }
    let le16 = |at: usize| u16::from_le_bytes([header[at], header[at + 1]]);
    let le32 = |at: usize| u32::from_le_bytes([header[at], header[at + 1], header[at + 2], header[at + 3]]);

    let dib_size = le32(14);
    let bits = if dib_size == BMP_CORE_HEADER_SIZE { le16(24) } else { le16(28) };
    if !matches!(bits, 1 | 2 | 4 | 8) {
        return None;
    }

    let full = 1usize << bits;
    let colors_used = if dib_size > BMP_CORE_HEADER_SIZE && header.len() >= BMP_HEADER_LEN {
        le32(46) as usize
    } else {
        0
    };
    Some(if colors_used == 0 { full } else { colors_used.min(full) })
}

/// Up to `len` leading bytes of the file
fn read_header(path: &Path, len: usize) -> TerrainResult<Vec<u8>> {
    let mut header = Vec::with_capacity(len);
    File::open(path)?.take(len as u64).read_to_end(&mut header)?;
    Ok(header)
}

/// Short mode name for an `image` crate colour type
fn image_mode_name(color: image::ColorType) -> String {
    use image::ColorType as C;

    let name = match color {
        C::L8 => "L",
        C::La8 => "LA",
        C::Rgb8 => "RGB",
        C::Rgba8 => "RGBA",
        C::L16 => "L;16",
        C::La16 => "LA;16",
        C::Rgb16 => "RGB;16",
        C::Rgba16 => "RGBA;16",
        C::Rgb32F => "RGB;32F",
        C::Rgba32F => "RGBA;32F",
        other => return format!("{:?}", other),
    };
    name.to_string()
}

/// Expand packed 1/2/4-bit rows to one index per byte
fn unpack_indices(buffer: &[u8], line_size: usize, width: u32, height: u32, depth: BitDepth) -> Vec<u8> {
    let width = width as usize;
    let bits = depth as usize;
    let mut pixels = Vec::with_capacity(width * height as usize);

    for row in buffer.chunks(line_size).take(height as usize) {
        if bits == 8 {
            pixels.extend_from_slice(&row[..width]);
            continue;
        }
        let per_byte = 8 / bits;
        let mask = (1u8 << bits) - 1;
        for x in 0..width {
            let byte = row[x / per_byte];
            let shift = 8 - bits * (x % per_byte + 1);
            pixels.push((byte >> shift) & mask);
        }
    }
    pixels
}

/// Short mode name (`L`, `RGB`, `RGBA;16`, ...) for a PNG colour type
fn png_mode_name(color_type: ColorType, depth: BitDepth) -> String {
    let base = match color_type {
        ColorType::Grayscale => "L",
        ColorType::GrayscaleAlpha => "LA",
        ColorType::Rgb => "RGB",
        ColorType::Rgba => "RGBA",
        ColorType::Indexed => "P",
    };
    match depth {
        BitDepth::Eight => base.to_string(),
        other => format!("{};{}", base, other as u8),
    }
}
