//! Indexed bitmap output

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use image::codecs::bmp::BmpEncoder;
use image::ExtendedColorType;

use crate::errors::TerrainResult;

use super::indexed::IndexedImage;

/// Write `image` as an 8-bit palette BMP
pub fn write_indexed_bmp(image: &IndexedImage, path: &Path) -> TerrainResult<()> {
    let palette = image.palette().to_rgb_table();
    let mut writer = BufWriter::new(File::create(path)?);

    BmpEncoder::new(&mut writer).encode_with_palette(
        image.pixels(),
        image.width(),
        image.height(),
        ExtendedColorType::L8,
        Some(palette.as_slice()),
    )?;
    writer.flush()?;
    Ok(())
}
