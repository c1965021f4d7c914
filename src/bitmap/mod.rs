//! Indexed bitmaps
//!
//! Decoding of terrain sheets, RGBA quantization, the indexed pixel buffer
//! with its palette, and BMP output.

mod decoder;
mod indexed;
mod palette;
mod quantizer;
mod transparency;
mod writer;

pub use decoder::{decode_png, load_source, SourceImage};
pub use indexed::IndexedImage;
pub use palette::{IndexRemap, Palette, PaletteEntry, RgbColor, MAX_PALETTE_SIZE};
pub use quantizer::{ensure_indexed, quantize_rgba, QUANTIZED_PALETTE_SIZE};
pub use transparency::locate_transparent_index;
pub use writer::write_indexed_bmp;
