//! Transparent palette index detection

use crate::errors::{TerrainError, TerrainResult};

use super::indexed::IndexedImage;

/// Palette index used for transparency in `image`
///
/// Terrain sheets keep the bottom-left pixel transparent, so its index is
/// the transparent one.
pub fn locate_transparent_index(image: &IndexedImage) -> TerrainResult<u8> {
    image
        .height()
        .checked_sub(1)
        .and_then(|bottom| image.get_index(0, bottom))
        .ok_or_else(|| TerrainError::GenericError("Source image has no pixels".to_string()))
}
