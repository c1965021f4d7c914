//! Custom error types for terrain conversion

use std::fmt;
use std::io;

/// Fatal conversion errors
///
/// Conditions a run can recover from (a region with no content, a missing
/// template file) are not errors; they are reported through the outcome
/// types of the extractor and the converter.
#[derive(Debug)]
pub enum TerrainError {
    /// I/O error
    IoError(io::Error),
    /// Error raised by the image codecs
    ImageError(image::ImageError),
    /// Error raised while decoding a PNG source
    DecodeError(png::DecodingError),
    /// Source image is neither palette-indexed nor RGBA
    UnsupportedFormat(String),
    /// A catalog rectangle does not fit inside the source image
    RegionOutOfBounds {
        name: String,
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        image_width: u32,
        image_height: u32,
    },
    /// Border trimming would leave no pixels
    BorderTrimUnderflow { width: u32, height: u32 },
    /// Color specification could not be parsed
    InvalidColor(String),
    /// Configuration file could not be used
    ConfigError(String),
    /// Generic error with message
    GenericError(String),
}

impl fmt::Display for TerrainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TerrainError::IoError(e) => write!(f, "I/O error: {}", e),
            TerrainError::ImageError(e) => write!(f, "Image error: {}", e),
            TerrainError::DecodeError(e) => write!(f, "PNG decoding error: {}", e),
            TerrainError::UnsupportedFormat(mode) => write!(
                f,
                "{} mode images are not supported. Use Indexed or RGBA mode.",
                mode
            ),
            TerrainError::RegionOutOfBounds { name, x, y, width, height, image_width, image_height } => write!(
                f,
                "Region {} ({},{} {}x{}) exceeds image bounds {}x{}",
                name, x, y, width, height, image_width, image_height
            ),
            TerrainError::BorderTrimUnderflow { width, height } => write!(
                f,
                "Cannot trim a 1 pixel border from a {}x{} bitmap",
                width, height
            ),
            TerrainError::InvalidColor(spec) => write!(f, "Invalid color: {}", spec),
            TerrainError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            TerrainError::GenericError(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for TerrainError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TerrainError::IoError(e) => Some(e),
            TerrainError::ImageError(e) => Some(e),
            TerrainError::DecodeError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for TerrainError {
    fn from(error: io::Error) -> Self {
        TerrainError::IoError(error)
    }
}

impl From<image::ImageError> for TerrainError {
    fn from(error: image::ImageError) -> Self {
        TerrainError::ImageError(error)
    }
}

impl From<png::DecodingError> for TerrainError {
    fn from(error: png::DecodingError) -> Self {
        TerrainError::DecodeError(error)
    }
}

impl From<String> for TerrainError {
    fn from(msg: String) -> Self {
        TerrainError::GenericError(msg)
    }
}

/// Result type for terrain operations
pub type TerrainResult<T> = Result<T, TerrainError>;
