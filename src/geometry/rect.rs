//! Rectangle structure for addressing part of an image
//!
//! Coordinates are in pixels with (0,0) at the top-left corner of the
//! image.

/// Rectangle in pixel coordinates
///
/// Defined by its top-left corner and its dimensions. Catalog entries use
/// it to name the area of the terrain sheet a region is cut from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    /// X-coordinate of the top-left corner (pixels from left)
    pub x: u32,

    /// Y-coordinate of the top-left corner (pixels from top)
    pub y: u32,

    /// Width of the rectangle in pixels
    pub width: u32,

    /// Height of the rectangle in pixels
    pub height: u32,
}

impl Rect {
    /// Create a new rectangle
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Rect { x, y, width, height }
    }

    /// X coordinate immediately right of the rectangle (exclusive)
    pub fn end_x(&self) -> u64 {
        self.x as u64 + self.width as u64
    }

    /// Y coordinate immediately below the rectangle (exclusive)
    pub fn end_y(&self) -> u64 {
        self.y as u64 + self.height as u64
    }

    /// Check whether the rectangle lies entirely inside an image
    ///
    /// # Arguments
    /// * `image_width` - Width of the image in pixels
    /// * `image_height` - Height of the image in pixels
    pub fn fits_within(&self, image_width: u32, image_height: u32) -> bool {
        self.end_x() <= image_width as u64 && self.end_y() <= image_height as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fits_within_exact_edges() {
        let rect = Rect::new(64, 64, 256, 256);
        assert!(rect.fits_within(320, 320));
        assert!(!rect.fits_within(319, 320));
        assert!(!rect.fits_within(320, 319));
    }

    #[test]
    fn test_end_coordinates_do_not_overflow() {
        let rect = Rect::new(u32::MAX, 0, 10, 1);
        assert_eq!(rect.end_x(), u32::MAX as u64 + 10);
        assert!(!rect.fits_within(u32::MAX, 1));
    }
}
