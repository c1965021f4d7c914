//! Pixel geometry
//!
//! Rectangles in source image space and content bounding boxes that may
//! extend past the image they were measured on.

mod bbox;
mod rect;

pub use self::bbox::PixelBox;
pub use self::rect::Rect;
