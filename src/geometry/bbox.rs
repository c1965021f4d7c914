//! Bounding box structure for content trimming

/// Pixel bounding box with exclusive right and bottom edges
///
/// Coordinates are signed: aligning a box that touches the edge of its
/// image can push it past that edge, and the pixels out there are filled in
/// when the box is cropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelBox {
    /// Left edge (inclusive)
    pub left: i64,
    /// Top edge (inclusive)
    pub top: i64,
    /// Right edge (exclusive)
    pub right: i64,
    /// Bottom edge (exclusive)
    pub bottom: i64,
}

impl PixelBox {
    /// Create a new bounding box
    pub fn new(left: i64, top: i64, right: i64, bottom: i64) -> Self {
        PixelBox { left, top, right, bottom }
    }

    /// Get the width of the box
    pub fn width(&self) -> i64 {
        self.right - self.left
    }

    /// Get the height of the box
    pub fn height(&self) -> i64 {
        self.bottom - self.top
    }

    /// Shrink the box by `border` pixels on every side
    pub fn inset(&self, border: i64) -> Self {
        PixelBox::new(
            self.left + border,
            self.top + border,
            self.right - border,
            self.bottom - border,
        )
    }

    /// Grow the box so both dimensions are multiples of `multiple`
    ///
    /// Each dimension becomes the smallest multiple not below the current
    /// one. The extra pixels are split around the box: the left (top) edge
    /// moves out by half the growth, rounded half to even, and the
    /// remainder goes to the right (bottom) edge.
    pub fn aligned(&self, multiple: i64) -> Self {
        let (left, right) = align_span(self.left, self.width(), multiple);
        let (top, bottom) = align_span(self.top, self.height(), multiple);
        PixelBox::new(left, top, right, bottom)
    }
}

/// Round `value` up to the next multiple of `multiple`
fn round_up(value: i64, multiple: i64) -> i64 {
    (value + multiple - 1).div_euclid(multiple) * multiple
}

/// Half of `growth`, rounded half to even
fn half_shift(growth: i64) -> i64 {
    let half = growth / 2;
    if growth % 2 == 1 && half % 2 == 1 {
        half + 1
    } else {
        half
    }
}

fn align_span(start: i64, length: i64, multiple: i64) -> (i64, i64) {
    let new_length = round_up(length, multiple);
    let new_start = start - half_shift(new_length - length);
    (new_start, new_start + new_length)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aligned_keeps_multiples_of_four() {
        for (w, h) in [(4, 4), (8, 12), (512, 256), (0, 0)] {
            let bbox = PixelBox::new(3, 7, 3 + w, 7 + h);
            assert_eq!(bbox.aligned(4), bbox);
        }
    }

    #[test]
    fn test_aligned_dimensions_are_smallest_multiples() {
        for w in 1..40 {
            for h in 1..10 {
                let bbox = PixelBox::new(10, 20, 10 + w, 20 + h);
                let aligned = bbox.aligned(4);
                assert_eq!(aligned.width() % 4, 0);
                assert_eq!(aligned.height() % 4, 0);
                assert!(aligned.width() >= w && aligned.width() - w < 4);
                assert!(aligned.height() >= h && aligned.height() - h < 4);
                assert!(aligned.left <= bbox.left && aligned.right >= bbox.right);
                assert!(aligned.top <= bbox.top && aligned.bottom >= bbox.bottom);
            }
        }
    }

    #[test]
    fn test_aligned_shift_rounds_half_to_even() {
        // growth 1: shift round(0.5) = 0
        assert_eq!(PixelBox::new(10, 10, 13, 13).aligned(4), PixelBox::new(10, 10, 14, 14));
        // growth 2: shift 1
        assert_eq!(PixelBox::new(10, 10, 12, 12).aligned(4), PixelBox::new(9, 9, 13, 13));
        // growth 3: shift round(1.5) = 2
        assert_eq!(PixelBox::new(10, 10, 11, 11).aligned(4), PixelBox::new(8, 8, 12, 12));
    }

    #[test]
    fn test_aligned_axes_are_independent() {
        let aligned = PixelBox::new(0, 0, 30, 5).aligned(4);
        assert_eq!(aligned, PixelBox::new(-1, -2, 31, 6));
    }

    #[test]
    fn test_inset() {
        let bbox = PixelBox::new(0, 0, 10, 6).inset(1);
        assert_eq!(bbox, PixelBox::new(1, 1, 9, 5));
        assert_eq!((bbox.width(), bbox.height()), (8, 4));
    }
}
