//! Input abstraction.
//!
//! [`PixelSource`] is the only contract loam_core consumes from image I/O: a
//! readable grid of RGB triples. Decoding, color management and file access
//! live in `loam_io`, which implements this trait for decoded images.

/// A readable 2D pixel grid with RGB components in `[0, 1]`.
///
/// Pixel `(0, 0)` is the bottom-left corner of the picture; `y` grows upward,
/// and maps directly to the field's `j` axis.
pub trait PixelSource {
    /// Number of pixel columns.
    fn width(&self) -> usize;

    /// Number of pixel rows.
    fn height(&self) -> usize;

    /// RGB components of the pixel at `(x, y)`.
    ///
    /// Callers only pass `x < width()` and `y < height()`.
    fn rgb(&self, x: usize, y: usize) -> [f32; 3];
}

impl<T: PixelSource + ?Sized> PixelSource for &T {
    #[inline]
    fn width(&self) -> usize {
        (**self).width()
    }

    #[inline]
    fn height(&self) -> usize {
        (**self).height()
    }

    #[inline]
    fn rgb(&self, x: usize, y: usize) -> [f32; 3] {
        (**self).rgb(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Checker;

    impl PixelSource for Checker {
        fn width(&self) -> usize {
            2
        }

        fn height(&self) -> usize {
            2
        }

        fn rgb(&self, x: usize, y: usize) -> [f32; 3] {
            if (x + y) % 2 == 0 {
                [1.0, 1.0, 1.0]
            } else {
                [0.0, 0.0, 0.0]
            }
        }
    }

    #[test]
    fn test_pixel_source_by_reference() {
        fn first_pixel<P: PixelSource>(p: P) -> [f32; 3] {
            p.rgb(0, 0)
        }
        assert_eq!(first_pixel(&Checker), [1.0, 1.0, 1.0]);
        assert_eq!((&Checker).width(), 2);
    }
}
