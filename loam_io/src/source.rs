//! Source image loading.
//!
//! [`SourceImage`] decodes any format enabled on the `image` crate into a
//! floating-point RGB buffer and exposes it to the core through
//! [`PixelSource`]. Image files store their top row first; `PixelSource`
//! addresses pixels from the bottom-left corner, so rows are flipped on
//! access.

use std::path::Path;

use image::{imageops, DynamicImage, Rgb32FImage};
use loam_core::PixelSource;

use crate::error::{LoamIoError, Result};

/// A decoded RGB image with components in `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceImage {
    pixels: Rgb32FImage,
}

impl SourceImage {
    /// Decode an image file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let decoded = image::open(path)?;
        let image = Self::from_dynamic(&decoded);
        log::debug!(
            "decoded {} ({}x{})",
            path.display(),
            image.width(),
            image.height()
        );
        Ok(image)
    }

    /// Decode an image held in memory.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let decoded = image::load_from_memory(bytes)?;
        Ok(Self::from_dynamic(&decoded))
    }

    /// Convert an already decoded image.
    pub fn from_dynamic(image: &DynamicImage) -> Self {
        Self {
            pixels: image.to_rgb32f(),
        }
    }

    /// Build from interleaved RGB floats, top row first.
    ///
    /// # Errors
    /// Returns `PixelBufferMismatch` if `data.len() != width * height * 3`.
    pub fn from_rgb(width: usize, height: usize, data: Vec<f32>) -> Result<Self> {
        let expected = width * height * 3;
        let got = data.len();
        let mismatch = || LoamIoError::PixelBufferMismatch {
            width,
            height,
            expected,
            got,
        };

        let w = u32::try_from(width).map_err(|_| mismatch())?;
        let h = u32::try_from(height).map_err(|_| mismatch())?;
        if got != expected {
            return Err(mismatch());
        }
        let pixels = Rgb32FImage::from_raw(w, h, data).ok_or_else(mismatch)?;
        Ok(Self { pixels })
    }

    /// Underlying pixel buffer, top row first.
    pub fn pixels(&self) -> &Rgb32FImage {
        &self.pixels
    }

    /// Gaussian blurred copy with standard deviation `strength` (in pixels).
    ///
    /// A non-positive strength returns an unchanged copy.
    pub fn blurred(&self, strength: f32) -> Self {
        if strength <= 0.0 {
            return self.clone();
        }
        if self.pixels.width() <= 1 && self.pixels.height() <= 1 {
            log::warn!("blur requested on a single-pixel image; ignoring");
            return self.clone();
        }
        Self {
            pixels: imageops::blur(&self.pixels, strength),
        }
    }
}

impl PixelSource for SourceImage {
    #[inline]
    fn width(&self) -> usize {
        self.pixels.width() as usize
    }

    #[inline]
    fn height(&self) -> usize {
        self.pixels.height() as usize
    }

    #[inline]
    fn rgb(&self, x: usize, y: usize) -> [f32; 3] {
        let row = self.pixels.height() - 1 - y as u32;
        self.pixels.get_pixel(x as u32, row).0
    }
}
