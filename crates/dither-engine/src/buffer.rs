//! Borrowed view over a caller-owned RGBA pixel buffer.
//!
//! The engine never allocates or resizes image storage. An [`Image`] holds an
//! exclusive borrow of the caller's bytes for the duration of one call and
//! every algorithm mutates those bytes in place.

use image::RgbaImage;

use crate::{DitherError, Result};

/// Samples per pixel (R, G, B, A).
pub const CHANNELS: usize = 4;

/// Mutable RGBA8 image view, interleaved `R, G, B, A` per pixel, row-major.
#[derive(Debug)]
pub struct Image<'a> {
    width: u32,
    height: u32,
    data: &'a mut [u8],
}

impl<'a> Image<'a> {
    /// Wrap a raw buffer. Fails unless both dimensions are positive and
    /// `data.len() == width * height * 4`.
    pub fn new(width: u32, height: u32, data: &'a mut [u8]) -> Result<Self> {
        let expected = width as usize * height as usize * CHANNELS;
        if width == 0 || height == 0 || data.len() != expected {
            return Err(DitherError::InvalidBuffer {
                width,
                height,
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Borrow the pixel storage of an `image` crate RGBA buffer.
    pub fn from_rgba(img: &'a mut RgbaImage) -> Result<Self> {
        let (width, height) = img.dimensions();
        let data: &'a mut [u8] = img;
        Self::new(width, height, data)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Number of pixels (`width * height`).
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Raw RGBA bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &*self.data
    }

    /// Raw RGBA bytes, mutable. Intended for custom transforms.
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut *self.data
    }

    /// RGBA bytes of row `y`.
    pub fn row(&self, y: u32) -> &[u8] {
        let stride = self.width as usize * CHANNELS;
        let start = y as usize * stride;
        &self.data[start..start + stride]
    }

    /// Iterate over pixels as mutable `[R, G, B, A]` chunks.
    pub fn pixels_mut(&mut self) -> std::slice::ChunksExactMut<'_, u8> {
        self.data.chunks_exact_mut(CHANNELS)
    }

    /// Iterate over pixels as `[R, G, B, A]` chunks.
    pub fn pixels(&self) -> std::slice::ChunksExact<'_, u8> {
        self.data.chunks_exact(CHANNELS)
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * CHANNELS
    }

    /// Red sample at `(x, y)`. After grayscale conversion this is the luminance.
    #[inline]
    pub fn luma(&self, x: u32, y: u32) -> u8 {
        self.data[self.offset(x, y)]
    }

    /// Write `value` into R, G and B at `(x, y)`, leaving alpha untouched.
    #[inline]
    pub fn set_luma(&mut self, x: u32, y: u32, value: u8) {
        let i = self.offset(x, y);
        self.data[i..i + 3].fill(value);
    }

    #[inline]
    pub fn alpha(&self, x: u32, y: u32) -> u8 {
        self.data[self.offset(x, y) + 3]
    }

    /// True when every pixel has `R == G == B` and that value is 0 or 255.
    pub fn is_binary(&self) -> bool {
        self.pixels()
            .all(|p| p[0] == p[1] && p[1] == p[2] && (p[0] == 0 || p[0] == 255))
    }
}
