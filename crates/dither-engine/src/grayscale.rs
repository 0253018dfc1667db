//! Luminance reduction.
//!
//! `luminance = floor(0.299 R + 0.587 G + 0.114 B)`, evaluated in integer
//! arithmetic so that pure white stays 255.

use tracing::debug;

use crate::Image;

/// Luminance of one RGB sample.
#[inline]
pub fn luminance(r: u8, g: u8, b: u8) -> u8 {
    ((299 * u32::from(r) + 587 * u32::from(g) + 114 * u32::from(b)) / 1000) as u8
}

/// Replace R, G and B of every pixel with its luminance. Alpha is untouched.
pub fn to_grayscale(img: &mut Image<'_>) {
    let (width, height) = img.dimensions();
    debug!(width, height, "Converting to grayscale");

    for px in img.pixels_mut() {
        let l = luminance(px[0], px[1], px[2]);
        px[0] = l;
        px[1] = l;
        px[2] = l;
    }
}
