//! Adaptive binarization against the image's own median luminance.

use tracing::debug;

use crate::Image;

/// Median luminance of a grayscale image. With an even pixel count this is
/// the mean of the two middle values, so it may fall between integers.
pub fn median_luma(img: &Image<'_>) -> f32 {
    let mut values: Vec<u8> = img.pixels().map(|p| p[0]).collect();
    values.sort_unstable();

    let mid = values.len() / 2;
    if values.len() % 2 == 1 {
        f32::from(values[mid])
    } else {
        (f32::from(values[mid - 1]) + f32::from(values[mid])) / 2.0
    }
}

/// Binarize a grayscale image: pixels below the median become black,
/// everything else white.
pub fn apply(img: &mut Image<'_>) {
    let median = median_luma(img);
    let (width, height) = img.dimensions();
    debug!(width, height, median, "Applying median threshold");

    for px in img.pixels_mut() {
        let v = if f32::from(px[0]) < median { 0 } else { 255 };
        px[..3].fill(v);
    }
}
