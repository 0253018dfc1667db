//! Stochastic quantizers driven by an injected random generator.

use rand::Rng;
use tracing::debug;

use crate::{Image, MID_THRESHOLD};

/// Amplitude of the uniform noise added by [`apply_ditherpunk`].
pub const NOISE_AMPLITUDE: f32 = 64.0;

/// Binarize each pixel against its own threshold drawn from `[0, 255)`.
pub fn apply_random<R: Rng + ?Sized>(img: &mut Image<'_>, rng: &mut R) {
    let (width, height) = img.dimensions();
    debug!(width, height, "Applying random threshold");

    for px in img.pixels_mut() {
        let threshold: f32 = rng.gen_range(0.0..255.0);
        let v = if f32::from(px[0]) < threshold { 0 } else { 255 };
        px[..3].fill(v);
    }
}

/// Add uniform noise from `[-64, 64)` to each pixel and binarize at 128.
pub fn apply_ditherpunk<R: Rng + ?Sized>(img: &mut Image<'_>, rng: &mut R) {
    let (width, height) = img.dimensions();
    debug!(width, height, amplitude = NOISE_AMPLITUDE, "Applying noise threshold");

    for px in img.pixels_mut() {
        let noise: f32 = rng.gen_range(-NOISE_AMPLITUDE..NOISE_AMPLITUDE);
        let v = if f32::from(px[0]) + noise < f32::from(MID_THRESHOLD) {
            0
        } else {
            255
        };
        px[..3].fill(v);
    }
}
