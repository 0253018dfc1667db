//! Hybrid screening/diffusion quantizers.
//!
//! Both variants binarize `luminance + carried error` against a per-pixel
//! threshold and push the remaining error forward (7/16 right, 5/16 below,
//! 1/16 below-right) through two row buffers owned by the call:
//!
//! - simple even-toned screening biases the threshold by a quarter of the
//!   error carried into the pixel;
//! - even-better screening perturbs it with a tiled threshold-modulation
//!   matrix.

use rand::Rng;
use tracing::debug;

use crate::options::EbsOptions;
use crate::{DitherError, Image, MID_THRESHOLD, Result};

/// Bound of the offsets drawn by [`ThresholdModulation::random`].
pub const MODULATION_AMPLITUDE: i16 = 20;

/// Share of the carried error added to the threshold in simple even-toned
/// screening.
const ERROR_BIAS: f32 = 0.25;

/// Tileable table of signed threshold offsets, addressed by
/// `(y mod height, x mod width)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThresholdModulation {
    width: usize,
    height: usize,
    offsets: Vec<i16>,
}

impl ThresholdModulation {
    /// Wrap row-major offsets. Fails unless both dimensions are positive and
    /// `offsets.len() == width * height`.
    pub fn new(width: usize, height: usize, offsets: Vec<i16>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(DitherError::InvalidOptions(
                "modulation matrix dimensions must be positive".into(),
            ));
        }
        if offsets.len() != width * height {
            return Err(DitherError::InvalidOptions(format!(
                "modulation matrix {width}x{height} needs {} entries, got {}",
                width * height,
                offsets.len()
            )));
        }
        Ok(Self {
            width,
            height,
            offsets,
        })
    }

    /// All-zero matrix; screening then reduces to plain forward diffusion.
    ///
    /// # Panics
    /// Panics if a dimension is zero.
    pub fn zeros(width: usize, height: usize) -> Self {
        assert!(
            width > 0 && height > 0,
            "Modulation matrix dimensions must be positive, got {width}x{height}"
        );
        Self {
            width,
            height,
            offsets: vec![0; width * height],
        }
    }

    /// Matrix with offsets drawn uniformly from `[-20, 20]`.
    ///
    /// # Panics
    /// Panics if a dimension is zero.
    pub fn random<R: Rng + ?Sized>(width: usize, height: usize, rng: &mut R) -> Self {
        let mut tm = Self::zeros(width, height);
        for v in tm.offsets.iter_mut() {
            *v = rng.gen_range(-MODULATION_AMPLITUDE..=MODULATION_AMPLITUDE);
        }
        tm
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Offset applied at pixel `(x, y)`.
    #[inline]
    pub fn offset(&self, x: u32, y: u32) -> i16 {
        let row = y as usize % self.height;
        let col = x as usize % self.width;
        self.offsets[row * self.width + col]
    }
}

/// Forward-diffusion pass with a caller-chosen threshold.
///
/// `threshold_at(x, y, carried)` receives the error carried into the pixel.
fn diffuse_screened<F>(img: &mut Image<'_>, mut threshold_at: F)
where
    F: FnMut(u32, u32, f32) -> f32,
{
    let (width, height) = img.dimensions();
    let w = width as usize;
    let mut current = vec![0.0f32; w];
    let mut next = vec![0.0f32; w];

    for y in 0..height {
        for x in 0..w {
            let carried = current[x];
            let value = f32::from(img.luma(x as u32, y)) + carried;
            let threshold = threshold_at(x as u32, y, carried);
            let new = if value < threshold { 0 } else { 255 };
            let error = value - f32::from(new);
            img.set_luma(x as u32, y, new);

            if x + 1 < w {
                current[x + 1] += error * 7.0 / 16.0;
            }
            next[x] += error * 5.0 / 16.0;
            if x + 1 < w {
                next[x + 1] += error * 1.0 / 16.0;
            }
        }
        std::mem::swap(&mut current, &mut next);
        next.fill(0.0);
    }
}

/// Simple even-toned screening: threshold `clamp(128 + carried / 4, 0, 255)`.
pub fn apply_simple_even_toned(img: &mut Image<'_>) {
    let (width, height) = img.dimensions();
    debug!(width, height, "Applying simple even-toned screening");

    diffuse_screened(img, |_, _, carried| {
        (f32::from(MID_THRESHOLD) + carried * ERROR_BIAS).clamp(0.0, 255.0)
    });
}

/// Even-better screening with a fixed modulation matrix:
/// threshold `clamp(128 + TM[y mod h][x mod w], 0, 255)`.
pub fn apply_modulated(img: &mut Image<'_>, tm: &ThresholdModulation) {
    let (width, height) = img.dimensions();
    debug!(
        width,
        height,
        tm_width = tm.width(),
        tm_height = tm.height(),
        "Applying even-better screening"
    );

    diffuse_screened(img, |x, y, _| {
        (f32::from(MID_THRESHOLD) + f32::from(tm.offset(x, y))).clamp(0.0, 255.0)
    });
}

/// Even-better screening. Uses `ebs.modulation` when present, otherwise a
/// matrix of the configured dimensions drawn from `rng`.
pub fn apply_even_better<R: Rng + ?Sized>(img: &mut Image<'_>, ebs: &EbsOptions, rng: &mut R) {
    debug!(levels = ebs.levels, "Even-better screening output is two-level");

    match &ebs.modulation {
        Some(tm) => apply_modulated(img, tm),
        None => {
            let tm = ThresholdModulation::random(ebs.modulation_width, ebs.modulation_height, rng);
            apply_modulated(img, &tm);
        }
    }
}
