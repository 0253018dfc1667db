//! Generic error-diffusion driver.
//!
//! Visits pixels row by row, quantizes each against the fixed threshold 128
//! and pushes the quantization error into not-yet-visited neighbours as
//! described by a [`Kernel`]. Every pixel depends on error written by earlier
//! pixels, so the scan is strictly sequential.

use tracing::debug;

use crate::kernel::Kernel;
use crate::{Image, MID_THRESHOLD};

/// Error-diffusion quantizer over one kernel and scan policy.
#[derive(Debug, Clone, Copy)]
pub struct ErrorDiffusion {
    kernel: Kernel,
    serpentine: bool,
}

impl ErrorDiffusion {
    pub fn new(kernel: Kernel, serpentine: bool) -> Self {
        Self { kernel, serpentine }
    }

    pub fn kernel(&self) -> &Kernel {
        &self.kernel
    }

    /// Binarize a grayscale image in place.
    ///
    /// With serpentine scanning, odd rows run right-to-left and every kernel
    /// `dx` is mirrored so error still flows ahead of the scan. Targets outside
    /// the image are dropped. Updated neighbours saturate to `0..=255`.
    pub fn apply(&self, img: &mut Image<'_>) {
        let (width, height) = img.dimensions();
        debug!(
            width,
            height,
            divisor = self.kernel.divisor,
            taps = self.kernel.entries.len(),
            serpentine = self.serpentine,
            "Applying error diffusion"
        );

        let divisor = i32::from(self.kernel.divisor);
        let (w, h) = (i64::from(width), i64::from(height));

        for y in 0..height {
            let reversed = self.serpentine && y % 2 == 1;
            let direction = if reversed { -1 } else { 1 };

            for i in 0..width {
                let x = if reversed { width - 1 - i } else { i };

                let old = img.luma(x, y);
                let new = if old < MID_THRESHOLD { 0 } else { 255 };
                let error = i32::from(old) - i32::from(new);
                img.set_luma(x, y, new);

                if error == 0 {
                    continue;
                }

                for &(dx, dy, weight) in self.kernel.entries {
                    let tx = i64::from(x) + i64::from(dx * direction);
                    let ty = i64::from(y) + i64::from(dy);
                    if tx < 0 || tx >= w || ty >= h {
                        continue;
                    }
                    let (tx, ty) = (tx as u32, ty as u32);
                    let delta = error * i32::from(weight) / divisor;
                    let value = (i32::from(img.luma(tx, ty)) + delta).clamp(0, 255) as u8;
                    img.set_luma(tx, ty, value);
                }
            }
        }
    }
}
