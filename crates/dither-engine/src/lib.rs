//! Binary dithering engine for 1-bit output devices.
//!
//! Converts an RGBA pixel buffer in place into a black-and-white
//! approximation using error diffusion, ordered screening, adaptive
//! median thresholding, stochastic thresholds, or hybrid screening.
//!
//! Every algorithm except [`Algorithm::Grayscale`] and [`Algorithm::Custom`]
//! leaves each pixel with `R == G == B` in `{0, 255}`. Alpha is never touched.

pub mod algorithm;
pub mod buffer;
pub mod custom;
pub mod diffusion;
pub mod dispatch;
pub mod grayscale;
pub mod kernel;
pub mod median;
pub mod options;
pub mod ordered;
pub mod screening;
pub mod stochastic;

// Re-exports for convenience
pub use algorithm::Algorithm;
pub use buffer::Image;
pub use custom::ImageTransform;
pub use dispatch::{dither, dither_with_rng};
pub use kernel::Kernel;
pub use options::{DitherOptions, EbsOptions};
pub use ordered::ScreeningMatrix;
pub use screening::ThresholdModulation;

/// Nominal binarization threshold shared by diffusion and screening variants.
pub const MID_THRESHOLD: u8 = 128;

/// Errors reported by the dithering engine.
#[derive(Debug, thiserror::Error)]
pub enum DitherError {
    #[error("Unknown dithering algorithm: {0}")]
    UnknownAlgorithm(String),

    #[error("CUSTOM algorithm selected without a custom transform")]
    MissingCustomHandler,

    #[error("Invalid image buffer: {width}x{height} needs {expected} bytes, got {actual}")]
    InvalidBuffer {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid options: {0}")]
    InvalidOptions(String),

    #[error("Custom transform failed: {0}")]
    Custom(String),
}

/// Result type alias for dithering operations.
pub type Result<T> = std::result::Result<T, DitherError>;
