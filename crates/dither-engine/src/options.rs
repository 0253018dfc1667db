//! Per-call dithering options.

use std::fmt;
use std::sync::Arc;

use crate::screening::ThresholdModulation;
use crate::{DitherError, Image, ImageTransform, Result};

/// Default edge length of the even-toned screening matrix.
pub const DEFAULT_SCREENING_SIZE: usize = 8;

/// Largest accepted even-toned screening matrix edge.
pub const MAX_SCREENING_SIZE: usize = 64;

/// Default dimensions of a generated threshold-modulation matrix.
pub const DEFAULT_MODULATION_SIZE: usize = 8;

/// Options for even-better screening.
#[derive(Debug, Clone)]
pub struct EbsOptions {
    /// Output levels. Accepted and validated; binarization stays two-level.
    pub levels: u8,

    /// Width of the generated modulation matrix when none is supplied.
    pub modulation_width: usize,

    /// Height of the generated modulation matrix when none is supplied.
    pub modulation_height: usize,

    /// Caller-supplied modulation matrix. Takes precedence over the
    /// generated one and makes the output deterministic.
    pub modulation: Option<ThresholdModulation>,
}

impl Default for EbsOptions {
    fn default() -> Self {
        Self {
            levels: 2,
            modulation_width: DEFAULT_MODULATION_SIZE,
            modulation_height: DEFAULT_MODULATION_SIZE,
            modulation: None,
        }
    }
}

/// Options shared by every algorithm. Fields irrelevant to the selected
/// algorithm are ignored.
#[derive(Clone)]
pub struct DitherOptions {
    /// Alternate scan direction per row in error diffusion.
    pub serpentine: bool,

    /// Edge length `N` of the even-toned screening matrix (`2..=64`).
    pub screening_size: usize,

    pub ebs: EbsOptions,

    /// Seed for [`crate::dither`]. Ignored by [`crate::dither_with_rng`].
    pub seed: Option<u64>,

    /// Transform run for [`crate::Algorithm::Custom`].
    pub custom: Option<Arc<dyn ImageTransform>>,
}

impl Default for DitherOptions {
    fn default() -> Self {
        Self {
            serpentine: false,
            screening_size: DEFAULT_SCREENING_SIZE,
            ebs: EbsOptions::default(),
            seed: None,
            custom: None,
        }
    }
}

impl fmt::Debug for DitherOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DitherOptions")
            .field("serpentine", &self.serpentine)
            .field("screening_size", &self.screening_size)
            .field("ebs", &self.ebs)
            .field("seed", &self.seed)
            .field("custom", &self.custom.as_ref().map(|_| "<transform>"))
            .finish()
    }
}

impl DitherOptions {
    /// Create options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set serpentine scanning.
    pub fn with_serpentine(mut self, val: bool) -> Self {
        self.serpentine = val;
        self
    }

    /// Builder: set the even-toned screening matrix size.
    pub fn with_screening_size(mut self, val: usize) -> Self {
        self.screening_size = val;
        self
    }

    /// Builder: set even-better screening options.
    pub fn with_ebs(mut self, val: EbsOptions) -> Self {
        self.ebs = val;
        self
    }

    /// Builder: supply a fixed threshold-modulation matrix.
    pub fn with_modulation(mut self, val: ThresholdModulation) -> Self {
        self.ebs.modulation = Some(val);
        self
    }

    /// Builder: seed the generator used by [`crate::dither`].
    pub fn with_seed(mut self, val: u64) -> Self {
        self.seed = Some(val);
        self
    }

    /// Builder: set the custom transform.
    pub fn with_custom(mut self, val: Arc<dyn ImageTransform>) -> Self {
        self.custom = Some(val);
        self
    }

    /// Builder: set the custom transform from a closure.
    pub fn with_custom_fn<F>(self, f: F) -> Self
    where
        F: Fn(&mut Image<'_>, &DitherOptions) -> Result<()> + Send + Sync + 'static,
    {
        self.with_custom(Arc::new(f))
    }

    /// Check option ranges.
    pub fn validate(&self) -> Result<()> {
        if !(2..=MAX_SCREENING_SIZE).contains(&self.screening_size) {
            return Err(DitherError::InvalidOptions(format!(
                "screening size must be between 2 and {MAX_SCREENING_SIZE}, got {}",
                self.screening_size
            )));
        }
        if self.ebs.levels < 2 {
            return Err(DitherError::InvalidOptions(format!(
                "EBS levels must be at least 2, got {}",
                self.ebs.levels
            )));
        }
        if self.ebs.modulation_width == 0 || self.ebs.modulation_height == 0 {
            return Err(DitherError::InvalidOptions(
                "modulation matrix dimensions must be positive".into(),
            ));
        }
        Ok(())
    }
}
