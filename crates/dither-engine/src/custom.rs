//! Caller-supplied transform for [`Algorithm::Custom`](crate::Algorithm::Custom).

use crate::{DitherOptions, Image, Result};

/// A transform with the same contract as the built-in algorithms: mutate the
/// image in place, given the call's options.
///
/// Implemented for any `Fn(&mut Image<'_>, &DitherOptions) -> Result<()>`.
/// The engine does not convert to grayscale before calling it.
pub trait ImageTransform: Send + Sync {
    fn apply(&self, img: &mut Image<'_>, options: &DitherOptions) -> Result<()>;
}

impl<F> ImageTransform for F
where
    F: Fn(&mut Image<'_>, &DitherOptions) -> Result<()> + Send + Sync,
{
    fn apply(&self, img: &mut Image<'_>, options: &DitherOptions) -> Result<()> {
        self(img, options)
    }
}
