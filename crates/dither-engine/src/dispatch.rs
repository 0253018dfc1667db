//! Algorithm dispatch.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::diffusion::ErrorDiffusion;
use crate::{
    Algorithm, DitherError, DitherOptions, Image, Result, grayscale, kernel, median, ordered,
    screening, stochastic,
};

/// Dither `img` in place with a generator seeded from `options.seed`, or
/// from OS entropy when no seed is set.
pub fn dither(img: &mut Image<'_>, algorithm: Algorithm, options: &DitherOptions) -> Result<()> {
    let mut rng = match options.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    dither_with_rng(img, algorithm, options, &mut rng)
}

/// Dither `img` in place, drawing randomness only from `rng`.
///
/// Every algorithm except [`Algorithm::Custom`] first reduces the image to
/// grayscale. Options are validated before the buffer is touched, and
/// `Custom` without a transform fails with
/// [`DitherError::MissingCustomHandler`] before any mutation. A failing
/// custom transform may leave the buffer partially modified.
pub fn dither_with_rng<R: Rng + ?Sized>(
    img: &mut Image<'_>,
    algorithm: Algorithm,
    options: &DitherOptions,
    rng: &mut R,
) -> Result<()> {
    options.validate()?;

    let (width, height) = img.dimensions();
    debug!(width, height, %algorithm, "Dispatching dither");

    if let Algorithm::Custom = algorithm {
        let transform = options
            .custom
            .as_ref()
            .ok_or(DitherError::MissingCustomHandler)?;
        return transform.apply(img, options);
    }

    grayscale::to_grayscale(img);

    let diffuse = |img: &mut Image<'_>, kernel| {
        ErrorDiffusion::new(kernel, options.serpentine).apply(img);
    };

    match algorithm {
        Algorithm::FloydSteinberg => diffuse(img, kernel::FLOYD_STEINBERG),
        Algorithm::Atkinson => diffuse(img, kernel::ATKINSON),
        Algorithm::Burkes => diffuse(img, kernel::BURKES),
        Algorithm::DiffusionRow => diffuse(img, kernel::DIFFUSION_ROW),
        Algorithm::DiffusionColumn => diffuse(img, kernel::DIFFUSION_COLUMN),
        Algorithm::Diffusion2d => diffuse(img, kernel::DIFFUSION_2D),
        Algorithm::JarvisJudiceNinke => diffuse(img, kernel::JARVIS_JUDICE_NINKE),
        Algorithm::Sierra2 => diffuse(img, kernel::SIERRA2),
        Algorithm::Stucki => diffuse(img, kernel::STUCKI),
        Algorithm::Threshold => median::apply(img),
        Algorithm::Grayscale => {}
        Algorithm::OrderedBayer => ordered::apply_bayer(img),
        Algorithm::Random => stochastic::apply_random(img, rng),
        Algorithm::Ditherpunk => stochastic::apply_ditherpunk(img, rng),
        Algorithm::EvenTonedScreening => {
            let matrix = ordered::even_toned_matrix(options.screening_size);
            ordered::apply_screening(img, &matrix);
        }
        Algorithm::SimpleEvenTonedScreening => screening::apply_simple_even_toned(img),
        Algorithm::EvenBetterScreening => screening::apply_even_better(img, &options.ebs, rng),
        // Returned above without grayscale conversion.
        Algorithm::Custom => {}
    }

    Ok(())
}
