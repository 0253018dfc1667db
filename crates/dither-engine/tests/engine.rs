use dither_engine::{Algorithm, DitherError, DitherOptions, Image, ThresholdModulation, dither};
use image::{Rgba, RgbaImage};

fn gray_image(width: u32, height: u32, values: &[u8]) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        let v = values[(y * width + x) as usize];
        Rgba([v, v, v, 255])
    })
}

fn run(img: &mut RgbaImage, algorithm: Algorithm, options: &DitherOptions) {
    let mut view = Image::from_rgba(img).unwrap();
    dither(&mut view, algorithm, options).unwrap();
}

#[test]
fn median_threshold_splits_two_by_two() {
    let mut img = gray_image(2, 2, &[10, 10, 250, 250]);
    run(&mut img, Algorithm::Threshold, &DitherOptions::default());

    assert_eq!(img.get_pixel(0, 0).0, [0, 0, 0, 255]);
    assert_eq!(img.get_pixel(1, 0).0, [0, 0, 0, 255]);
    assert_eq!(img.get_pixel(0, 1).0, [255, 255, 255, 255]);
    assert_eq!(img.get_pixel(1, 1).0, [255, 255, 255, 255]);
}

#[test]
fn bayer_pattern_on_uniform_gray() {
    let mut img = gray_image(4, 4, &[100; 16]);
    run(&mut img, Algorithm::OrderedBayer, &DitherOptions::default());

    let expected: [[u8; 4]; 4] = [
        [255, 0, 255, 0],
        [0, 255, 0, 0],
        [255, 0, 255, 0],
        [0, 0, 0, 255],
    ];
    for y in 0..4 {
        for x in 0..4 {
            assert_eq!(img.get_pixel(x, y).0[0], expected[y as usize][x as usize]);
        }
    }
}

#[test]
fn one_pixel_image_survives_every_diffusion_kernel() {
    for algorithm in Algorithm::ALL.into_iter().filter(|a| a.kernel().is_some()) {
        for serpentine in [false, true] {
            let mut img = RgbaImage::from_pixel(1, 1, Rgba([90, 90, 90, 17]));
            run(
                &mut img,
                algorithm,
                &DitherOptions::new().with_serpentine(serpentine),
            );
            assert_eq!(img.get_pixel(0, 0).0, [0, 0, 0, 17], "{algorithm}");
        }
    }
}

#[test]
fn serpentine_changes_floyd_steinberg_output() {
    let values = [0, 0, 0, 120, 100, 20];

    let mut linear = gray_image(3, 2, &values);
    run(&mut linear, Algorithm::FloydSteinberg, &DitherOptions::default());

    let mut serpentine = gray_image(3, 2, &values);
    run(
        &mut serpentine,
        Algorithm::FloydSteinberg,
        &DitherOptions::new().with_serpentine(true),
    );

    assert_ne!(linear, serpentine);
}

/// Fixed-threshold forward diffusion, 7/16 right, 5/16 below, 1/16 below-right.
fn forward_diffusion(values: &[u8], width: usize, height: usize) -> Vec<u8> {
    let mut err = vec![0.0f32; width * (height + 1)];
    let mut out = vec![0u8; width * height];
    for y in 0..height {
        for x in 0..width {
            let value = f32::from(values[y * width + x]) + err[y * width + x];
            let new = if value < 128.0 { 0u8 } else { 255 };
            let e = value - f32::from(new);
            out[y * width + x] = new;
            if x + 1 < width {
                err[y * width + x + 1] += e * 7.0 / 16.0;
                err[(y + 1) * width + x + 1] += e / 16.0;
            }
            err[(y + 1) * width + x] += e * 5.0 / 16.0;
        }
    }
    out
}

#[test]
fn zero_modulation_reproduces_forward_diffusion() {
    let (width, height) = (24u32, 10u32);
    let values: Vec<u8> = (0..width * height)
        .map(|i| ((i % width) * 255 / (width - 1)) as u8 ^ ((i / width) as u8 * 5))
        .collect();

    let mut ebs = gray_image(width, height, &values);
    run(
        &mut ebs,
        Algorithm::EvenBetterScreening,
        &DitherOptions::new().with_modulation(ThresholdModulation::zeros(3, 3)),
    );

    let expected = forward_diffusion(&values, width as usize, height as usize);
    let actual: Vec<u8> = ebs.pixels().map(|p| p.0[0]).collect();
    assert_eq!(actual, expected);
    assert!(actual.contains(&0) && actual.contains(&255));
}

#[test]
fn oversized_screening_matrix_is_rejected() {
    let mut img = gray_image(2, 2, &[10, 20, 30, 40]);
    let before = img.clone();
    let mut view = Image::from_rgba(&mut img).unwrap();
    let err = dither(
        &mut view,
        Algorithm::EvenTonedScreening,
        &DitherOptions::new().with_screening_size(50_000),
    )
    .unwrap_err();
    assert!(matches!(err, DitherError::InvalidOptions(_)));
    assert_eq!(img, before);
}

#[test]
fn custom_requires_handler() {
    let mut img = RgbaImage::from_pixel(2, 2, Rgba([1, 2, 3, 4]));
    let mut view = Image::from_rgba(&mut img).unwrap();
    let err = dither(&mut view, Algorithm::Custom, &DitherOptions::default()).unwrap_err();
    assert!(matches!(err, DitherError::MissingCustomHandler));
}

#[test]
fn unknown_tag_is_reported() {
    let err = "HALFTONE".parse::<Algorithm>().unwrap_err();
    assert!(matches!(err, DitherError::UnknownAlgorithm(_)));
    assert_eq!(err.to_string(), "Unknown dithering algorithm: HALFTONE");
}

#[test]
fn even_toned_screening_respects_matrix_size() {
    let values: Vec<u8> = (0..64).map(|i| (i * 4) as u8).collect();

    let mut small = gray_image(8, 8, &values);
    run(
        &mut small,
        Algorithm::EvenTonedScreening,
        &DitherOptions::new().with_screening_size(2),
    );

    let mut large = gray_image(8, 8, &values);
    run(
        &mut large,
        Algorithm::EvenTonedScreening,
        &DitherOptions::new().with_screening_size(8),
    );

    assert_ne!(small, large);
}
