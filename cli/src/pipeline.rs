//! Decode, dither, encode, and optionally frame for a printer.

use std::path::Path;

use anyhow::Context;
use dither_engine::{Image, dither};
use raster_printer::{PackedBitmap, RasterProtocol};

use crate::config::DitherConfig;

/// What a run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub width: u32,
    pub height: u32,
    /// Bytes written to the raster file, if one was requested.
    pub raster_bytes: Option<usize>,
}

/// Dither `input` into a PNG at `output`, and write framed raster bytes to
/// `raster` when given.
pub fn run(
    config: &DitherConfig,
    input: &Path,
    output: &Path,
    raster: Option<&Path>,
) -> Result<RunSummary, anyhow::Error> {
    let decoded = image::open(input)
        .with_context(|| format!("failed to open image {}", input.display()))?;
    let mut rgba = decoded.to_rgba8();
    let (width, height) = rgba.dimensions();

    tracing::info!(
        width,
        height,
        algorithm = %config.algorithm,
        "Dithering {}",
        input.display()
    );

    let options = config.dither_options();
    let mut view = Image::from_rgba(&mut rgba)?;
    dither(&mut view, config.algorithm, &options)?;

    let raster_bytes = match raster {
        Some(path) => {
            let protocol = config.raster_protocol()?;
            let bitmap = PackedBitmap::from_image(&view);
            let bytes = protocol.frame(&bitmap)?;
            std::fs::write(path, &bytes)
                .with_context(|| format!("failed to write raster {}", path.display()))?;
            tracing::info!(
                protocol = protocol.name(),
                bytes = bytes.len(),
                "Wrote raster to {}",
                path.display()
            );
            Some(bytes.len())
        }
        None => None,
    };

    rgba.save_with_format(output, image::ImageFormat::Png)
        .with_context(|| format!("failed to write image {}", output.display()))?;
    tracing::info!("Wrote {}", output.display());

    Ok(RunSummary {
        width,
        height,
        raster_bytes,
    })
}
