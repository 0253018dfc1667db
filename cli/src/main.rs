//! `dither`: convert an image to 1-bit, optionally emitting ESC/POS raster bytes.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use dither_cli::{Args, DitherConfig, load_dotenv, pipeline};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    load_dotenv();

    let config = DitherConfig::load(&args)?;
    tracing::debug!(?config, "Resolved configuration");

    let summary = pipeline::run(
        &config,
        &args.input,
        &args.output,
        args.raster.as_deref(),
    )?;

    tracing::info!(
        width = summary.width,
        height = summary.height,
        "Done"
    );
    Ok(())
}
