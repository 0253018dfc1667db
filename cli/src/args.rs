//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;
use dither_engine::Algorithm;

/// Dither an image to 1-bit and optionally frame it for a thermal printer.
#[derive(Debug, Parser)]
#[command(name = "dither", version)]
pub struct Args {
    /// Input image (any format the `image` crate decodes)
    pub input: PathBuf,

    /// Output PNG path
    pub output: PathBuf,

    /// Algorithm tag, e.g. FLOYD_STEINBERG or even-better-screening
    #[arg(short, long)]
    pub algorithm: Option<Algorithm>,

    /// Alternate scan direction on every row (error diffusion only).
    /// `--serpentine=false` overrides a config file or environment value.
    #[arg(long, num_args = 0..=1, default_missing_value = "true", require_equals = true)]
    pub serpentine: Option<bool>,

    /// Edge of the even-toned screening matrix
    #[arg(long)]
    pub screening_size: Option<usize>,

    /// Seed for the stochastic algorithms
    #[arg(long)]
    pub seed: Option<u64>,

    /// JSON configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Also write ESC/POS raster bytes to this path
    #[arg(long)]
    pub raster: Option<PathBuf>,

    /// Rows per raster block
    #[arg(long)]
    pub block_height: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal() {
        let args = Args::try_parse_from(["dither", "in.jpg", "out.png"]).unwrap();
        assert_eq!(args.input, PathBuf::from("in.jpg"));
        assert_eq!(args.output, PathBuf::from("out.png"));
        assert!(args.algorithm.is_none());
        assert!(args.serpentine.is_none());
        assert!(args.raster.is_none());
    }

    #[test]
    fn test_parse_algorithm_tag() {
        let args = Args::try_parse_from([
            "dither",
            "in.png",
            "out.png",
            "--algorithm",
            "jarvis-judice-ninke",
            "--serpentine",
            "--seed",
            "42",
        ])
        .unwrap();
        assert_eq!(args.algorithm, Some(Algorithm::JarvisJudiceNinke));
        assert_eq!(args.serpentine, Some(true));
        assert_eq!(args.seed, Some(42));
    }

    #[test]
    fn test_serpentine_can_be_disabled() {
        let args =
            Args::try_parse_from(["dither", "in.png", "out.png", "--serpentine=false"]).unwrap();
        assert_eq!(args.serpentine, Some(false));
    }

    #[test]
    fn test_unknown_algorithm_rejected() {
        let result = Args::try_parse_from(["dither", "a", "b", "-a", "HALFTONE"]);
        assert!(result.is_err());
    }
}
