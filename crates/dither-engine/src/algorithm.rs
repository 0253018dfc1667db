//! The closed set of dithering algorithms.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::DitherError;
use crate::kernel::{self, Kernel};

/// Algorithm selector.
///
/// Tags are written in `SCREAMING_SNAKE_CASE` (e.g. `FLOYD_STEINBERG`).
/// Parsing is case-insensitive and accepts `-` in place of `_`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Algorithm {
    FloydSteinberg,
    Atkinson,
    Burkes,
    DiffusionRow,
    DiffusionColumn,
    Diffusion2d,
    JarvisJudiceNinke,
    Sierra2,
    Stucki,
    Threshold,
    Grayscale,
    OrderedBayer,
    Random,
    Ditherpunk,
    EvenTonedScreening,
    SimpleEvenTonedScreening,
    EvenBetterScreening,
    Custom,
}

impl Algorithm {
    /// Every variant, in tag order.
    pub const ALL: [Algorithm; 18] = [
        Algorithm::FloydSteinberg,
        Algorithm::Atkinson,
        Algorithm::Burkes,
        Algorithm::DiffusionRow,
        Algorithm::DiffusionColumn,
        Algorithm::Diffusion2d,
        Algorithm::JarvisJudiceNinke,
        Algorithm::Sierra2,
        Algorithm::Stucki,
        Algorithm::Threshold,
        Algorithm::Grayscale,
        Algorithm::OrderedBayer,
        Algorithm::Random,
        Algorithm::Ditherpunk,
        Algorithm::EvenTonedScreening,
        Algorithm::SimpleEvenTonedScreening,
        Algorithm::EvenBetterScreening,
        Algorithm::Custom,
    ];

    /// Canonical tag.
    pub fn as_str(self) -> &'static str {
        match self {
            Algorithm::FloydSteinberg => "FLOYD_STEINBERG",
            Algorithm::Atkinson => "ATKINSON",
            Algorithm::Burkes => "BURKES",
            Algorithm::DiffusionRow => "DIFFUSION_ROW",
            Algorithm::DiffusionColumn => "DIFFUSION_COLUMN",
            Algorithm::Diffusion2d => "DIFFUSION_2D",
            Algorithm::JarvisJudiceNinke => "JARVIS_JUDICE_NINKE",
            Algorithm::Sierra2 => "SIERRA2",
            Algorithm::Stucki => "STUCKI",
            Algorithm::Threshold => "THRESHOLD",
            Algorithm::Grayscale => "GRAYSCALE",
            Algorithm::OrderedBayer => "ORDERED_BAYER",
            Algorithm::Random => "RANDOM",
            Algorithm::Ditherpunk => "DITHERPUNK",
            Algorithm::EvenTonedScreening => "EVEN_TONED_SCREENING",
            Algorithm::SimpleEvenTonedScreening => "SIMPLE_EVEN_TONED_SCREENING",
            Algorithm::EvenBetterScreening => "EVEN_BETTER_SCREENING",
            Algorithm::Custom => "CUSTOM",
        }
    }

    /// Diffusion kernel for the error-diffusion family, `None` otherwise.
    pub fn kernel(self) -> Option<Kernel> {
        match self {
            Algorithm::FloydSteinberg => Some(kernel::FLOYD_STEINBERG),
            Algorithm::Atkinson => Some(kernel::ATKINSON),
            Algorithm::Burkes => Some(kernel::BURKES),
            Algorithm::DiffusionRow => Some(kernel::DIFFUSION_ROW),
            Algorithm::DiffusionColumn => Some(kernel::DIFFUSION_COLUMN),
            Algorithm::Diffusion2d => Some(kernel::DIFFUSION_2D),
            Algorithm::JarvisJudiceNinke => Some(kernel::JARVIS_JUDICE_NINKE),
            Algorithm::Sierra2 => Some(kernel::SIERRA2),
            Algorithm::Stucki => Some(kernel::STUCKI),
            _ => None,
        }
    }

    /// Whether the output depends on the random generator. EBS only does
    /// when no modulation matrix is supplied.
    pub fn uses_rng(self) -> bool {
        matches!(
            self,
            Algorithm::Random | Algorithm::Ditherpunk | Algorithm::EvenBetterScreening
        )
    }

    /// Whether the output is guaranteed to be pure black and white.
    pub fn is_binary(self) -> bool {
        !matches!(self, Algorithm::Grayscale | Algorithm::Custom)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = DitherError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim().replace('-', "_").to_ascii_uppercase();
        Algorithm::ALL
            .into_iter()
            .find(|a| a.as_str() == tag)
            .ok_or_else(|| DitherError::UnknownAlgorithm(s.to_string()))
    }
}

impl TryFrom<String> for Algorithm {
    type Error = DitherError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Algorithm> for String {
    fn from(value: Algorithm) -> Self {
        value.as_str().to_string()
    }
}
