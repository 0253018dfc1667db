//! Run configuration: defaults, JSON file, environment, then flags.

pub mod validation;

use std::path::Path;

use anyhow::Context;
use dither_engine::options::DEFAULT_SCREENING_SIZE;
use dither_engine::{Algorithm, DitherOptions};
use raster_printer::EscPosRaster;
use raster_printer::protocol::escpos::{DEFAULT_BLOCK_HEIGHT, DEFAULT_FEED_LINES};
use serde::{Deserialize, Serialize};

use crate::args::Args;
use validation::validate_setting;

/// Environment variables consulted by [`DitherConfig::apply_env`].
pub const ENV_KEYS: [&str; 6] = [
    "DITHER_ALGORITHM",
    "DITHER_SERPENTINE",
    "DITHER_SCREENING_SIZE",
    "DITHER_SEED",
    "DITHER_BLOCK_HEIGHT",
    "DITHER_FEED_LINES",
];

/// Settings for one run of the binary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DitherConfig {
    pub algorithm: Algorithm,
    pub serpentine: bool,
    pub screening_size: usize,
    pub seed: Option<u64>,
    pub block_height: u32,
    pub feed_lines: u8,
}

impl Default for DitherConfig {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::FloydSteinberg,
            serpentine: false,
            screening_size: DEFAULT_SCREENING_SIZE,
            seed: None,
            block_height: DEFAULT_BLOCK_HEIGHT,
            feed_lines: DEFAULT_FEED_LINES,
        }
    }
}

impl DitherConfig {
    /// Resolve the configuration for `args`, reading the process environment.
    pub fn load(args: &Args) -> Result<Self, anyhow::Error> {
        let mut config = match &args.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok());
        config.apply_args(args);
        Ok(config)
    }

    /// Read a JSON config file. Missing keys keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, anyhow::Error> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config: Self = serde_json::from_str(&text)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        tracing::info!("Loaded config from: {}", path.display());
        Ok(config)
    }

    /// Apply `DITHER_*` overrides. Values that fail validation are skipped
    /// with a warning.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        for key in ENV_KEYS {
            let Some(value) = lookup(key) else {
                continue;
            };
            let value = value.trim();
            if let Err(e) = validate_setting(key, value) {
                tracing::warn!(key, value, "Ignoring invalid environment override: {e}");
                continue;
            }
            match key {
                "DITHER_ALGORITHM" => {
                    if let Ok(a) = value.parse() {
                        self.algorithm = a;
                    }
                }
                "DITHER_SERPENTINE" => self.serpentine = value == "true",
                "DITHER_SCREENING_SIZE" => {
                    if let Ok(n) = value.parse() {
                        self.screening_size = n;
                    }
                }
                "DITHER_SEED" => {
                    if let Ok(s) = value.parse() {
                        self.seed = Some(s);
                    }
                }
                "DITHER_BLOCK_HEIGHT" => {
                    if let Ok(h) = value.parse() {
                        self.block_height = h;
                    }
                }
                "DITHER_FEED_LINES" => {
                    if let Ok(n) = value.parse() {
                        self.feed_lines = n;
                    }
                }
                _ => {}
            }
        }
    }

    /// Apply explicit command-line flags.
    pub fn apply_args(&mut self, args: &Args) {
        if let Some(a) = args.algorithm {
            self.algorithm = a;
        }
        if let Some(on) = args.serpentine {
            self.serpentine = on;
        }
        if let Some(n) = args.screening_size {
            self.screening_size = n;
        }
        if let Some(s) = args.seed {
            self.seed = Some(s);
        }
        if let Some(h) = args.block_height {
            self.block_height = h;
        }
    }

    pub fn dither_options(&self) -> DitherOptions {
        let options = DitherOptions::new()
            .with_serpentine(self.serpentine)
            .with_screening_size(self.screening_size);
        match self.seed {
            Some(seed) => options.with_seed(seed),
            None => options,
        }
    }

    pub fn raster_protocol(&self) -> Result<EscPosRaster, anyhow::Error> {
        let raster = EscPosRaster::new()
            .with_block_height(self.block_height)?
            .with_feed_lines(self.feed_lines);
        Ok(raster)
    }
}
