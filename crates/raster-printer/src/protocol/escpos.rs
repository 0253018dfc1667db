//! ESC/POS `GS v 0` raster bit image.
//!
//! Block layout: `1D 76 30 m xL xH yL yH` followed by `xL + xH*256` bytes per
//! row for `yL + yH*256` rows.

use super::RasterProtocol;
use crate::{PackedBitmap, RasterError, Result};

/// `ESC @`: reset the printer.
const CMD_INIT: [u8; 2] = [0x1B, 0x40];
/// `GS v 0`: print raster bit image.
const CMD_RASTER: [u8; 3] = [0x1D, 0x76, 0x30];
/// `ESC d n`: print and feed `n` lines.
const CMD_FEED: [u8; 2] = [0x1B, 0x64];

/// Normal density, no scaling.
const MODE_NORMAL: u8 = 0;

/// Largest block height the command set accepts.
pub const MAX_BLOCK_HEIGHT: u32 = 2303;

pub const DEFAULT_BLOCK_HEIGHT: u32 = 255;
pub const DEFAULT_FEED_LINES: u8 = 4;

#[derive(Debug, Clone)]
pub struct EscPosRaster {
    block_height: u32,
    feed_lines: u8,
}

impl Default for EscPosRaster {
    fn default() -> Self {
        Self {
            block_height: DEFAULT_BLOCK_HEIGHT,
            feed_lines: DEFAULT_FEED_LINES,
        }
    }
}

impl EscPosRaster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the rows per block. Fails outside `1..=2303`.
    pub fn with_block_height(mut self, block_height: u32) -> Result<Self> {
        if !(1..=MAX_BLOCK_HEIGHT).contains(&block_height) {
            return Err(RasterError::InvalidBlockHeight(block_height));
        }
        self.block_height = block_height;
        Ok(self)
    }

    /// Lines fed after the image. Zero skips the feed command.
    pub fn with_feed_lines(mut self, feed_lines: u8) -> Self {
        self.feed_lines = feed_lines;
        self
    }

    pub fn block_height(&self) -> u32 {
        self.block_height
    }

    pub fn feed_lines(&self) -> u8 {
        self.feed_lines
    }
}

impl RasterProtocol for EscPosRaster {
    fn name(&self) -> &str {
        "ESC/POS"
    }

    fn max_block_height(&self) -> u32 {
        self.block_height
    }

    fn build_init_sequence(&self) -> Vec<Vec<u8>> {
        vec![CMD_INIT.to_vec()]
    }

    fn build_block(&self, bitmap: &PackedBitmap, first_row: u32, rows: u32) -> Result<Vec<u8>> {
        let width_bytes = u16::try_from(bitmap.width_bytes())
            .map_err(|_| RasterError::WidthTooLarge(bitmap.width_bytes()))?;
        if rows == 0 || rows > self.block_height {
            return Err(RasterError::InvalidBlockHeight(rows));
        }
        let data = bitmap
            .row_range(first_row, rows)
            .ok_or(RasterError::RowRange {
                first_row,
                rows,
                height: bitmap.height(),
            })?;

        let [x_lo, x_hi] = width_bytes.to_le_bytes();
        let [y_lo, y_hi] = (rows as u16).to_le_bytes();

        let mut cmd = Vec::with_capacity(CMD_RASTER.len() + 5 + data.len());
        cmd.extend_from_slice(&CMD_RASTER);
        cmd.extend_from_slice(&[MODE_NORMAL, x_lo, x_hi, y_lo, y_hi]);
        cmd.extend_from_slice(data);
        Ok(cmd)
    }

    fn build_finish_sequence(&self) -> Vec<Vec<u8>> {
        if self.feed_lines == 0 {
            return Vec::new();
        }
        vec![vec![CMD_FEED[0], CMD_FEED[1], self.feed_lines]]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dither_engine::Image;

    fn bitmap(width: u32, height: u32) -> PackedBitmap {
        // Ink on every pixel of even rows.
        let mut data: Vec<u8> = (0..height)
            .flat_map(|y| {
                let v = if y % 2 == 0 { 0 } else { 255 };
                (0..width).flat_map(move |_| [v, v, v, 255])
            })
            .collect();
        let img = Image::new(width, height, &mut data).unwrap();
        PackedBitmap::from_image(&img)
    }

    #[test]
    fn test_block_header() {
        let raster = EscPosRaster::new();
        let bm = bitmap(16, 3);
        let block = raster.build_block(&bm, 0, 3).unwrap();

        assert_eq!(&block[..8], &[0x1D, 0x76, 0x30, 0x00, 2, 0, 3, 0]);
        assert_eq!(&block[8..], &[0xFF, 0xFF, 0x00, 0x00, 0xFF, 0xFF]);
    }

    #[test]
    fn test_frame_splits_blocks() {
        let raster = EscPosRaster::new()
            .with_block_height(2)
            .unwrap()
            .with_feed_lines(3);
        let bm = bitmap(8, 5);
        let out = raster.frame(&bm).unwrap();

        let mut expected = vec![0x1B, 0x40];
        expected.extend([0x1D, 0x76, 0x30, 0, 1, 0, 2, 0, 0xFF, 0x00]);
        expected.extend([0x1D, 0x76, 0x30, 0, 1, 0, 2, 0, 0xFF, 0x00]);
        expected.extend([0x1D, 0x76, 0x30, 0, 1, 0, 1, 0, 0xFF]);
        expected.extend([0x1B, 0x64, 3]);
        assert_eq!(out, expected);
    }

    #[test]
    fn test_large_height_encodes_little_endian() {
        let raster = EscPosRaster::new().with_block_height(300).unwrap();
        let bm = bitmap(1, 300);
        let block = raster.build_block(&bm, 0, 300).unwrap();
        assert_eq!(&block[6..8], &[0x2C, 0x01]);
        assert_eq!(block.len(), 8 + 300);
    }

    #[test]
    fn test_block_height_bounds() {
        assert!(matches!(
            EscPosRaster::new().with_block_height(0),
            Err(RasterError::InvalidBlockHeight(0))
        ));
        assert!(EscPosRaster::new().with_block_height(2304).is_err());
        assert_eq!(
            EscPosRaster::new()
                .with_block_height(2303)
                .unwrap()
                .block_height(),
            2303
        );
    }

    #[test]
    fn test_block_taller_than_limit_rejected() {
        let raster = EscPosRaster::new().with_block_height(2).unwrap();
        let bm = bitmap(8, 4);
        assert!(matches!(
            raster.build_block(&bm, 0, 3),
            Err(RasterError::InvalidBlockHeight(3))
        ));
    }

    #[test]
    fn test_block_past_last_row_rejected() {
        let raster = EscPosRaster::new();
        let bm = bitmap(8, 4);
        assert!(matches!(
            raster.build_block(&bm, 3, 2),
            Err(RasterError::RowRange {
                first_row: 3,
                rows: 2,
                height: 4
            })
        ));
        assert!(matches!(
            raster.build_block(&bm, u32::MAX, 1),
            Err(RasterError::RowRange { .. })
        ));
        assert!(raster.build_block(&bm, 3, 1).is_ok());
    }

    #[test]
    fn test_zero_feed_skips_finish() {
        let raster = EscPosRaster::new().with_feed_lines(0);
        assert!(raster.build_finish_sequence().is_empty());
        let out = raster.frame(&bitmap(8, 1)).unwrap();
        assert_eq!(out.last(), Some(&0xFF));
    }

    #[test]
    fn test_defaults() {
        let raster = EscPosRaster::default();
        assert_eq!(raster.name(), "ESC/POS");
        assert_eq!(raster.max_block_height(), 255);
        assert_eq!(raster.feed_lines(), 4);
    }
}
