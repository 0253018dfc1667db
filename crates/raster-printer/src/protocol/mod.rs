//! Raster command framing.
//!
//! A protocol turns a [`PackedBitmap`] into the byte stream a printer
//! expects: an init sequence, the image split into blocks no taller than the
//! device accepts, and a finish sequence.

pub mod escpos;

pub use escpos::EscPosRaster;

use tracing::debug;

use crate::{PackedBitmap, Result};

/// Interface for raster printer command sets.
pub trait RasterProtocol: Send + Sync {
    /// Human-readable protocol name (e.g. "ESC/POS").
    fn name(&self) -> &str;

    /// Maximum number of rows a single block command may carry.
    fn max_block_height(&self) -> u32;

    /// Commands sent before the first block.
    fn build_init_sequence(&self) -> Vec<Vec<u8>>;

    /// One block command covering `rows` rows starting at `first_row`.
    fn build_block(&self, bitmap: &PackedBitmap, first_row: u32, rows: u32) -> Result<Vec<u8>>;

    /// Commands sent after the last block.
    fn build_finish_sequence(&self) -> Vec<Vec<u8>>;

    /// Frame a whole bitmap: init, blocks top to bottom, finish.
    fn frame(&self, bitmap: &PackedBitmap) -> Result<Vec<u8>> {
        let block_height = self.max_block_height().max(1);
        let mut out: Vec<u8> = self.build_init_sequence().concat();

        let mut first_row = 0;
        let mut blocks = 0usize;
        while first_row < bitmap.height() {
            let rows = block_height.min(bitmap.height() - first_row);
            out.extend(self.build_block(bitmap, first_row, rows)?);
            first_row += rows;
            blocks += 1;
        }

        out.extend(self.build_finish_sequence().concat());

        debug!(
            protocol = self.name(),
            width_bytes = bitmap.width_bytes(),
            height = bitmap.height(),
            blocks,
            bytes = out.len(),
            "Framed raster bitmap"
        );
        Ok(out)
    }
}
