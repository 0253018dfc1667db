//! Bit packing and raster command framing for 1-bit thermal printers.
//!
//! Turns a dithered RGBA image into packed rows (8 pixels per byte, MSB =
//! leftmost) and frames them into a printer command stream split into
//! blocks no taller than the device allows.

pub mod pack;
pub mod protocol;

// Re-exports for convenience
pub use pack::{PackedBitmap, is_ink, pack_row};
pub use protocol::{EscPosRaster, RasterProtocol};

/// Errors that can occur while building raster output.
#[derive(Debug, thiserror::Error)]
pub enum RasterError {
    #[error("Invalid block height: {0} (expected 1..={max})", max = protocol::escpos::MAX_BLOCK_HEIGHT)]
    InvalidBlockHeight(u32),

    #[error("Row too wide for raster command: {0} bytes")]
    WidthTooLarge(usize),

    #[error("Rows {first_row}+{rows} out of range for bitmap height {height}")]
    RowRange { first_row: u32, rows: u32, height: u32 },
}

/// Result type alias for raster operations.
pub type Result<T> = std::result::Result<T, RasterError>;
