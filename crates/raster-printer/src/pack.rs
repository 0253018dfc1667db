//! 1-bit row packing.

use dither_engine::Image;
use dither_engine::buffer::CHANNELS;

/// True when an RGBA pixel should be printed: black red channel, non-zero alpha.
#[inline]
pub fn is_ink(px: &[u8]) -> bool {
    px[0] == 0 && px[3] != 0
}

/// Pack one RGBA row into bytes of 8 pixels, bit 7 = leftmost pixel.
///
/// A trailing partial group is padded with non-ink bits.
pub fn pack_row(row_rgba: &[u8]) -> Vec<u8> {
    row_rgba
        .chunks(CHANNELS * 8)
        .map(|group| {
            let mut byte_val: u8 = 0;
            for (i, px) in group.chunks_exact(CHANNELS).enumerate() {
                if is_ink(px) {
                    byte_val |= 1 << (7 - i);
                }
            }
            byte_val
        })
        .collect()
}

/// Row-major packed bitmap, `width_bytes` bytes per row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedBitmap {
    width: u32,
    width_bytes: usize,
    height: u32,
    data: Vec<u8>,
}

impl PackedBitmap {
    /// Pack every row of a dithered image.
    pub fn from_image(img: &Image<'_>) -> Self {
        let (width, height) = img.dimensions();
        let width_bytes = (width as usize).div_ceil(8);
        let mut data = Vec::with_capacity(width_bytes * height as usize);
        for y in 0..height {
            data.extend(pack_row(img.row(y)));
        }
        Self {
            width,
            width_bytes,
            height,
            data,
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn width_bytes(&self) -> usize {
        self.width_bytes
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Packed rows, top to bottom.
    pub fn rows(&self) -> std::slice::ChunksExact<'_, u8> {
        self.data.chunks_exact(self.width_bytes)
    }

    /// Packed bytes of rows `first_row..first_row + rows`, or `None` if the
    /// range runs past the last row.
    pub fn row_range(&self, first_row: u32, rows: u32) -> Option<&[u8]> {
        let end_row = first_row.checked_add(rows)?;
        if end_row > self.height {
            return None;
        }
        let start = first_row as usize * self.width_bytes;
        let end = end_row as usize * self.width_bytes;
        Some(&self.data[start..end])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INK: [u8; 4] = [0, 0, 0, 255];
    const PAPER: [u8; 4] = [255, 255, 255, 255];

    fn row(pixels: &[[u8; 4]]) -> Vec<u8> {
        pixels.iter().flatten().copied().collect()
    }

    #[test]
    fn test_pack_msb_is_leftmost() {
        let r = row(&[INK, PAPER, PAPER, PAPER, PAPER, PAPER, PAPER, INK]);
        assert_eq!(pack_row(&r), vec![0b1000_0001]);
    }

    #[test]
    fn test_pack_pads_partial_group() {
        let r = row(&[INK, INK, INK, INK, INK, INK, INK, INK, PAPER, INK, INK]);
        assert_eq!(pack_row(&r), vec![0xFF, 0b0110_0000]);
    }

    #[test]
    fn test_transparent_black_is_not_ink() {
        let r = row(&[[0, 0, 0, 0], [0, 0, 0, 1]]);
        assert_eq!(pack_row(&r), vec![0b0100_0000]);
    }

    #[test]
    fn test_empty_row() {
        assert!(pack_row(&[]).is_empty());
    }

    #[test]
    fn test_bitmap_from_image() {
        // 10x2: first row all ink, second row ink only at x = 9.
        let mut data: Vec<u8> = Vec::new();
        for _ in 0..10 {
            data.extend(INK);
        }
        for x in 0..10 {
            data.extend(if x == 9 { INK } else { PAPER });
        }
        let img = Image::new(10, 2, &mut data).unwrap();
        let bitmap = PackedBitmap::from_image(&img);

        assert_eq!(bitmap.width(), 10);
        assert_eq!(bitmap.width_bytes(), 2);
        assert_eq!(bitmap.height(), 2);
        assert_eq!(bitmap.data(), &[0xFF, 0b1100_0000, 0x00, 0b0100_0000]);

        let rows: Vec<&[u8]> = bitmap.rows().collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1], &[0x00, 0b0100_0000]);
        assert_eq!(bitmap.row_range(1, 1), Some(rows[1]));
    }

    #[test]
    fn test_row_range_out_of_bounds() {
        let mut data = INK.to_vec();
        let img = Image::new(1, 1, &mut data).unwrap();
        let bitmap = PackedBitmap::from_image(&img);
        assert_eq!(bitmap.row_range(0, 1), Some(&[0x80u8][..]));
        assert!(bitmap.row_range(1, 1).is_none());
        assert!(bitmap.row_range(u32::MAX, 2).is_none());
    }
}
