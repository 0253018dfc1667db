//! Ordered quantizers: the fixed 4x4 Bayer matrix and generated even-toned
//! rank matrices. Both tile the image and carry no error between pixels.

use std::collections::HashMap;
use std::sync::{Arc, LazyLock, Mutex};

use tracing::debug;

use crate::Image;

/// 4x4 Bayer rank matrix.
pub const BAYER_4X4: [[u8; 4]; 4] = [[0, 8, 2, 10], [12, 4, 14, 6], [3, 11, 1, 9], [15, 7, 13, 5]];

/// Bayer threshold for pixel `(x, y)`: `(rank + 0.5) * 255 / 16`.
#[inline]
pub fn bayer_threshold(x: u32, y: u32) -> f32 {
    let rank = BAYER_4X4[(y % 4) as usize][(x % 4) as usize];
    (f32::from(rank) + 0.5) * 255.0 / 16.0
}

/// Binarize a grayscale image against the tiled Bayer matrix.
pub fn apply_bayer(img: &mut Image<'_>) {
    let (width, height) = img.dimensions();
    debug!(width, height, "Applying 4x4 Bayer ordered dither");

    for y in 0..height {
        for x in 0..width {
            let v = if f32::from(img.luma(x, y)) < bayer_threshold(x, y) {
                0
            } else {
                255
            };
            img.set_luma(x, y, v);
        }
    }
}

/// N x N rank matrix holding every value in `0..N*N` exactly once.
///
/// Ranks grow with distance from the matrix centre, so low thresholds sit in
/// the middle of each tile and dots grow outward as tone darkens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreeningMatrix {
    size: usize,
    ranks: Vec<u32>,
}

impl ScreeningMatrix {
    /// Build the even-toned rank matrix of edge `size`.
    ///
    /// Cells are stable-sorted by Euclidean distance to `((N-1)/2, (N-1)/2)`;
    /// ties keep row-major order.
    pub fn even_toned(size: usize) -> Self {
        let center = (size as f64 - 1.0) / 2.0;

        let mut cells: Vec<(usize, f64)> = (0..size * size)
            .map(|idx| {
                let (i, j) = (idx / size, idx % size);
                let di = i as f64 - center;
                let dj = j as f64 - center;
                (idx, (di * di + dj * dj).sqrt())
            })
            .collect();
        cells.sort_by(|a, b| a.1.total_cmp(&b.1));

        let mut ranks = vec![0u32; size * size];
        for (rank, &(idx, _)) in cells.iter().enumerate() {
            ranks[idx] = rank as u32;
        }

        Self { size, ranks }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Rank at row `i`, column `j`.
    #[inline]
    pub fn rank(&self, i: usize, j: usize) -> u32 {
        self.ranks[i * self.size + j]
    }

    /// Threshold for pixel `(x, y)`: `(rank + 0.5) * 255 / (N*N - 1)`.
    ///
    /// The highest-ranked cell lands just above 255, so it is black even
    /// on a pure white input.
    #[inline]
    pub fn threshold(&self, x: u32, y: u32) -> f32 {
        let n = self.size;
        let rank = self.rank(y as usize % n, x as usize % n);
        (rank as f32 + 0.5) * 255.0 / (n * n - 1) as f32
    }
}

static MATRIX_CACHE: LazyLock<Mutex<HashMap<usize, Arc<ScreeningMatrix>>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));

/// Even-toned matrix of edge `size`, built once per size and shared.
///
/// Entries are never evicted. Dispatch only reaches this with sizes that
/// passed [`DitherOptions::validate`](crate::DitherOptions::validate), so the
/// cache holds at most 63 matrices of up to 64x64 ranks.
pub fn even_toned_matrix(size: usize) -> Arc<ScreeningMatrix> {
    let mut cache = match MATRIX_CACHE.lock() {
        Ok(guard) => guard,
        // Entries are immutable once inserted, so a poisoned map is still valid.
        Err(poisoned) => poisoned.into_inner(),
    };
    cache
        .entry(size)
        .or_insert_with(|| {
            debug!(size, "Building even-toned screening matrix");
            Arc::new(ScreeningMatrix::even_toned(size))
        })
        .clone()
}

/// Binarize a grayscale image against a tiled screening matrix.
pub fn apply_screening(img: &mut Image<'_>, matrix: &ScreeningMatrix) {
    let (width, height) = img.dimensions();
    debug!(
        width,
        height,
        size = matrix.size(),
        "Applying even-toned screening"
    );

    for y in 0..height {
        for x in 0..width {
            let v = if f32::from(img.luma(x, y)) < matrix.threshold(x, y) {
                0
            } else {
                255
            };
            img.set_luma(x, y, v);
        }
    }
}
