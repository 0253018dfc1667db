//! Error-diffusion kernel tables.
//!
//! Each entry is `(dx, dy, weight)`. A target at `(x + dx, y + dy)` receives
//! `error * weight / divisor`. `dx` is negated on right-to-left rows when
//! serpentine scanning is enabled; `dy` is never negative.

/// A diffusion kernel and its normalizing divisor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Kernel {
    pub entries: &'static [(i32, i32, u8)],
    pub divisor: u8,
}

impl Kernel {
    /// Sum of all weights. Equal to `divisor` when the kernel propagates
    /// the full quantization error.
    pub fn weight_sum(&self) -> u32 {
        self.entries.iter().map(|&(_, _, w)| u32::from(w)).sum()
    }
}

/// ```text
///        X   7
///    3   5   1      / 16
/// ```
pub const FLOYD_STEINBERG: Kernel = Kernel {
    entries: &[(1, 0, 7), (-1, 1, 3), (0, 1, 5), (1, 1, 1)],
    divisor: 16,
};

/// Propagates 6/8 of the error; the lost quarter keeps highlights and
/// shadows clean.
///
/// ```text
///        X   1   1
///    1   1   1
///        1          / 8
/// ```
pub const ATKINSON: Kernel = Kernel {
    entries: &[(1, 0, 1), (2, 0, 1), (-1, 1, 1), (0, 1, 1), (1, 1, 1), (0, 2, 1)],
    divisor: 8,
};

/// ```text
///            X   8   4
///    2   4   8   4   2      / 32
/// ```
pub const BURKES: Kernel = Kernel {
    entries: &[
        (1, 0, 8),
        (2, 0, 4),
        (-2, 1, 2),
        (-1, 1, 4),
        (0, 1, 8),
        (1, 1, 4),
        (2, 1, 2),
    ],
    divisor: 32,
};

/// Horizontal-only diffusion.
pub const DIFFUSION_ROW: Kernel = Kernel {
    entries: &[(1, 0, 1), (2, 0, 1)],
    divisor: 2,
};

/// Vertical-only diffusion.
pub const DIFFUSION_COLUMN: Kernel = Kernel {
    entries: &[(0, 1, 1), (0, 2, 1)],
    divisor: 2,
};

/// ```text
///        X   3
///    2   3   2      / 10
/// ```
pub const DIFFUSION_2D: Kernel = Kernel {
    entries: &[(1, 0, 3), (-1, 1, 2), (0, 1, 3), (1, 1, 2)],
    divisor: 10,
};

/// ```text
///            X   7   5
///    3   5   7   5   3
///    1   3   5   3   1      / 48
/// ```
pub const JARVIS_JUDICE_NINKE: Kernel = Kernel {
    entries: &[
        (1, 0, 7),
        (2, 0, 5),
        (-2, 1, 3),
        (-1, 1, 5),
        (0, 1, 7),
        (1, 1, 5),
        (2, 1, 3),
        (-2, 2, 1),
        (-1, 2, 3),
        (0, 2, 5),
        (1, 2, 3),
        (2, 2, 1),
    ],
    divisor: 48,
};

/// ```text
///            X   4   3
///    1   2   3   2   1
///        1   2   1          / 12
/// ```
pub const SIERRA2: Kernel = Kernel {
    entries: &[
        (1, 0, 4),
        (2, 0, 3),
        (-2, 1, 1),
        (-1, 1, 2),
        (0, 1, 3),
        (1, 1, 2),
        (2, 1, 1),
        (-1, 2, 1),
        (0, 2, 2),
        (1, 2, 1),
    ],
    divisor: 12,
};

/// ```text
///            X   8   4
///    2   4   8   4   2
///    1   2   4   2   1      / 42
/// ```
pub const STUCKI: Kernel = Kernel {
    entries: &[
        (1, 0, 8),
        (2, 0, 4),
        (-2, 1, 2),
        (-1, 1, 4),
        (0, 1, 8),
        (1, 1, 4),
        (2, 1, 2),
        (-2, 2, 1),
        (-1, 2, 2),
        (0, 2, 4),
        (1, 2, 2),
        (2, 2, 1),
    ],
    divisor: 42,
};
