// src/map/kernel.rs

/// A 3x3 neighbour weight matrix, indexed as `weights[dx + 1][dy + 1]`.
///
/// The centre weight is always zero so a cell never counts itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Kernel {
    weights: [[i32; 3]; 3],
}

impl Kernel {
    /// Builds a kernel from raw weights. The centre entry is forced to zero.
    pub fn new(mut weights: [[i32; 3]; 3]) -> Self {
        weights[1][1] = 0;
        Kernel { weights }
    }

    /// The classic 8-neighbour majority kernel: all ones around a zero centre.
    pub const fn moore() -> Self {
        Kernel {
            weights: [[1, 1, 1], [1, 0, 1], [1, 1, 1]],
        }
    }

    /// Weight for the neighbour at offset `(dx, dy)`, both in `-1..=1`.
    pub fn weight(&self, dx: isize, dy: isize) -> i32 {
        self.weights[(dx + 1) as usize][(dy + 1) as usize]
    }
}

impl Default for Kernel {
    fn default() -> Self {
        Kernel::moore()
    }
}
