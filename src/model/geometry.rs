use serde::{Deserialize, Serialize};

/// Width and height of a pixel buffer. Zero-sized dimensions describe the
/// state before any image has been loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: usize,
    pub height: usize,
}

impl Dimensions {
    pub const EMPTY: Self = Self {
        width: 0,
        height: 0,
    };

    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Saturates instead of overflowing on absurd sizes from the wire.
    pub fn sample_count(&self) -> usize {
        self.width.saturating_mul(self.height)
    }

    pub fn is_square(&self) -> bool {
        self.width == self.height
    }

    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && (x as u64) < self.width as u64 && (y as u64) < self.height as u64
    }

    /// True when either axis is smaller than in `previous`.
    pub fn shrinks_from(&self, previous: Dimensions) -> bool {
        self.width < previous.width || self.height < previous.height
    }
}

/// A position in some buffer's pixel space. Kept fractional until the
/// inspector floors it to a pixel index.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn pixel(&self) -> (i64, i64) {
        (self.x.floor() as i64, self.y.floor() as i64)
    }
}
