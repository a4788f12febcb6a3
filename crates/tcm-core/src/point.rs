//! Slot coordinates.

use std::fmt;

/// A slot coordinate inside a container.
///
/// `x` grows to the right and `y` grows downward, so `(0, 0)` is the
/// top-left slot. Both axes are bounded by the container's width and height;
/// a `Point` by itself carries no bounds and is validated where it is used.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Point {
    /// Column.
    pub x: u16,
    /// Row.
    pub y: u16,
}

impl Point {
    /// Create a point at column `x`, row `y`.
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }

    /// Row-major flattened index of this point in a grid `width` slots wide.
    ///
    /// # Examples
    ///
    /// ```
    /// use tcm_core::Point;
    ///
    /// assert_eq!(Point::new(3, 2).flat(10), 23);
    /// ```
    pub fn flat(self, width: u16) -> u32 {
        u32::from(self.x) + u32::from(self.y) * u32::from(width)
    }

    /// Inverse of [`flat`](Self::flat).
    ///
    /// `width` must be non-zero and `index / width` must fit in a `u16`;
    /// both hold for any index inside a container of that width.
    pub fn from_flat(index: u32, width: u16) -> Self {
        let w = u32::from(width);
        Self {
            x: (index % w) as u16,
            y: (index / w) as u16,
        }
    }

    /// Whether this point lies inside a `width` x `height` grid.
    pub fn is_within(self, width: u16, height: u16) -> bool {
        self.x < width && self.y < height
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(u16, u16)> for Point {
    fn from((x, y): (u16, u16)) -> Self {
        Self { x, y }
    }
}
