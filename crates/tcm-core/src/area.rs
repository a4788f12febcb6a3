//! Area descriptors: reserved rectangles and linear runs.
//!
//! An [`Area`] is a plain value. The container copies it into every slot the
//! area covers, so a slot never points back into registry storage and a
//! freed area cannot leave dangling owners behind.

use std::fmt;

use crate::error::TcmError;
use crate::point::Point;

/// Shape of an [`Area`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AreaKind {
    /// A 2D rectangle.
    Rect,
    /// A 1D run of slots in row-major order.
    Linear,
}

/// A reserved region of a container.
///
/// - `Rect` holds inclusive corners with `p0.x <= p1.x` and `p0.y <= p1.y`.
/// - `Linear` holds the first and last slot of a run in row-major order;
///   the run wraps from the end of one row to the start of the next, so
///   `start.x` may exceed `end.x` when the run spans rows.
///
/// # Examples
///
/// ```
/// use tcm_core::{Area, Point};
///
/// let run = Area::linear(Point::new(2, 0), Point::new(1, 1)).unwrap();
/// // In a 4-wide grid: (2,0) (3,0) (0,1) (1,1).
/// assert_eq!(run.slot_count(4), 4);
/// assert!(run.contains(Point::new(0, 1), 4));
/// assert!(!run.contains(Point::new(1, 0), 4));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Area {
    /// 2D rectangle with inclusive corners.
    Rect {
        /// Top-left corner.
        p0: Point,
        /// Bottom-right corner.
        p1: Point,
    },
    /// 1D run with inclusive row-major endpoints.
    Linear {
        /// First slot of the run.
        start: Point,
        /// Last slot of the run.
        end: Point,
    },
}

impl Area {
    /// Build a rectangle, rejecting inverted corners.
    pub fn rect(p0: Point, p1: Point) -> Result<Self, TcmError> {
        if p0.x > p1.x || p0.y > p1.y {
            return Err(TcmError::invalid_argument(format!(
                "rectangle corners inverted: {p0} > {p1}"
            )));
        }
        Ok(Self::Rect { p0, p1 })
    }

    /// Build a run, rejecting an end that precedes the start in row-major order.
    pub fn linear(start: Point, end: Point) -> Result<Self, TcmError> {
        if (start.y, start.x) > (end.y, end.x) {
            return Err(TcmError::invalid_argument(format!(
                "run end {end} precedes start {start}"
            )));
        }
        Ok(Self::Linear { start, end })
    }

    /// Rectangle of `width` x `height` slots anchored at `anchor`.
    ///
    /// Both dimensions must be non-zero and the far corner must fit in a
    /// `u16`; scanners only produce anchors for which this holds.
    pub fn footprint(anchor: Point, width: u16, height: u16) -> Self {
        Self::Rect {
            p0: anchor,
            p1: Point::new(anchor.x + (width - 1), anchor.y + (height - 1)),
        }
    }

    /// The area's shape.
    pub fn kind(&self) -> AreaKind {
        match self {
            Self::Rect { .. } => AreaKind::Rect,
            Self::Linear { .. } => AreaKind::Linear,
        }
    }

    /// Whether this is a 2D rectangle.
    pub fn is_2d(&self) -> bool {
        matches!(self, Self::Rect { .. })
    }

    /// Top-left corner of a rectangle, or first slot of a run.
    pub fn start(&self) -> Point {
        match *self {
            Self::Rect { p0, .. } => p0,
            Self::Linear { start, .. } => start,
        }
    }

    /// Bottom-right corner of a rectangle, or last slot of a run.
    pub fn end(&self) -> Point {
        match *self {
            Self::Rect { p1, .. } => p1,
            Self::Linear { end, .. } => end,
        }
    }

    /// Number of slots covered, in a container `grid_width` slots wide.
    pub fn slot_count(&self, grid_width: u16) -> u32 {
        match *self {
            Self::Rect { p0, p1 } => {
                u32::from(p1.x - p0.x + 1) * u32::from(p1.y - p0.y + 1)
            }
            Self::Linear { start, end } => end.flat(grid_width) - start.flat(grid_width) + 1,
        }
    }

    /// Whether `point` is one of this area's slots.
    pub fn contains(&self, point: Point, grid_width: u16) -> bool {
        match *self {
            Self::Rect { p0, p1 } => {
                (p0.x..=p1.x).contains(&point.x) && (p0.y..=p1.y).contains(&point.y)
            }
            Self::Linear { start, end } => {
                point.x < grid_width
                    && (start.flat(grid_width)..=end.flat(grid_width))
                        .contains(&point.flat(grid_width))
            }
        }
    }

    /// Whether every slot of this area lies inside a `width` x `height` grid.
    pub fn fits(&self, width: u16, height: u16) -> bool {
        self.start().is_within(width, height) && self.end().is_within(width, height)
    }

    /// Split this area into rectangles.
    ///
    /// A rectangle yields itself. A run yields at most three rectangles:
    /// the partial first row, the block of full rows, and the partial last
    /// row, in row-major order.
    pub fn slices(&self, grid_width: u16) -> Slices {
        Slices {
            remaining: Some(*self),
            grid_width,
        }
    }
}

impl fmt::Display for Area {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rect { p0, p1 } => write!(f, "2D {p0}-{p1}"),
            Self::Linear { start, end } => write!(f, "1D {start}-{end}"),
        }
    }
}

/// Iterator over the rectangular slices of an [`Area`].
///
/// Created by [`Area::slices`].
#[derive(Clone, Debug)]
pub struct Slices {
    remaining: Option<Area>,
    grid_width: u16,
}

impl Iterator for Slices {
    type Item = Area;

    fn next(&mut self) -> Option<Area> {
        let area = self.remaining.take()?;
        let (start, end) = match area {
            Area::Rect { .. } => return Some(area),
            Area::Linear { start, end } => (start, end),
        };
        let last_col = self.grid_width - 1;
        if start.y == end.y || (start.x == 0 && end.x == last_col) {
            return Some(Area::Rect { p0: start, p1: end });
        }
        // Peel the leading partial row, or the full rows before a partial last row.
        let cut_row = if start.x > 0 { start.y } else { end.y - 1 };
        let slice = Area::Rect {
            p0: start,
            p1: Point::new(last_col, cut_row),
        };
        self.remaining = Some(Area::Linear {
            start: Point::new(0, cut_row + 1),
            end,
        });
        Some(slice)
    }
}
