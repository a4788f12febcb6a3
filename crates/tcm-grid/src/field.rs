//! Directed search fields.

use tcm_core::{Point, TcmError};

use crate::order::ScanOrder;
use crate::slot_map::{check_bounds, SlotMap};

/// A rectangular sub-region of the grid together with the corner a scan
/// starts from.
///
/// `origin` is the first slot visited and `far` the opposite corner. The
/// corners are not normalised: for a right-to-left scan `origin.x >= far.x`.
/// Nearness factors are measured from `origin`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ScanField {
    /// Corner the scan starts from.
    pub origin: Point,
    /// Opposite corner.
    pub far: Point,
}

impl ScanField {
    /// Field with explicit corners.
    pub const fn new(origin: Point, far: Point) -> Self {
        Self { origin, far }
    }

    /// Field over the inclusive box `top_left..=bottom_right`, with its origin
    /// at the corner `order` starts from.
    pub fn oriented(top_left: Point, bottom_right: Point, order: ScanOrder) -> Self {
        let (ox, fx) = if order.is_leftward() {
            (bottom_right.x, top_left.x)
        } else {
            (top_left.x, bottom_right.x)
        };
        let (oy, fy) = if order.is_upward() {
            (bottom_right.y, top_left.y)
        } else {
            (top_left.y, bottom_right.y)
        };
        Self::new(Point::new(ox, oy), Point::new(fx, fy))
    }

    /// Field covering a whole `width` x `height` grid for `order`.
    ///
    /// Both dimensions must be non-zero.
    pub fn whole(width: u16, height: u16, order: ScanOrder) -> Self {
        Self::oriented(Point::new(0, 0), Point::new(width - 1, height - 1), order)
    }

    /// Number of columns spanned.
    pub fn columns(&self) -> u16 {
        self.origin.x.abs_diff(self.far.x) + 1
    }

    /// Number of rows spanned.
    pub fn rows(&self) -> u16 {
        self.origin.y.abs_diff(self.far.y) + 1
    }

    /// Top-left corner of the box.
    pub fn top_left(&self) -> Point {
        Point::new(self.origin.x.min(self.far.x), self.origin.y.min(self.far.y))
    }

    /// Bottom-right corner of the box.
    pub fn bottom_right(&self) -> Point {
        Point::new(self.origin.x.max(self.far.x), self.origin.y.max(self.far.y))
    }

    /// Whether this field spans the whole of `map`.
    pub fn covers(&self, map: &SlotMap) -> bool {
        self.columns() == map.width() && self.rows() == map.height()
    }

    /// Check the field lies inside `map` and is directed the way `order` walks.
    pub(crate) fn check(&self, map: &SlotMap, order: ScanOrder) -> Result<(), TcmError> {
        check_bounds(self.origin, map.width(), map.height())?;
        check_bounds(self.far, map.width(), map.height())?;
        let leftward_ok = if order.is_leftward() {
            self.origin.x >= self.far.x
        } else {
            self.origin.x <= self.far.x
        };
        let upward_ok = if order.is_upward() {
            self.origin.y >= self.far.y
        } else {
            self.origin.y <= self.far.y
        };
        if !leftward_ok || !upward_ok {
            return Err(TcmError::invalid_argument(format!(
                "field {}-{} not directed for {order:?}",
                self.origin, self.far
            )));
        }
        Ok(())
    }
}
