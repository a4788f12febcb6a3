//! Row-major occupancy map of a container.

use tcm_core::{Area, Point, TcmError};

/// Check that `point` lies inside a `width` x `height` grid.
pub(crate) fn check_bounds(point: Point, width: u16, height: u16) -> Result<(), TcmError> {
    if !point.is_within(width, height) {
        return Err(TcmError::invalid_dimension(format!(
            "point {point} outside [0, {width}) x [0, {height})"
        )));
    }
    Ok(())
}

/// A `width` x `height` array of slots.
///
/// Each slot is either free (`None`) or holds a copy of the owning area's
/// descriptor. Storage is one flat `Vec` indexed `x + y * width`, so the
/// cells of a 1D run are one contiguous slice.
///
/// # Examples
///
/// ```
/// use tcm_core::{Area, Point};
/// use tcm_grid::SlotMap;
///
/// let mut map = SlotMap::new(4, 4).unwrap();
/// let area = Area::rect(Point::new(1, 1), Point::new(2, 2)).unwrap();
/// map.fill(&area, Some(area)).unwrap();
///
/// assert_eq!(map.read(Point::new(2, 1)).unwrap(), Some(area));
/// assert_eq!(map.read(Point::new(0, 0)).unwrap(), None);
/// assert_eq!(map.busy_count(), 4);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlotMap {
    width: u16,
    height: u16,
    slots: Vec<Option<Area>>,
}

impl SlotMap {
    /// Create an empty map.
    ///
    /// Returns `InvalidArgument` if either dimension is zero, or
    /// `InvalidDimension` if backing storage for `width * height` slots
    /// cannot be allocated.
    pub fn new(width: u16, height: u16) -> Result<Self, TcmError> {
        if width == 0 || height == 0 {
            return Err(TcmError::invalid_argument(format!(
                "container must have at least one slot, got {width}x{height}"
            )));
        }
        let len = usize::from(width) * usize::from(height);
        let mut slots = Vec::new();
        slots.try_reserve_exact(len).map_err(|_| {
            TcmError::invalid_dimension(format!(
                "slot storage for {width}x{height} could not be allocated"
            ))
        })?;
        slots.resize(len, None);
        Ok(Self {
            width,
            height,
            slots,
        })
    }

    /// Width in slots.
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Height in slots.
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Total number of slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Always returns `false`: construction rejects empty maps.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Owner of the slot at `point`, or `None` if the slot is free.
    ///
    /// Out-of-bounds points are rejected with `InvalidDimension`.
    pub fn read(&self, point: Point) -> Result<Option<Area>, TcmError> {
        check_bounds(point, self.width, self.height)?;
        Ok(self.slots[self.index(point.x, point.y)])
    }

    /// Write `value` into every slot of `area`.
    ///
    /// Rectangles are filled row by row; runs are filled as one contiguous
    /// row-major slice, wrapping across rows. Pass `Some(area)` to mark the
    /// slots busy and `None` to clear them.
    pub fn fill(&mut self, area: &Area, value: Option<Area>) -> Result<(), TcmError> {
        if !area.fits(self.width, self.height) {
            return Err(TcmError::invalid_dimension(format!(
                "{area} outside {}x{} container",
                self.width, self.height
            )));
        }
        match *area {
            Area::Rect { p0, p1 } => {
                for y in p0.y..=p1.y {
                    let row = self.index(p0.x, y)..=self.index(p1.x, y);
                    self.slots[row].fill(value);
                }
            }
            Area::Linear { start, end } => {
                let run = self.index(start.x, start.y)..=self.index(end.x, end.y);
                self.slots[run].fill(value);
            }
        }
        Ok(())
    }

    /// Free every slot.
    pub fn clear(&mut self) {
        self.slots.fill(None);
    }

    /// Number of busy slots.
    pub fn busy_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Iterate over every busy slot and its owner, in row-major order.
    pub fn owners(&self) -> impl Iterator<Item = (Point, &Area)> + '_ {
        self.slots.iter().enumerate().filter_map(move |(i, slot)| {
            slot.as_ref()
                .map(|owner| (Point::from_flat(i as u32, self.width), owner))
        })
    }

    /// Whether the `width` x `height` block anchored at `(x, y)` is entirely free.
    ///
    /// The block must lie inside the map.
    pub fn is_block_free(&self, x: u16, y: u16, width: u16, height: u16) -> bool {
        (y..y + height).all(|row| {
            let start = self.index(x, row);
            self.slots[start..start + usize::from(width)]
                .iter()
                .all(Option::is_none)
        })
    }

    /// Owner of an in-bounds slot. Callers guarantee `x < width`, `y < height`.
    pub(crate) fn owner(&self, x: u16, y: u16) -> Option<&Area> {
        self.slots[self.index(x, y)].as_ref()
    }

    /// Owner of the slot at a row-major index. Callers guarantee `index < len`.
    pub(crate) fn owner_flat(&self, index: u32) -> Option<&Area> {
        self.slots[index as usize].as_ref()
    }

    /// Whether an in-bounds slot is busy.
    pub(crate) fn is_busy(&self, x: u16, y: u16) -> bool {
        self.owner(x, y).is_some()
    }

    fn index(&self, x: u16, y: u16) -> usize {
        usize::from(x) + usize::from(y) * usize::from(self.width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: u16, y: u16) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn zero_dimensions_rejected() {
        assert!(matches!(
            SlotMap::new(0, 4),
            Err(TcmError::InvalidArgument { .. })
        ));
        assert!(matches!(
            SlotMap::new(4, 0),
            Err(TcmError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn new_map_is_free() {
        let map = SlotMap::new(5, 3).unwrap();
        assert_eq!(map.len(), 15);
        assert_eq!(map.busy_count(), 0);
        assert!(map.is_block_free(0, 0, 5, 3));
    }

    #[test]
    fn read_out_of_bounds_rejected() {
        let map = SlotMap::new(4, 4).unwrap();
        assert!(matches!(
            map.read(p(4, 0)),
            Err(TcmError::InvalidDimension { .. })
        ));
        assert!(matches!(
            map.read(p(0, 4)),
            Err(TcmError::InvalidDimension { .. })
        ));
    }

    #[test]
    fn fill_rect_marks_only_footprint() {
        let mut map = SlotMap::new(4, 4).unwrap();
        let a = Area::rect(p(1, 1), p(2, 3)).unwrap();
        map.fill(&a, Some(a)).unwrap();
        assert_eq!(map.busy_count(), 6);
        assert_eq!(map.read(p(0, 1)).unwrap(), None);
        assert_eq!(map.read(p(3, 1)).unwrap(), None);
        assert_eq!(map.read(p(1, 0)).unwrap(), None);
        assert_eq!(map.read(p(2, 3)).unwrap(), Some(a));
    }

    #[test]
    fn fill_linear_wraps_rows() {
        let mut map = SlotMap::new(4, 4).unwrap();
        let a = Area::linear(p(3, 0), p(1, 1)).unwrap();
        map.fill(&a, Some(a)).unwrap();
        assert_eq!(map.busy_count(), 3);
        assert_eq!(map.read(p(3, 0)).unwrap(), Some(a));
        assert_eq!(map.read(p(0, 1)).unwrap(), Some(a));
        assert_eq!(map.read(p(1, 1)).unwrap(), Some(a));
        assert_eq!(map.read(p(2, 1)).unwrap(), None);
        assert_eq!(map.read(p(2, 0)).unwrap(), None);
    }

    #[test]
    fn fill_none_clears() {
        let mut map = SlotMap::new(4, 4).unwrap();
        let a = Area::rect(p(0, 0), p(3, 3)).unwrap();
        map.fill(&a, Some(a)).unwrap();
        map.fill(&a, None).unwrap();
        assert_eq!(map.busy_count(), 0);
    }

    #[test]
    fn fill_out_of_bounds_rejected_without_writes() {
        let mut map = SlotMap::new(4, 4).unwrap();
        let a = Area::rect(p(2, 2), p(4, 3)).unwrap();
        assert!(matches!(
            map.fill(&a, Some(a)),
            Err(TcmError::InvalidDimension { .. })
        ));
        assert_eq!(map.busy_count(), 0);
    }

    #[test]
    fn block_free_detects_single_busy_cell() {
        let mut map = SlotMap::new(6, 6).unwrap();
        let a = Area::rect(p(3, 4), p(3, 4)).unwrap();
        map.fill(&a, Some(a)).unwrap();
        assert!(!map.is_block_free(2, 3, 2, 2));
        assert!(map.is_block_free(0, 0, 3, 6));
        assert!(map.is_block_free(4, 0, 2, 6));
    }

    #[test]
    fn owners_reports_every_busy_slot() {
        let mut map = SlotMap::new(3, 3).unwrap();
        let a = Area::linear(p(2, 0), p(0, 1)).unwrap();
        map.fill(&a, Some(a)).unwrap();
        let owners: Vec<_> = map.owners().map(|(pt, o)| (pt, *o)).collect();
        assert_eq!(owners, vec![(p(2, 0), a), (p(0, 1), a)]);
    }
}
