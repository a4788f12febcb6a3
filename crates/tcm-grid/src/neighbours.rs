//! Neighbour statistics and nearness factors for candidate placements.

use tcm_core::Point;

use crate::field::ScanField;
use crate::slot_map::SlotMap;

/// Edge contacts of a candidate footprint.
///
/// Each cell along the footprint's four edges looks at the slot just
/// outside that edge. The outside slot is either off the grid
/// (`boundary`), busy (`occupied`), or free (not counted).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NeighbourStats {
    /// Edge cells whose outside neighbour is off the grid.
    pub boundary: u32,
    /// Edge cells whose outside neighbour is busy.
    pub occupied: u32,
}

impl NeighbourStats {
    /// Count the contacts of the block with corners `p0` (top-left) and
    /// `p1` (bottom-right). The block must lie inside `map`.
    pub fn measure(map: &SlotMap, p0: Point, p1: Point) -> Self {
        let mut stats = Self::default();
        let last_x = map.width() - 1;
        let last_y = map.height() - 1;

        for x in p0.x..=p1.x {
            stats.count(p0.y == 0, || map.is_busy(x, p0.y - 1));
            stats.count(p1.y == last_y, || map.is_busy(x, p1.y + 1));
        }
        for y in p0.y..=p1.y {
            stats.count(p0.x == 0, || map.is_busy(p0.x - 1, y));
            stats.count(p1.x == last_x, || map.is_busy(p1.x + 1, y));
        }
        stats
    }

    fn count(&mut self, on_boundary: bool, busy: impl FnOnce() -> bool) {
        if on_boundary {
            self.boundary += 1;
        } else if busy() {
            self.occupied += 1;
        }
    }

    /// Total contacts: boundary plus occupied.
    pub fn score(&self) -> u32 {
        self.boundary + self.occupied
    }
}

/// Relative distance of a candidate from its field's origin corner.
///
/// Each axis is the signed offset from `origin`, scaled by 1000 and divided
/// by the signed extent `far - origin`, so moving away from the origin in
/// scan direction always increases the factor. A field one slot thick on an
/// axis has no extent to divide by; that axis contributes 0.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Nearness {
    /// Horizontal factor, per mille of the field width.
    pub x: i32,
    /// Vertical factor, per mille of the field height.
    pub y: i32,
}

impl Nearness {
    /// Nearness of `anchor` within `field`.
    pub fn measure(field: &ScanField, anchor: Point) -> Self {
        Self {
            x: axis_factor(anchor.x, field.origin.x, field.far.x),
            y: axis_factor(anchor.y, field.origin.y, field.far.y),
        }
    }

    /// Sum of both axes; smaller is nearer.
    pub fn combined(&self) -> i64 {
        i64::from(self.x) + i64::from(self.y)
    }
}

fn axis_factor(at: u16, origin: u16, far: u16) -> i32 {
    let extent = i32::from(far) - i32::from(origin);
    if extent == 0 {
        return 0;
    }
    (i32::from(at) - i32::from(origin)) * 1000 / extent
}
