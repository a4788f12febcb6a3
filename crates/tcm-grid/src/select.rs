//! Candidate selection.
//!
//! [`select`] turns the anchors a scan collected into one rectangle. The
//! choice is driven by a [`Criteria`] set, fixed per [`ScanOrder`](crate::ScanOrder)
//! (see [`ScanOrder::criteria`](crate::ScanOrder::criteria)).

use std::fmt;
use std::ops::BitOr;

use tcm_core::{Area, Point, TcmError};

use crate::field::ScanField;
use crate::neighbours::{Nearness, NeighbourStats};
use crate::scan2d::BlockRequest;
use crate::slot_map::SlotMap;

/// Set of placement criteria.
///
/// # Examples
///
/// ```
/// use tcm_grid::Criteria;
///
/// let c = Criteria::MAX_NEIGHBOURS | Criteria::BIAS_VERTICAL;
/// assert!(c.contains(Criteria::BIAS_VERTICAL));
/// assert!(!c.takes_first());
/// ```
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Criteria(u8);

impl Criteria {
    /// No criteria: every candidate ties with the first.
    pub const NONE: Self = Self(0);
    /// Take the first candidate found.
    pub const FIRST_FOUND: Self = Self(1 << 0);
    /// Prefer strictly more neighbours.
    pub const MAX_NEIGHBOURS: Self = Self(1 << 1);
    /// Prefer candidates nearer the field origin horizontally. Raster scans
    /// already produce candidates in this order, so this takes the first.
    pub const BIAS_HORIZONTAL: Self = Self(1 << 2);
    /// Prefer candidates further from the field origin vertically.
    pub const BIAS_VERTICAL: Self = Self(1 << 3);
    /// Prefer more neighbours, then more busy neighbours, then nearness.
    pub const DIAGONAL_BALANCE: Self = Self(1 << 4);

    /// Whether every flag in `other` is set.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Whether any flag in `other` is set.
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    /// Whether the first candidate wins outright.
    pub const fn takes_first(self) -> bool {
        self.intersects(Self(Self::FIRST_FOUND.0 | Self::BIAS_HORIZONTAL.0))
    }
}

impl BitOr for Criteria {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl fmt::Debug for Criteria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const NAMES: [(Criteria, &str); 5] = [
            (Criteria::FIRST_FOUND, "FIRST_FOUND"),
            (Criteria::MAX_NEIGHBOURS, "MAX_NEIGHBOURS"),
            (Criteria::BIAS_HORIZONTAL, "BIAS_HORIZONTAL"),
            (Criteria::BIAS_VERTICAL, "BIAS_VERTICAL"),
            (Criteria::DIAGONAL_BALANCE, "DIAGONAL_BALANCE"),
        ];
        let mut set = f.debug_set();
        for (flag, name) in NAMES {
            if self.contains(flag) {
                set.entry(&format_args!("{name}"));
            }
        }
        set.finish()
    }
}

/// Measured score of one candidate anchor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Score {
    /// Top-left slot of the candidate.
    pub anchor: Point,
    /// Edge contacts of the candidate's footprint.
    pub stats: NeighbourStats,
    /// Distance from the field origin.
    pub nearness: Nearness,
}

impl Score {
    /// Score the footprint of `request` at `anchor`.
    pub fn measure(
        map: &SlotMap,
        field: &ScanField,
        request: BlockRequest,
        anchor: Point,
    ) -> Self {
        let far = Point::new(
            anchor.x + (request.width - 1),
            anchor.y + (request.height - 1),
        );
        Self {
            anchor,
            stats: NeighbourStats::measure(map, anchor, far),
            nearness: Nearness::measure(field, anchor),
        }
    }

    fn vertical_distance(&self, field: &ScanField) -> u16 {
        self.anchor.y.abs_diff(field.origin.y)
    }

    /// Whether this score beats `best` under `criteria`.
    pub fn beats(&self, best: &Score, field: &ScanField, criteria: Criteria) -> bool {
        let (me, them) = (self.stats.score(), best.stats.score());

        if criteria.contains(Criteria::MAX_NEIGHBOURS) && me > them {
            return true;
        }
        if criteria.contains(Criteria::BIAS_VERTICAL)
            && self.vertical_distance(field) > best.vertical_distance(field)
        {
            return true;
        }
        criteria.contains(Criteria::DIAGONAL_BALANCE)
            && me >= them
            && (me > them
                || self.stats.occupied > best.stats.occupied
                || (self.stats.occupied == best.stats.occupied
                    && self.nearness.combined() < best.nearness.combined()))
    }
}

/// Pick one of `candidates` and expand it to the full footprint of `request`.
///
/// A lone candidate, or any candidate set under a first-wins criterion, is
/// taken as is. Otherwise each candidate is compared against the running
/// best with [`Score::beats`]; ties keep the earlier candidate.
///
/// Returns `NoRoom` if `candidates` is empty.
pub fn select(
    map: &SlotMap,
    candidates: &[Point],
    request: BlockRequest,
    field: &ScanField,
    criteria: Criteria,
) -> Result<Area, TcmError> {
    let (&first, rest) = candidates.split_first().ok_or(TcmError::NoRoom {
        slots: request.slots(),
    })?;
    if rest.is_empty() || criteria.takes_first() {
        return Ok(Area::footprint(first, request.width, request.height));
    }

    let mut best = Score::measure(map, field, request, first);
    for &anchor in rest {
        let me = Score::measure(map, field, request, anchor);
        if me.beats(&best, field, criteria) {
            best = me;
        }
    }
    Ok(Area::footprint(best.anchor, request.width, request.height))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::ScanOrder;
    use tcm_core::Alignment;

    fn p(x: u16, y: u16) -> Point {
        Point::new(x, y)
    }

    fn req(w: u16, h: u16) -> BlockRequest {
        BlockRequest::new(w, h, Alignment::None)
    }

    fn occupy(map: &mut SlotMap, p0: Point, p1: Point) {
        let a = Area::rect(p0, p1).unwrap();
        map.fill(&a, Some(a)).unwrap();
    }

    #[test]
    fn empty_candidates_is_no_room() {
        let map = SlotMap::new(4, 4).unwrap();
        let field = ScanField::whole(4, 4, ScanOrder::LeftToRightTopDown);
        assert_eq!(
            select(&map, &[], req(2, 2), &field, Criteria::DIAGONAL_BALANCE),
            Err(TcmError::NoRoom { slots: 4 })
        );
    }

    #[test]
    fn single_candidate_is_expanded() {
        let map = SlotMap::new(8, 8).unwrap();
        let field = ScanField::whole(8, 8, ScanOrder::RightToLeftTopDown);
        let a = select(&map, &[p(3, 1)], req(2, 3), &field, Criteria::NONE).unwrap();
        assert_eq!(a, Area::rect(p(3, 1), p(4, 3)).unwrap());
    }

    #[test]
    fn first_wins_under_horizontal_bias() {
        let map = SlotMap::new(8, 8).unwrap();
        let field = ScanField::whole(8, 8, ScanOrder::LeftToRightTopDown);
        // The second candidate has more boundary contact but must not win.
        let a = select(
            &map,
            &[p(3, 3), p(0, 0)],
            req(2, 2),
            &field,
            Criteria::BIAS_HORIZONTAL | Criteria::MAX_NEIGHBOURS,
        )
        .unwrap();
        assert_eq!(a.start(), p(3, 3));
    }

    #[test]
    fn max_neighbours_prefers_snug_fit() {
        let map = SlotMap::new(8, 8).unwrap();
        let field = ScanField::whole(8, 8, ScanOrder::RightToLeftTopDown);
        let a = select(
            &map,
            &[p(3, 3), p(6, 0)],
            req(2, 2),
            &field,
            Criteria::MAX_NEIGHBOURS,
        )
        .unwrap();
        assert_eq!(a.start(), p(6, 0));
    }

    #[test]
    fn bias_vertical_prefers_distance_from_origin_row() {
        let map = SlotMap::new(8, 8).unwrap();
        let field = ScanField::whole(8, 8, ScanOrder::LeftToRightTopDown);
        let a = select(
            &map,
            &[p(0, 1), p(0, 4), p(0, 2)],
            req(1, 1),
            &field,
            Criteria::BIAS_VERTICAL,
        )
        .unwrap();
        assert_eq!(a.start(), p(0, 4));
    }

    #[test]
    fn diagonal_balance_prefers_busy_contacts_on_equal_score() {
        let mut map = SlotMap::new(8, 8).unwrap();
        occupy(&mut map, p(0, 4), p(7, 4));
        let field = ScanField::whole(8, 8, ScanOrder::RightToLeftTopDown);
        // (6,0): right + top boundary = 4, no busy.
        // (6,2): right boundary 2 + busy below 2 = 4, with 2 busy.
        let a = select(
            &map,
            &[p(6, 0), p(6, 2)],
            req(2, 2),
            &field,
            Criteria::DIAGONAL_BALANCE,
        )
        .unwrap();
        assert_eq!(a.start(), p(6, 2));
    }

    #[test]
    fn diagonal_balance_falls_back_to_nearness() {
        let map = SlotMap::new(8, 8).unwrap();
        let field = ScanField::whole(8, 8, ScanOrder::RightToLeftTopDown);
        // Both touch only the top boundary (2 cells each, no busy).
        // Nearer the top-right origin wins regardless of candidate order.
        let a = select(
            &map,
            &[p(2, 0), p(4, 0)],
            req(2, 2),
            &field,
            Criteria::DIAGONAL_BALANCE,
        )
        .unwrap();
        assert_eq!(a.start(), p(4, 0));
    }

    #[test]
    fn diagonal_balance_never_takes_fewer_neighbours() {
        let map = SlotMap::new(8, 8).unwrap();
        let field = ScanField::whole(8, 8, ScanOrder::RightToLeftTopDown);
        let a = select(
            &map,
            &[p(6, 0), p(5, 0)],
            req(2, 2),
            &field,
            Criteria::DIAGONAL_BALANCE,
        )
        .unwrap();
        assert_eq!(a.start(), p(6, 0));
    }

    #[test]
    fn single_row_field_selects_without_dividing_by_zero() {
        let map = SlotMap::new(8, 1).unwrap();
        let field = ScanField::whole(8, 1, ScanOrder::RightToLeftTopDown);
        let a = select(
            &map,
            &[p(3, 0), p(2, 0)],
            req(1, 1),
            &field,
            Criteria::DIAGONAL_BALANCE,
        )
        .unwrap();
        // Equal neighbours; x nearness 571 vs 714, y contributes 0.
        assert_eq!(a.start(), p(3, 0));
    }

    #[test]
    fn criteria_debug_lists_flags() {
        let c = Criteria::FIRST_FOUND | Criteria::DIAGONAL_BALANCE;
        assert_eq!(format!("{c:?}"), "{FIRST_FOUND, DIAGONAL_BALANCE}");
    }
}
