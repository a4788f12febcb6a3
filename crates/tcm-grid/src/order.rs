//! Raster scan orders for 2D placement.

use crate::select::Criteria;

/// Direction in which a 2D scan walks its field.
///
/// Rows are always walked in the vertical direction first-to-last, and
/// within each row columns are walked in the horizontal direction. The
/// scan's origin corner is the first slot it visits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScanOrder {
    /// Origin top-left; columns rightward, rows downward.
    LeftToRightTopDown,
    /// Origin top-right; columns leftward, rows downward.
    RightToLeftTopDown,
    /// Origin bottom-left; columns rightward, rows upward.
    LeftToRightBottomUp,
    /// Origin bottom-right; columns leftward, rows upward.
    RightToLeftBottomUp,
}

impl ScanOrder {
    /// All four orders.
    pub const ALL: [ScanOrder; 4] = [
        Self::LeftToRightTopDown,
        Self::RightToLeftTopDown,
        Self::LeftToRightBottomUp,
        Self::RightToLeftBottomUp,
    ];

    /// Whether columns are walked right to left.
    pub const fn is_leftward(self) -> bool {
        matches!(self, Self::RightToLeftTopDown | Self::RightToLeftBottomUp)
    }

    /// Whether rows are walked bottom to top.
    pub const fn is_upward(self) -> bool {
        matches!(self, Self::LeftToRightBottomUp | Self::RightToLeftBottomUp)
    }

    /// Selection criteria used for candidates found in this order.
    ///
    /// A left-to-right, top-down raster already yields candidates in
    /// horizontal-bias order, so it takes the first one, as does the
    /// right-to-left bottom-up order. The remaining two rank candidates by
    /// how snugly they fit against their neighbours.
    pub const fn criteria(self) -> Criteria {
        match self {
            Self::LeftToRightTopDown => Criteria::BIAS_HORIZONTAL,
            Self::RightToLeftTopDown => Criteria::DIAGONAL_BALANCE,
            Self::RightToLeftBottomUp => Criteria::FIRST_FOUND,
            Self::LeftToRightBottomUp => Criteria::DIAGONAL_BALANCE,
        }
    }
}
