//! Preferred search regions derived from the divider point.
//!
//! ```text
//!            0          div.x          W-1
//!          0 ┌────────────┬─────────────┐
//!            │  aligned   │  unaligned  │
//!            │  2D        │  2D         │
//!      div.y ├────────────┴─────────────┤
//!            │          1D runs         │
//!        H-1 └──────────────────────────┘
//! ```
//!
//! A block wider or taller than its preferred strip gets the whole span on
//! that axis instead. The divider may sit on either far edge (`div.x == W`),
//! so every subtraction below is guarded.

use tcm_core::Point;
use tcm_grid::{BlockRequest, ScanField, ScanOrder};

/// Preferred field for a 2D `request`, oriented for `order`.
///
/// `divider` must satisfy `x <= width` and `y <= height`, and both
/// dimensions must be non-zero.
pub fn primary_field(
    width: u16,
    height: u16,
    divider: Point,
    request: BlockRequest,
    order: ScanOrder,
) -> ScanField {
    let bottom = if request.height > divider.y {
        height - 1
    } else {
        divider.y - 1
    };
    let (left, right) = if request.alignment.is_aligned() {
        let right = if request.width > divider.x {
            width - 1
        } else {
            divider.x - 1
        };
        (0, right)
    } else {
        let left = if request.width > width - divider.x {
            0
        } else {
            divider.x
        };
        (left, width - 1)
    };
    ScanField::oriented(Point::new(left, 0), Point::new(right, bottom), order)
}

/// Field for 1D runs: full-width rows from `top` to the last row, directed
/// from the last slot.
///
/// `None` when `top` is past the last row.
pub fn run_field(width: u16, height: u16, top: u16) -> Option<ScanField> {
    (top < height).then(|| ScanField::new(Point::new(width - 1, height - 1), Point::new(0, top)))
}
