//! Directional raster scanners for 2D blocks.
//!
//! [`scan_2d`] walks a [`ScanField`] in one of the four [`ScanOrder`]s and
//! collects every anchor (top-left slot) where a `width` x `height` block
//! fits on free slots with its leading column on the alignment stride.
//!
//! Two heuristics prune the walk without affecting correctness:
//!
//! - **X limiter:** once a row yields a candidate, later rows only consider
//!   columns strictly before it in scan direction, and the rest of the row
//!   is skipped. Each row then contributes at most one candidate.
//! - **Y limiter:** once a candidate sits on the very first column tried,
//!   no later row can beat it and the scan stops.
//!
//! Independently of both, an occupied anchor slot owned by a 2D area makes
//! the cursor jump past that area in one step.

use smallvec::SmallVec;
use tcm_core::{Alignment, Area, Point, TcmError};

use crate::field::ScanField;
use crate::order::ScanOrder;
use crate::slot_map::SlotMap;

/// Candidate anchors in scan order.
pub type Candidates = SmallVec<[Point; 8]>;

/// A 2D block to place.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockRequest {
    /// Width in slots.
    pub width: u16,
    /// Height in slots.
    pub height: u16,
    /// Stride constraint on the leading column.
    pub alignment: Alignment,
}

impl BlockRequest {
    /// Request a `width` x `height` block.
    pub const fn new(width: u16, height: u16, alignment: Alignment) -> Self {
        Self {
            width,
            height,
            alignment,
        }
    }

    /// Number of slots the block covers.
    pub fn slots(&self) -> u32 {
        u32::from(self.width) * u32::from(self.height)
    }
}

/// Pruning switches for [`scan_2d`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScanLimits {
    /// Narrow the column range after each row that yields a candidate.
    pub x_limiter: bool,
    /// Stop once a candidate is found on the first column tried.
    pub y_limiter: bool,
    /// Stop at the first candidate.
    pub first_only: bool,
}

impl Default for ScanLimits {
    fn default() -> Self {
        Self {
            x_limiter: true,
            y_limiter: true,
            first_only: false,
        }
    }
}

fn align_down(value: i32, stride: i32) -> i32 {
    value.div_euclid(stride) * stride
}

fn align_up(value: i32, stride: i32) -> i32 {
    (value + stride - 1).div_euclid(stride) * stride
}

/// Enumerate anchors in `field` where `request` fits, walking in `order`.
///
/// # Errors
///
/// - `InvalidArgument`: zero-sized request, or a field not directed for `order`.
/// - `InvalidDimension`: the field lies outside the map, or is smaller than
///   the request on either axis.
/// - `NoRoom`: snapping to the stride leaves no column for the block, or no
///   anchor fits.
///
/// # Examples
///
/// ```
/// use tcm_core::{Alignment, Area, Point};
/// use tcm_grid::{scan_2d, BlockRequest, ScanField, ScanLimits, ScanOrder, SlotMap};
///
/// let mut map = SlotMap::new(4, 4).unwrap();
/// let wall = Area::rect(Point::new(0, 0), Point::new(1, 3)).unwrap();
/// map.fill(&wall, Some(wall)).unwrap();
///
/// let order = ScanOrder::LeftToRightTopDown;
/// let found = scan_2d(
///     &map,
///     BlockRequest::new(2, 2, Alignment::None),
///     &ScanField::whole(4, 4, order),
///     order,
///     ScanLimits::default(),
/// )
/// .unwrap();
/// assert_eq!(found[0], Point::new(2, 0));
/// ```
pub fn scan_2d(
    map: &SlotMap,
    request: BlockRequest,
    field: &ScanField,
    order: ScanOrder,
    limits: ScanLimits,
) -> Result<Candidates, TcmError> {
    if request.width == 0 || request.height == 0 {
        return Err(TcmError::invalid_argument(format!(
            "block must be non-empty, got {}x{}",
            request.width, request.height
        )));
    }
    field.check(map, order)?;
    if request.width > field.columns() || request.height > field.rows() {
        return Err(TcmError::invalid_dimension(format!(
            "{}x{} block does not fit {}x{} field",
            request.width,
            request.height,
            field.columns(),
            field.rows()
        )));
    }

    let no_room = TcmError::NoRoom {
        slots: request.slots(),
    };
    let w = i32::from(request.width);
    let h = i32::from(request.height);
    let stride = i32::from(request.alignment.stride());
    let leftward = order.is_leftward();

    // Anchor columns run from `start_x` toward `bound_x`, both inclusive.
    let (ox, fx) = (i32::from(field.origin.x), i32::from(field.far.x));
    let (start_x, mut bound_x) = if leftward {
        (align_down(ox - w + 1, stride), fx)
    } else {
        (align_up(ox, stride), fx - w + 1)
    };
    if (leftward && start_x < bound_x) || (!leftward && start_x > bound_x) {
        return Err(no_room);
    }

    let (oy, fy) = (i32::from(field.origin.y), i32::from(field.far.y));
    let (first_y, last_y, dy) = if order.is_upward() {
        (oy - h + 1, fy, -1)
    } else {
        (oy, fy - h + 1, 1)
    };
    let step = if leftward { -stride } else { stride };

    let mut candidates = Candidates::new();
    let mut y = first_y;
    while (dy > 0 && y <= last_y) || (dy < 0 && y >= last_y) {
        let mut row_first = None;
        let mut x = start_x;
        while (leftward && x >= bound_x) || (!leftward && x <= bound_x) {
            let (ux, uy) = (x as u16, y as u16);
            if map.is_block_free(ux, uy, request.width, request.height) {
                candidates.push(Point::new(ux, uy));
                if limits.first_only {
                    return Ok(candidates);
                }
                row_first.get_or_insert(x);
                if limits.x_limiter {
                    bound_x = x - step.signum();
                    break;
                }
            } else if let Some(&Area::Rect { p0, p1 }) = map.owner(ux, uy) {
                // Land on the last aligned column still covered by the owner.
                x = if leftward {
                    align_up(i32::from(p0.x) - w + 1, stride)
                } else {
                    align_down(i32::from(p1.x), stride)
                };
            }
            x += step;
        }

        if limits.y_limiter && row_first == Some(start_x) {
            break;
        }
        y += dy;
    }

    if candidates.is_empty() {
        return Err(no_room);
    }
    Ok(candidates)
}
