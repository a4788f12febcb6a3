//! Contiguous run scanner for 1D reservations.
//!
//! Runs live in the grid's row-major address space (`x + y * width`) and
//! wrap from the end of one row to the start of the next. The scanner packs
//! runs toward the high end of its field: it starts with the cursor on the
//! last slot and works toward the first.

use tcm_core::{Area, Point, TcmError};

use crate::field::ScanField;
use crate::slot_map::SlotMap;

/// Find `slots` contiguous free slots in `field`, as close to its high end
/// as possible.
///
/// `field` must span the full grid width, with `origin` on the last slot of
/// its bottom row and `far` on the first slot of its top row, i.e.
/// `ScanField::new((width - 1, bottom), (0, top))`.
///
/// Each attempt places the run's last slot on the cursor and walks forward
/// from its first slot. The first busy slot met moves the cursor to just
/// before its owner: the first slot of a 1D owner, or the owner's left
/// column on that row for a 2D owner.
///
/// # Errors
///
/// - `InvalidArgument`: `slots == 0`, or the field is not a full-width
///   band directed from the high end.
/// - `InvalidDimension`: the field lies outside the map.
/// - `NoRoom`: the band holds fewer than `slots` slots, or the cursor runs
///   past the field's first slot.
///
/// # Examples
///
/// ```
/// use tcm_core::{Area, Point};
/// use tcm_grid::{scan_run, ScanField, SlotMap};
///
/// let map = SlotMap::new(4, 4).unwrap();
/// let field = ScanField::new(Point::new(3, 3), Point::new(0, 0));
/// let run = scan_run(&map, 6, &field).unwrap();
/// assert_eq!(run, Area::linear(Point::new(2, 2), Point::new(3, 3)).unwrap());
/// ```
pub fn scan_run(map: &SlotMap, slots: u32, field: &ScanField) -> Result<Area, TcmError> {
    if slots == 0 {
        return Err(TcmError::invalid_argument("run must hold at least one slot"));
    }
    let width = map.width();
    if !field.origin.is_within(width, map.height()) || !field.far.is_within(width, map.height())
    {
        return Err(TcmError::invalid_dimension(format!(
            "field {}-{} outside {}x{} container",
            field.origin,
            field.far,
            width,
            map.height()
        )));
    }
    if field.origin.y < field.far.y {
        return Err(TcmError::invalid_argument(
            "run field must be directed from the bottom row up",
        ));
    }
    if field.origin.x != width - 1 || field.far.x != 0 {
        return Err(TcmError::invalid_argument(format!(
            "run field must span the full width of {width} slots"
        )));
    }

    let no_room = TcmError::NoRoom { slots };
    let capacity = u32::from(width) * u32::from(field.rows());
    if slots > capacity {
        return Err(no_room);
    }

    let low = field.far.flat(width);
    let mut cursor = field.origin.flat(width);
    loop {
        if cursor < low + (slots - 1) {
            return Err(no_room);
        }
        let start = cursor - (slots - 1);

        let blocker = (start..=cursor)
            .find_map(|index| map.owner_flat(index).map(|owner| (index, *owner)));
        let Some((index, owner)) = blocker else {
            return Ok(Area::Linear {
                start: Point::from_flat(start, width),
                end: Point::from_flat(cursor, width),
            });
        };

        let resume = match owner {
            Area::Linear { start, .. } => start.flat(width),
            Area::Rect { p0, .. } => Point::new(p0.x, Point::from_flat(index, width).y).flat(width),
        };
        if resume <= low {
            return Err(no_room);
        }
        cursor = resume - 1;
    }
}
