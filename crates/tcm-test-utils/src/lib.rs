//! Test utilities for tcm development.
//!
//! Provides an invariant checker for [`Tiler`] state, an ASCII renderer for
//! [`SlotMap`]s, and seeded op-stream [`fixtures`] for randomized and
//! benchmark workloads.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use std::collections::HashSet;
use std::fmt::Write;

use tcm_alloc::Tiler;
use tcm_core::{Area, Point};
use tcm_grid::SlotMap;

/// Check that the slot map and the registry of `tiler` agree.
///
/// - Every busy slot is owned by a live area that contains it.
/// - Every slot of every live area is owned by that area.
/// - The busy-slot count equals the summed footprint of the live areas,
///   so no two live areas overlap.
pub fn check_consistent(tiler: &Tiler) -> Result<(), String> {
    let map = tiler.snapshot();
    let live: HashSet<Area> = tiler.areas().into_iter().map(|(_, a)| a).collect();
    let width = map.width();

    for (point, owner) in map.owners() {
        if !live.contains(owner) {
            return Err(format!("slot {point} owned by untracked area {owner}"));
        }
        if !owner.contains(point, width) {
            return Err(format!("slot {point} lies outside its owner {owner}"));
        }
    }

    let mut footprint = 0usize;
    for area in &live {
        for slice in area.slices(width) {
            let (p0, p1) = (slice.start(), slice.end());
            for y in p0.y..=p1.y {
                for x in p0.x..=p1.x {
                    let at = Point::new(x, y);
                    match map.read(at) {
                        Ok(Some(owner)) if owner == *area => {}
                        other => {
                            return Err(format!("slot {at} of {area} reads {other:?}"));
                        }
                    }
                }
            }
        }
        footprint += area.slot_count(width) as usize;
    }

    let busy = map.busy_count();
    if busy != footprint {
        return Err(format!(
            "{busy} busy slots but live areas cover {footprint}"
        ));
    }
    Ok(())
}

/// Panic with a rendered map if [`check_consistent`] fails.
pub fn assert_consistent(tiler: &Tiler) {
    if let Err(msg) = check_consistent(tiler) {
        panic!("inconsistent tiler: {msg}\n{}", render(&tiler.snapshot()));
    }
}

/// Render `map` one row per line: `.` free, `#` 2D owner, `=` 1D owner.
pub fn render(map: &SlotMap) -> String {
    let mut out = String::with_capacity(map.len() + usize::from(map.height()));
    for y in 0..map.height() {
        for x in 0..map.width() {
            let c = match map.read(Point::new(x, y)) {
                Ok(Some(Area::Rect { .. })) => '#',
                Ok(Some(Area::Linear { .. })) => '=',
                _ => '.',
            };
            out.push(c);
        }
        let _ = writeln!(out);
    }
    out
}
