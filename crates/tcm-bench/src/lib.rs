//! Benchmark profiles and utilities for tcm.
//!
//! - [`reference_profile`]: 256x128 container (32K slots), default policy
//! - [`unlimited_profile`]: same container with both scan limiters off
//! - [`fragmented_map`]: deterministic pre-filled slot map for scan benches

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use tcm_alloc::{ScanPolicy, TilerConfig};
use tcm_core::{Area, Point};
use tcm_grid::SlotMap;

/// Reference container width.
pub const REFERENCE_WIDTH: u16 = 256;

/// Reference container height.
pub const REFERENCE_HEIGHT: u16 = 128;

/// 256x128 container with the default divider and scan policy.
pub fn reference_profile() -> TilerConfig {
    TilerConfig::new(REFERENCE_WIDTH, REFERENCE_HEIGHT)
}

/// [`reference_profile`] with the X and Y limiters disabled, so every scan
/// enumerates every fit.
pub fn unlimited_profile() -> TilerConfig {
    reference_profile().with_scan(ScanPolicy {
        x_limiter: false,
        y_limiter: false,
        ..ScanPolicy::default()
    })
}

/// Build a `width` x `height` slot map with roughly `fill_percent` of its
/// slots covered by small rectangles scattered by a hash of `seed`.
///
/// Rectangles are 1..=4 slots on each side and never overlap.
pub fn fragmented_map(width: u16, height: u16, fill_percent: u8, seed: u64) -> SlotMap {
    let mut map = match SlotMap::new(width, height) {
        Ok(map) => map,
        Err(e) => panic!("bench map {width}x{height}: {e}"),
    };
    let target = map.len() * usize::from(fill_percent.min(100)) / 100;
    let mut state = seed;
    let mut next = move || {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        state >> 16
    };

    let mut busy = 0usize;
    let mut misses = 0u32;
    while busy < target && misses < 10_000 {
        let w = (next() % 4 + 1) as u16;
        let h = (next() % 4 + 1) as u16;
        if w > width || h > height {
            misses += 1;
            continue;
        }
        let x = (next() % u64::from(width - w + 1)) as u16;
        let y = (next() % u64::from(height - h + 1)) as u16;
        if !map.is_block_free(x, y, w, h) {
            misses += 1;
            continue;
        }
        let area = Area::footprint(Point::new(x, y), w, h);
        if map.fill(&area, Some(area)).is_ok() {
            busy += usize::from(w) * usize::from(h);
        }
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profiles_validate() {
        reference_profile().validate().unwrap();
        let unlimited = unlimited_profile();
        unlimited.validate().unwrap();
        assert!(!unlimited.scan.x_limiter && !unlimited.scan.y_limiter);
    }

    #[test]
    fn fragmented_map_hits_fill_target() {
        let map = fragmented_map(64, 32, 40, 42);
        let busy = map.busy_count();
        assert!(busy >= 64 * 32 * 40 / 100, "busy {busy}");
        assert!(busy < 64 * 32 * 40 / 100 + 16);
    }

    #[test]
    fn fragmented_map_deterministic() {
        assert_eq!(fragmented_map(32, 32, 30, 7), fragmented_map(32, 32, 30, 7));
    }
}
