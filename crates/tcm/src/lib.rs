//! tcm: a tiler container manager.
//!
//! This is the top-level facade crate that re-exports the public API from all
//! tcm sub-crates. For most users, adding `tcm` as a single dependency is
//! sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use tcm::prelude::*;
//!
//! // A 64x32 container with the default divider at (48, 24).
//! let tiler = Tiler::init(64, 32, None).unwrap();
//!
//! // Unaligned blocks pack from the top-right, aligned ones from the top-left.
//! let tile = tiler.reserve_2d(8, 4, Alignment::None).unwrap();
//! let aligned = tiler.reserve_2d(8, 4, Alignment::Align32).unwrap();
//! assert_eq!(aligned.start(), Point::new(0, 0));
//!
//! // Runs pack toward the last slot.
//! let run = tiler.reserve_1d(100).unwrap();
//! assert_eq!(run.end(), Point::new(63, 31));
//!
//! assert_eq!(tiler.get_parent(tile.start()), Ok(tile));
//! for area in [tile, aligned, run] {
//!     tiler.free(area).unwrap();
//! }
//! assert_eq!(tiler.get_parent(tile.start()), Err(TcmError::NotFound));
//! tiler.deinit();
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `tcm-core` | Points, areas, alignment, IDs, errors |
//! | [`grid`] | `tcm-grid` | Slot map, directional scanners, candidate selection |
//! | [`alloc`] | `tcm-alloc` | The `Tiler` facade, configuration, registry |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core value types and errors (`tcm-core`).
pub use tcm_core as types;

/// Slot map, scanners and selection (`tcm-grid`).
///
/// Useful for driving [`grid::scan_2d`] and [`grid::scan_run`] directly
/// against a [`grid::SlotMap`] without the locking facade.
pub use tcm_grid as grid;

/// The container facade (`tcm-alloc`).
pub use tcm_alloc as alloc;

/// Common imports for typical tcm usage.
///
/// ```rust
/// use tcm::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use tcm_core::{Alignment, Area, AreaId, AreaKind, Point, TcmError};

    // Facade
    pub use tcm_alloc::{ScanPolicy, Tiler, TilerConfig, TilerStats};

    // Scan orders, for ScanPolicy
    pub use tcm_grid::ScanOrder;
}
