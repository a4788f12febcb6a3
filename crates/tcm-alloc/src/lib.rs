//! Thread-safe tiler container allocator.
//!
//! A [`Tiler`] owns a fixed `width` x `height` grid of slots and hands out
//! rectangular 2D areas and contiguous 1D runs of them, placing each one
//! to keep free space in large, usable pieces.
//!
//! # Architecture
//!
//! ```text
//! Tiler (facade, one Mutex)
//! ├── TilerConfig (divider point, restrict-1D switch, ScanPolicy)
//! └── TilerState
//!     ├── SlotMap   (tcm-grid: per-slot owner copies)
//!     └── Registry  (Area → AreaId, live areas only)
//! ```
//!
//! # Placement regions
//!
//! The divider point splits the grid. Aligned 2D requests prefer the
//! columns left of it, unaligned 2D requests the columns right of it, and
//! both prefer the rows above it. Runs pack upward from the last slot and,
//! with `restrict_1d`, stay in the rows at and below the divider. A 2D
//! request that misses its preferred region retries once on the whole grid.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod region;
pub mod registry;
pub mod tiler;

pub use config::{ScanPolicy, TilerConfig};
pub use registry::Registry;
pub use tiler::{Tiler, TilerStats};
