//! Slot map, scanners and placement selection for the tcm container manager.
//!
//! Everything in this crate is read-only over slot state except
//! [`SlotMap::fill`]. Scanners enumerate anchors where a request fits, the
//! selector picks one of them, and only the caller decides to commit it.
//!
//! # Pipeline
//!
//! ```text
//! BlockRequest ──► scan_2d(order, field, limits) ──► Candidates ──► select() ──► Area::Rect
//! slot count   ──► scan_run(field)                                          ──► Area::Linear
//! ```
//!
//! # Scan orders
//!
//! - [`ScanOrder::LeftToRightTopDown`]: aligned requests, top-left region.
//! - [`ScanOrder::RightToLeftTopDown`]: unaligned requests, top-right region.
//! - [`ScanOrder::LeftToRightBottomUp`] and [`ScanOrder::RightToLeftBottomUp`]:
//!   optional policy variants that pack upward from the bottom of a region.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod field;
pub mod neighbours;
pub mod order;
pub mod scan1d;
pub mod scan2d;
pub mod select;
pub mod slot_map;

pub use field::ScanField;
pub use neighbours::{Nearness, NeighbourStats};
pub use order::ScanOrder;
pub use scan1d::scan_run;
pub use scan2d::{scan_2d, BlockRequest, Candidates, ScanLimits};
pub use select::{select, Criteria, Score};
pub use slot_map::SlotMap;
