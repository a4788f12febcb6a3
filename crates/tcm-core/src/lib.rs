//! Core value types for the tcm tiler container manager.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! coordinates, area descriptors, alignment strides and the error type that
//! every other crate in the workspace passes around.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod alignment;
pub mod area;
pub mod error;
pub mod id;
pub mod point;

pub use alignment::Alignment;
pub use area::{Area, AreaKind, Slices};
pub use error::TcmError;
pub use id::AreaId;
pub use point::Point;
