//! Strongly-typed identifiers.

use std::fmt;

/// Identifies a live area within one container.
///
/// Assigned sequentially by the area registry when a reservation commits.
/// IDs are never reused within a container's lifetime, so a stale ID held
/// after `free` can never alias a newer area.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AreaId(pub u64);

impl fmt::Display for AreaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for AreaId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}
