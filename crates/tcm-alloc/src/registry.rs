//! Live-area registry.
//!
//! The slot map answers "who owns this slot"; the registry answers "is this
//! exact area outstanding". `free` consults it before touching any slot, so
//! an area that was never reserved (or already freed) is rejected without
//! mutating the map.

use indexmap::IndexMap;
use tcm_core::{Area, AreaId};

/// Outstanding areas, in reservation order, each tagged with an [`AreaId`].
#[derive(Clone, Debug, Default)]
pub struct Registry {
    live: IndexMap<Area, AreaId>,
    next_id: u64,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Track `area`, returning its fresh identifier.
    ///
    /// IDs are never reused within one registry.
    pub fn insert(&mut self, area: Area) -> AreaId {
        let id = AreaId(self.next_id);
        self.next_id += 1;
        self.live.insert(area, id);
        id
    }

    /// Stop tracking `area`, returning its identifier if it was live.
    pub fn remove(&mut self, area: &Area) -> Option<AreaId> {
        self.live.swap_remove(area)
    }

    /// Whether `area` is outstanding.
    pub fn contains(&self, area: &Area) -> bool {
        self.live.contains_key(area)
    }

    /// Identifier of `area`, if outstanding.
    pub fn id_of(&self, area: &Area) -> Option<AreaId> {
        self.live.get(area).copied()
    }

    /// Number of outstanding areas.
    pub fn len(&self) -> usize {
        self.live.len()
    }

    /// Whether no areas are outstanding.
    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// Outstanding areas with their identifiers.
    pub fn iter(&self) -> impl Iterator<Item = (AreaId, Area)> + '_ {
        self.live.iter().map(|(area, id)| (*id, *area))
    }

    /// Total slots held by outstanding areas in a grid `grid_width` wide.
    pub fn busy_slots(&self, grid_width: u16) -> u64 {
        self.live
            .keys()
            .map(|a| u64::from(a.slot_count(grid_width)))
            .sum()
    }

    /// Drop every outstanding area, returning how many there were.
    pub fn clear(&mut self) -> usize {
        let n = self.live.len();
        self.live.clear();
        n
    }
}
