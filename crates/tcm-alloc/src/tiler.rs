//! The container facade.

use std::sync::{Mutex, MutexGuard, PoisonError};

use tcm_core::{Alignment, Area, AreaId, Point, TcmError};
use tcm_grid::{scan_2d, scan_run, select, BlockRequest, ScanField, SlotMap};
use tracing::{debug, trace, warn};

use crate::config::TilerConfig;
use crate::region;
use crate::registry::Registry;

/// Occupancy summary of a [`Tiler`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TilerStats {
    /// Number of outstanding areas.
    pub live_areas: usize,
    /// Slots owned by outstanding areas.
    pub busy_slots: usize,
    /// Slots owned by nobody.
    pub free_slots: usize,
}

struct TilerState {
    slots: SlotMap,
    registry: Registry,
}

impl TilerState {
    fn commit(&mut self, area: Area) -> Result<AreaId, TcmError> {
        self.slots.fill(&area, Some(area))?;
        Ok(self.registry.insert(area))
    }
}

/// A fixed-size slot container handing out 2D areas and 1D runs.
///
/// Every operation that reads or writes the slot map takes one
/// per-instance lock for its whole duration, so a `Tiler` can be shared
/// across threads behind an `Arc`. The lock is not reentrant.
///
/// A constructed `Tiler` is always ready; [`deinit`](Self::deinit)
/// consumes it.
///
/// # Examples
///
/// ```
/// use tcm_alloc::Tiler;
/// use tcm_core::{Alignment, Point, TcmError};
///
/// let tiler = Tiler::init(4, 4, None).unwrap();
/// let block = tiler.reserve_2d(2, 2, Alignment::None).unwrap();
/// assert_eq!(tiler.get_parent(block.start()).unwrap(), block);
///
/// tiler.free(block).unwrap();
/// assert_eq!(tiler.free(block), Err(TcmError::NotFound));
/// tiler.deinit();
/// ```
pub struct Tiler {
    config: TilerConfig,
    divider: Point,
    state: Mutex<TilerState>,
}

impl Tiler {
    /// Create a `width` x `height` container.
    ///
    /// An out-of-bounds `divider_hint` is replaced by the default divider.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument`: either dimension is zero.
    /// - `InvalidDimension`: the slot array could not be allocated.
    pub fn init(width: u16, height: u16, divider_hint: Option<Point>) -> Result<Self, TcmError> {
        let mut config = TilerConfig::new(width, height);
        config.divider = divider_hint;
        Self::with_config(config)
    }

    /// Create a container from a full configuration.
    pub fn with_config(config: TilerConfig) -> Result<Self, TcmError> {
        config.validate()?;
        if let Some(hint) = config.divider {
            if !config.divider_hint_accepted() {
                warn!(
                    %hint,
                    width = config.width,
                    height = config.height,
                    "divider hint outside container, using default"
                );
            }
        }
        let divider = config.resolved_divider();
        let slots = SlotMap::new(config.width, config.height)?;
        debug!(
            width = config.width,
            height = config.height,
            %divider,
            restrict_1d = config.restrict_1d,
            "tiler initialised"
        );
        Ok(Self {
            config,
            divider,
            state: Mutex::new(TilerState {
                slots,
                registry: Registry::new(),
            }),
        })
    }

    fn lock(&self) -> MutexGuard<'_, TilerState> {
        // Every mutation completes before the guard drops, so a poisoned
        // state is still consistent.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Container width in slots.
    pub fn width(&self) -> u16 {
        self.config.width
    }

    /// Container height in slots.
    pub fn height(&self) -> u16 {
        self.config.height
    }

    /// The divider point in effect.
    pub fn divider(&self) -> Point {
        self.divider
    }

    /// The configuration this container was built from.
    pub fn config(&self) -> &TilerConfig {
        &self.config
    }

    /// Reserve a `width` x `height` rectangle whose left column is a
    /// multiple of `alignment`'s stride.
    ///
    /// The request is scanned in its preferred region first (see
    /// [`region`](crate::region)); if that region is not the whole
    /// container and has no room, the whole container is scanned once more.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument`: `width` or `height` is zero.
    /// - `InvalidDimension`: the block is larger than the container.
    /// - `NoRoom`: no free rectangle of that shape exists.
    pub fn reserve_2d(
        &self,
        width: u16,
        height: u16,
        alignment: Alignment,
    ) -> Result<Area, TcmError> {
        if width == 0 || height == 0 {
            return Err(TcmError::invalid_argument(format!(
                "2D area must be non-empty, got {width}x{height}"
            )));
        }
        if width > self.width() || height > self.height() {
            return Err(TcmError::invalid_dimension(format!(
                "{width}x{height} area exceeds {}x{} container",
                self.width(),
                self.height()
            )));
        }
        let request = BlockRequest::new(width, height, alignment);

        let mut state = self.lock();
        let area = self.place_2d(&state.slots, request)?;
        let id = state.commit(area)?;
        debug!(%id, %area, stride = alignment.stride(), "reserved 2D area");
        Ok(area)
    }

    /// [`reserve_2d`](Self::reserve_2d) with the stride given as a raw
    /// number of slots.
    ///
    /// # Errors
    ///
    /// `NotSupported` if `stride` is not 1, 32 or 64; otherwise as
    /// [`reserve_2d`](Self::reserve_2d).
    pub fn reserve_2d_strided(
        &self,
        width: u16,
        height: u16,
        stride: u32,
    ) -> Result<Area, TcmError> {
        self.reserve_2d(width, height, Alignment::try_from(stride)?)
    }

    fn place_2d(&self, slots: &SlotMap, request: BlockRequest) -> Result<Area, TcmError> {
        let order = self.config.scan.order_for(request.alignment);
        let primary = region::primary_field(
            self.width(),
            self.height(),
            self.divider,
            request,
            order,
        );
        match self.place_in(slots, request, &primary) {
            Err(TcmError::NoRoom { .. }) if !primary.covers(slots) => {
                trace!(
                    width = request.width,
                    height = request.height,
                    "preferred region full, scanning whole container"
                );
                let whole = ScanField::whole(self.width(), self.height(), order);
                self.place_in(slots, request, &whole)
            }
            placed => placed,
        }
    }

    fn place_in(
        &self,
        slots: &SlotMap,
        request: BlockRequest,
        field: &ScanField,
    ) -> Result<Area, TcmError> {
        let order = self.config.scan.order_for(request.alignment);
        let limits = self.config.scan.limits_for(order);
        let candidates = scan_2d(slots, request, field, order, limits)?;
        select(slots, &candidates, request, field, order.criteria())
    }

    /// Reserve `count` contiguous slots in row-major order.
    ///
    /// Runs pack toward the last slot of the container. With
    /// [`TilerConfig::restrict_1d`] set, they stay in the rows at and below
    /// the divider.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument`: `count` is zero.
    /// - `NoRoom`: no free run of that length exists in the band.
    pub fn reserve_1d(&self, count: u32) -> Result<Area, TcmError> {
        if count == 0 {
            return Err(TcmError::invalid_argument("1D run must hold at least one slot"));
        }
        let top = if self.config.restrict_1d {
            self.divider.y
        } else {
            0
        };
        let field = region::run_field(self.width(), self.height(), top)
            .ok_or(TcmError::NoRoom { slots: count })?;

        let mut state = self.lock();
        let area = scan_run(&state.slots, count, &field)?;
        let id = state.commit(area)?;
        debug!(%id, %area, slots = count, "reserved 1D run");
        Ok(area)
    }

    /// Release an area previously returned by a reserve call.
    ///
    /// `area` must match the reserved area exactly, kind included.
    ///
    /// # Errors
    ///
    /// `NotFound` if `area` is not outstanding.
    pub fn free(&self, area: Area) -> Result<(), TcmError> {
        let mut state = self.lock();
        let Some(id) = state.registry.id_of(&area) else {
            return Err(TcmError::NotFound);
        };
        state.slots.fill(&area, None)?;
        state.registry.remove(&area);
        debug!(%id, %area, "freed area");
        Ok(())
    }

    /// The area owning the slot at `point`.
    ///
    /// # Errors
    ///
    /// - `NotFound`: the slot is free.
    /// - `InvalidDimension`: `point` lies outside the container.
    pub fn get_parent(&self, point: Point) -> Result<Area, TcmError> {
        self.lock().slots.read(point)?.ok_or(TcmError::NotFound)
    }

    /// Outstanding areas with their identifiers, in reservation order
    /// (until the first free, which may reorder the tail).
    pub fn areas(&self) -> Vec<(AreaId, Area)> {
        self.lock().registry.iter().collect()
    }

    /// Occupancy summary.
    pub fn stats(&self) -> TilerStats {
        let state = self.lock();
        let busy = state.slots.busy_count();
        TilerStats {
            live_areas: state.registry.len(),
            busy_slots: busy,
            free_slots: state.slots.len() - busy,
        }
    }

    /// A copy of the slot map.
    pub fn snapshot(&self) -> SlotMap {
        self.lock().slots.clone()
    }

    /// Tear the container down, clearing every slot.
    ///
    /// Areas still outstanding are dropped with a warning.
    pub fn deinit(self) {
        let mut state = self.lock();
        let outstanding = state.registry.clear();
        if outstanding > 0 {
            warn!(outstanding, "deinit with areas still reserved, clearing");
        }
        state.slots.clear();
        debug!("tiler destroyed");
    }
}

impl std::fmt::Debug for Tiler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let stats = self.stats();
        f.debug_struct("Tiler")
            .field("width", &self.width())
            .field("height", &self.height())
            .field("divider", &self.divider)
            .field("live_areas", &stats.live_areas)
            .field("busy_slots", &stats.busy_slots)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScanPolicy;
    use tcm_grid::ScanOrder;

    fn p(x: u16, y: u16) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn init_rejects_zero_dimensions() {
        assert!(matches!(
            Tiler::init(0, 4, None),
            Err(TcmError::InvalidArgument { .. })
        ));
        assert!(matches!(
            Tiler::init(4, 0, None),
            Err(TcmError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn init_resolves_divider() {
        assert_eq!(Tiler::init(4, 4, None).unwrap().divider(), p(3, 3));
        assert_eq!(Tiler::init(8, 8, Some(p(2, 5))).unwrap().divider(), p(2, 5));
        assert_eq!(Tiler::init(8, 8, Some(p(9, 5))).unwrap().divider(), p(6, 6));
    }

    #[test]
    fn first_unaligned_block_goes_top_right() {
        let tiler = Tiler::init(4, 4, None).unwrap();
        let a = tiler.reserve_2d(2, 2, Alignment::None).unwrap();
        assert_eq!(a, Area::rect(p(2, 0), p(3, 1)).unwrap());
    }

    #[test]
    fn first_aligned_block_goes_top_left() {
        let tiler = Tiler::init(128, 16, None).unwrap();
        let a = tiler.reserve_2d(8, 4, Alignment::Align64).unwrap();
        assert_eq!(a, Area::rect(p(0, 0), p(7, 3)).unwrap());
        let b = tiler.reserve_2d(8, 4, Alignment::Align32).unwrap();
        assert_eq!(b.start(), p(32, 0));
    }

    #[test]
    fn falls_back_to_whole_grid() {
        // Divider (3,3): the preferred unaligned region is column 3,
        // rows 0..=2.
        let tiler = Tiler::init(4, 4, None).unwrap();
        for y in 0..3 {
            let a = tiler.reserve_2d(1, 1, Alignment::None).unwrap();
            assert_eq!(a.start(), p(3, y));
        }
        // Whole-grid candidates are (2,0) and (3,3); the corner touches two
        // edges and the column above it.
        let spill = tiler.reserve_2d(1, 1, Alignment::None).unwrap();
        assert_eq!(spill, Area::rect(p(3, 3), p(3, 3)).unwrap());
        assert_eq!(tiler.stats().busy_slots, 4);
    }

    #[test]
    fn failed_reserve_leaves_state_unchanged() {
        let tiler = Tiler::init(4, 4, None).unwrap();
        tiler.reserve_2d(2, 2, Alignment::None).unwrap();
        let before = tiler.snapshot();
        assert_eq!(
            tiler.reserve_2d(3, 3, Alignment::None),
            Err(TcmError::NoRoom { slots: 9 })
        );
        assert!(matches!(
            tiler.reserve_2d(5, 1, Alignment::None),
            Err(TcmError::InvalidDimension { .. })
        ));
        assert!(matches!(
            tiler.reserve_2d(0, 1, Alignment::None),
            Err(TcmError::InvalidArgument { .. })
        ));
        assert_eq!(tiler.snapshot(), before);
        assert_eq!(tiler.stats().live_areas, 1);
    }

    #[test]
    fn strided_reserve_rejects_unknown_strides() {
        let tiler = Tiler::init(64, 4, None).unwrap();
        assert_eq!(
            tiler.reserve_2d_strided(1, 1, 16),
            Err(TcmError::NotSupported { alignment: 16 })
        );
        assert_eq!(
            tiler.reserve_2d_strided(1, 1, 0),
            Err(TcmError::NotSupported { alignment: 0 })
        );
        let a = tiler.reserve_2d_strided(1, 1, 32).unwrap();
        assert_eq!(a.start().x % 32, 0);
    }

    #[test]
    fn restricted_runs_stay_below_divider() {
        let config = TilerConfig::new(4, 4).with_restrict_1d(true);
        let tiler = Tiler::with_config(config).unwrap();
        // Band is row 3 only.
        let run = tiler.reserve_1d(4).unwrap();
        assert_eq!(run, Area::linear(p(0, 3), p(3, 3)).unwrap());
        assert_eq!(tiler.reserve_1d(1), Err(TcmError::NoRoom { slots: 1 }));
    }

    #[test]
    fn restricted_runs_with_divider_on_last_edge_have_no_band() {
        let config = TilerConfig::new(4, 4)
            .with_divider(p(4, 4))
            .with_restrict_1d(true);
        let tiler = Tiler::with_config(config).unwrap();
        assert_eq!(tiler.reserve_1d(1), Err(TcmError::NoRoom { slots: 1 }));
    }

    #[test]
    fn free_clears_slots_and_registry() {
        let tiler = Tiler::init(4, 4, None).unwrap();
        let run = tiler.reserve_1d(3).unwrap();
        tiler.free(run).unwrap();
        assert_eq!(tiler.get_parent(p(3, 3)), Err(TcmError::NotFound));
        assert_eq!(
            tiler.stats(),
            TilerStats {
                live_areas: 0,
                busy_slots: 0,
                free_slots: 16
            }
        );
    }

    #[test]
    fn free_requires_matching_kind() {
        let tiler = Tiler::init(4, 4, None).unwrap();
        let run = tiler.reserve_1d(4).unwrap();
        let as_rect = Area::Rect {
            p0: run.start(),
            p1: run.end(),
        };
        assert_eq!(tiler.free(as_rect), Err(TcmError::NotFound));
        assert_eq!(tiler.stats().busy_slots, 4);
    }

    #[test]
    fn get_parent_out_of_bounds() {
        let tiler = Tiler::init(4, 4, None).unwrap();
        assert!(matches!(
            tiler.get_parent(p(4, 0)),
            Err(TcmError::InvalidDimension { .. })
        ));
    }

    #[test]
    fn scan_policy_overrides_orders() {
        let scan = ScanPolicy {
            unaligned: ScanOrder::RightToLeftBottomUp,
            ..ScanPolicy::default()
        };
        let config = TilerConfig::new(8, 8).with_divider(p(8, 8)).with_scan(scan);
        let tiler = Tiler::with_config(config).unwrap();
        // Divider on the far corner: preferred region is the whole grid.
        let a = tiler.reserve_2d(2, 2, Alignment::None).unwrap();
        assert_eq!(a, Area::rect(p(6, 6), p(7, 7)).unwrap());
    }

    #[test]
    fn areas_lists_outstanding() {
        let tiler = Tiler::init(8, 8, None).unwrap();
        let a = tiler.reserve_2d(2, 2, Alignment::None).unwrap();
        let b = tiler.reserve_1d(5).unwrap();
        assert_eq!(tiler.areas(), vec![(AreaId(0), a), (AreaId(1), b)]);
    }

    #[test]
    fn deinit_with_outstanding_areas() {
        let tiler = Tiler::init(4, 4, None).unwrap();
        tiler.reserve_2d(1, 1, Alignment::None).unwrap();
        tiler.deinit();
    }
}
