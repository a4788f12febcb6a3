//! Container configuration.

use tcm_core::{Alignment, Point, TcmError};
use tcm_grid::{ScanLimits, ScanOrder};

/// Which scan order each kind of 2D request uses, and which pruning
/// heuristics are on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScanPolicy {
    /// Order for `Align32` / `Align64` requests.
    ///
    /// Default: [`ScanOrder::LeftToRightTopDown`].
    pub aligned: ScanOrder,
    /// Order for unaligned requests.
    ///
    /// Default: [`ScanOrder::RightToLeftTopDown`].
    pub unaligned: ScanOrder,
    /// Narrow the column range after each row that yields a candidate.
    /// Default: `true`.
    pub x_limiter: bool,
    /// Stop scanning once a candidate sits on the first column tried.
    /// Default: `true`.
    pub y_limiter: bool,
}

impl ScanPolicy {
    /// Scan order for a request with `alignment`.
    pub fn order_for(&self, alignment: Alignment) -> ScanOrder {
        if alignment.is_aligned() {
            self.aligned
        } else {
            self.unaligned
        }
    }

    /// Pruning switches for a scan in `order`.
    ///
    /// Orders whose criteria take the first candidate stop the scan there.
    pub fn limits_for(&self, order: ScanOrder) -> ScanLimits {
        ScanLimits {
            x_limiter: self.x_limiter,
            y_limiter: self.y_limiter,
            first_only: order.criteria().takes_first(),
        }
    }
}

impl Default for ScanPolicy {
    fn default() -> Self {
        Self {
            aligned: ScanOrder::LeftToRightTopDown,
            unaligned: ScanOrder::RightToLeftTopDown,
            x_limiter: true,
            y_limiter: true,
        }
    }
}

/// Configuration for a [`Tiler`](crate::Tiler).
///
/// Validated at construction; immutable afterwards.
///
/// # Examples
///
/// ```
/// use tcm_alloc::TilerConfig;
/// use tcm_core::Point;
///
/// let config = TilerConfig::new(256, 128).with_restrict_1d(true);
/// assert_eq!(config.resolved_divider(), Point::new(192, 96));
///
/// // Out-of-bounds hints fall back to the default split.
/// let config = TilerConfig::new(8, 8).with_divider(Point::new(9, 1));
/// assert_eq!(config.resolved_divider(), Point::new(6, 6));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TilerConfig {
    /// Container width in slots. Must be non-zero.
    pub width: u16,
    /// Container height in slots. Must be non-zero.
    pub height: u16,
    /// Divider point hint.
    ///
    /// Accepted when `x <= width` and `y <= height`; otherwise, or when
    /// `None`, the divider sits at 3/4 of each dimension.
    pub divider: Option<Point>,
    /// Keep 1D runs in the rows at and below the divider.
    ///
    /// Default: `false` (runs may use the whole container).
    pub restrict_1d: bool,
    /// Scan orders and pruning heuristics for 2D requests.
    pub scan: ScanPolicy,
}

impl TilerConfig {
    /// Divider position along each axis, as `NUMERATOR / DENOMINATOR` of
    /// the dimension.
    pub const DEFAULT_DIVIDER_NUMERATOR: u32 = 3;

    /// See [`DEFAULT_DIVIDER_NUMERATOR`](Self::DEFAULT_DIVIDER_NUMERATOR).
    pub const DEFAULT_DIVIDER_DENOMINATOR: u32 = 4;

    /// Configuration for a `width` x `height` container with defaults for
    /// everything else.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            divider: None,
            restrict_1d: false,
            scan: ScanPolicy::default(),
        }
    }

    /// Set the divider point hint.
    pub fn with_divider(mut self, divider: Point) -> Self {
        self.divider = Some(divider);
        self
    }

    /// Set whether 1D runs are kept below the divider.
    pub fn with_restrict_1d(mut self, restrict: bool) -> Self {
        self.restrict_1d = restrict;
        self
    }

    /// Set the scan policy.
    pub fn with_scan(mut self, scan: ScanPolicy) -> Self {
        self.scan = scan;
        self
    }

    /// Check the structural invariants.
    pub fn validate(&self) -> Result<(), TcmError> {
        if self.width == 0 || self.height == 0 {
            return Err(TcmError::invalid_argument(format!(
                "container must have at least one slot, got {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }

    /// Whether the divider hint is present and inside the container.
    pub fn divider_hint_accepted(&self) -> bool {
        self.divider
            .is_some_and(|d| d.x <= self.width && d.y <= self.height)
    }

    /// The divider in effect: the hint if accepted, otherwise the default.
    pub fn resolved_divider(&self) -> Point {
        match self.divider {
            Some(d) if self.divider_hint_accepted() => d,
            _ => Self::default_divider(self.width, self.height),
        }
    }

    /// Default divider for a `width` x `height` container.
    pub fn default_divider(width: u16, height: u16) -> Point {
        let scale = |dim: u16| {
            (u32::from(dim) * Self::DEFAULT_DIVIDER_NUMERATOR / Self::DEFAULT_DIVIDER_DENOMINATOR)
                as u16
        };
        Point::new(scale(width), scale(height))
    }
}
