//! Anchor alignment strides for 2D reservations.

use crate::error::TcmError;

/// Required multiple-of constraint on a 2D area's leading column.
///
/// Only strides of 1, 32 and 64 slots are supported. Other values are
/// rejected with [`TcmError::NotSupported`] rather than rounded.
///
/// # Examples
///
/// ```
/// use tcm_core::{Alignment, TcmError};
///
/// assert_eq!(Alignment::try_from(32).unwrap(), Alignment::Align32);
/// assert_eq!(
///     Alignment::try_from(16),
///     Err(TcmError::NotSupported { alignment: 16 })
/// );
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Alignment {
    /// No alignment (stride 1).
    #[default]
    None,
    /// Leading column is a multiple of 32.
    Align32,
    /// Leading column is a multiple of 64.
    Align64,
}

impl Alignment {
    /// The stride in slots.
    pub const fn stride(self) -> u16 {
        match self {
            Self::None => 1,
            Self::Align32 => 32,
            Self::Align64 => 64,
        }
    }

    /// Whether this alignment constrains the anchor at all.
    pub const fn is_aligned(self) -> bool {
        !matches!(self, Self::None)
    }
}

impl TryFrom<u32> for Alignment {
    type Error = TcmError;

    fn try_from(stride: u32) -> Result<Self, Self::Error> {
        match stride {
            1 => Ok(Self::None),
            32 => Ok(Self::Align32),
            64 => Ok(Self::Align64),
            other => Err(TcmError::NotSupported { alignment: other }),
        }
    }
}
