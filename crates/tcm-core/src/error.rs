//! Error type shared by every tcm crate.
//!
//! Every failure is returned synchronously and is recoverable by the caller:
//! shrink the request, free other areas, or pick a different alignment.
//! No operation mutates container state when it returns an error.

use std::error::Error;
use std::fmt;

/// Errors returned by container operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TcmError {
    /// A zero-sized, inverted, or otherwise malformed request.
    InvalidArgument {
        /// What was wrong with the argument.
        reason: String,
    },
    /// The request exceeds the container bounds or cannot fit the search
    /// field it was scanned in.
    InvalidDimension {
        /// Description of the offending dimension.
        reason: String,
    },
    /// The requested alignment stride is not one of 1, 32 or 64.
    NotSupported {
        /// The rejected stride.
        alignment: u32,
    },
    /// A structurally valid request that cannot currently be satisfied.
    NoRoom {
        /// Number of slots the request needed.
        slots: u32,
    },
    /// `free` or `get_parent` referenced an area or point that is not tracked.
    NotFound,
}

impl TcmError {
    /// Shorthand for [`TcmError::InvalidArgument`].
    pub fn invalid_argument(reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            reason: reason.into(),
        }
    }

    /// Shorthand for [`TcmError::InvalidDimension`].
    pub fn invalid_dimension(reason: impl Into<String>) -> Self {
        Self::InvalidDimension {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for TcmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument { reason } => write!(f, "invalid argument: {reason}"),
            Self::InvalidDimension { reason } => write!(f, "invalid dimension: {reason}"),
            Self::NotSupported { alignment } => {
                write!(f, "alignment {alignment} not supported (expected 1, 32 or 64)")
            }
            Self::NoRoom { slots } => write!(f, "no room for {slots} slots"),
            Self::NotFound => write!(f, "area not found"),
        }
    }
}

impl Error for TcmError {}
