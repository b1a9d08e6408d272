//! Error types for observation window extraction.

use std::fmt;

/// Errors arising from window construction or extraction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WindowError {
    /// The shared maximum window size must be odd so a window has a
    /// center cell.
    EvenWindow {
        /// The rejected size.
        size: u32,
    },
    /// An agent's observation range exceeds the shared maximum window.
    ///
    /// This is a configuration error, not a clamp: ranges are fixed
    /// per kind and validated up front, so hitting this at extraction
    /// time means the precondition was violated.
    RangeExceedsWindow {
        /// The offending observation range.
        range: u32,
        /// The shared maximum window size.
        max: u32,
    },
}

impl fmt::Display for WindowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EvenWindow { size } => {
                write!(f, "observation window must be odd, got {size}")
            }
            Self::RangeExceedsWindow { range, max } => {
                write!(
                    f,
                    "observation range {range} exceeds maximum window {max}"
                )
            }
        }
    }
}

impl std::error::Error for WindowError {}
