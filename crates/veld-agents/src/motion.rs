//! The fixed motion offset table.

use std::fmt;

/// Errors arising from motion table construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MotionError {
    /// The action range must be an odd positive integer so the table
    /// is symmetric around the "stay" offset.
    EvenActionRange {
        /// The rejected range.
        range: u32,
    },
}

impl fmt::Display for MotionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EvenActionRange { range } => {
                write!(f, "action range must be odd and positive, got {range}")
            }
        }
    }
}

impl std::error::Error for MotionError {}

/// Ordered table of motion offsets; an action is an index into it.
///
/// Offsets are generated outer-`dx`, inner-`dy` over
/// `-(range-1)/2 ..= (range-1)/2`, keeping an offset when the
/// neighbourhood is Moore (Chebyshev) or when its Manhattan length
/// fits within the half range. The canonical 5-action table is
/// `range = 3`, von Neumann:
/// `[(-1,0), (0,-1), (0,0), (0,1), (1,0)]` — left, up, stay, down,
/// right in grid coordinates where `y` grows downward.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MotionTable {
    offsets: Vec<(i32, i32)>,
}

impl MotionTable {
    /// Generate a table for the given action range and neighbourhood.
    pub fn new(action_range: u32, moore: bool) -> Result<Self, MotionError> {
        if action_range == 0 || action_range % 2 == 0 {
            return Err(MotionError::EvenActionRange {
                range: action_range,
            });
        }
        let half = (action_range as i32 - 1) / 2;
        let mut offsets = Vec::new();
        for dx in -half..=half {
            for dy in -half..=half {
                if moore || dx.abs() + dy.abs() <= half {
                    offsets.push((dx, dy));
                }
            }
        }
        Ok(Self { offsets })
    }

    /// The canonical five-action table: left, up, stay, down, right.
    pub fn canonical() -> Self {
        Self {
            offsets: vec![(-1, 0), (0, -1), (0, 0), (0, 1), (1, 0)],
        }
    }

    /// Number of actions in the table.
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    /// Whether the table is empty (never true for constructed tables).
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// The offset for `action`, or `None` when out of range.
    pub fn offset(&self, action: usize) -> Option<(i32, i32)> {
        self.offsets.get(action).copied()
    }

    /// All offsets in action order.
    pub fn offsets(&self) -> &[(i32, i32)] {
        &self.offsets
    }
}
