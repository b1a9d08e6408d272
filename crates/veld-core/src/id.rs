//! Strongly-typed identifiers.

use std::fmt;

/// Identifies an agent slot within a simulation.
///
/// Agent IDs are assigned monotonically at population creation and
/// double as indices into the registry's agent slab. An ID is never
/// reused for a different agent while the population is alive; death
/// deactivates the slot, birth reactivates it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AgentId(pub u32);

impl AgentId {
    /// The slab index backing this ID.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for AgentId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Monotonically increasing cycle counter.
///
/// Incremented once per completed cycle (one step by every active
/// agent, followed by end-of-cycle resolution).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CycleId(pub u64);

impl fmt::Display for CycleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for CycleId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}
