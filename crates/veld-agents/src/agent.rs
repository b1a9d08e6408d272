//! Mutable per-agent state.

use veld_core::{AgentId, GridPos, Kind};

/// One agent slot: identity plus the mutable state the engine drives.
///
/// Slots are allocated once at reset and never freed; `is_active`
/// gates participation in stepping, occupancy, and rewards.
#[derive(Clone, Debug)]
pub struct Agent {
    /// Stable identifier, doubles as the registry slab index.
    pub id: AgentId,
    /// Stable external handle, derived from kind and id (`prey_8`).
    pub name: String,
    /// Category, fixed for the agent's lifetime.
    pub kind: Kind,
    /// Current cell.
    pub position: GridPos,
    /// Driving quantity for survival and reproduction. Reaching zero
    /// or below marks the agent for starvation; there is no upper cap.
    pub energy: f64,
    /// Side length of this agent's own sight window (odd, at most the
    /// shared maximum observation window).
    pub observation_range: u32,
    /// Cycles survived since activation (predator/prey only).
    pub age: u64,
    /// Whether the slot currently participates in the simulation.
    pub is_active: bool,
}

impl Agent {
    /// Create a dormant slot with zeroed dynamic state.
    pub fn new(id: AgentId, kind: Kind, observation_range: u32) -> Self {
        Self {
            id,
            name: format!("{}_{}", kind.label(), id),
            kind,
            position: GridPos::default(),
            energy: 0.0,
            observation_range,
            age: 0,
            is_active: false,
        }
    }

    /// Apply a motion offset, clamped to the grid.
    ///
    /// A target outside the grid leaves the position unchanged — a
    /// silent no-op, not an error; motion is clamped, never wrapped.
    /// Returns the position after the move.
    pub fn apply_move(&mut self, offset: (i32, i32), width: u32, height: u32) -> GridPos {
        let target = self.position.offset(offset.0, offset.1);
        if target.in_bounds(width, height) {
            self.position = target;
        }
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn agent_at(x: i32, y: i32) -> Agent {
        let mut a = Agent::new(AgentId(0), Kind::Prey, 7);
        a.position = GridPos::new(x, y);
        a
    }

    #[test]
    fn name_derives_from_kind_and_id() {
        let a = Agent::new(AgentId(12), Kind::Predator, 5);
        assert_eq!(a.name, "predator_12");
        assert!(!a.is_active);
        assert_eq!(a.age, 0);
    }

    #[test]
    fn in_bounds_move_applies() {
        let mut a = agent_at(2, 2);
        assert_eq!(a.apply_move((0, 1), 5, 5), GridPos::new(2, 3));
        assert_eq!(a.position, GridPos::new(2, 3));
    }

    #[test]
    fn out_of_bounds_move_is_silent_noop() {
        let mut a = agent_at(0, 0);
        assert_eq!(a.apply_move((-1, 0), 5, 5), GridPos::new(0, 0));
        assert_eq!(a.apply_move((0, -1), 5, 5), GridPos::new(0, 0));
    }

    #[test]
    fn corner_clamp_is_idempotent() {
        let mut a = agent_at(4, 4);
        for _ in 0..3 {
            assert_eq!(a.apply_move((1, 1), 5, 5), GridPos::new(4, 4));
        }
    }
}
