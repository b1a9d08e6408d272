//! The per-kind, per-cell occupancy index.

use crate::error::GridError;
use smallvec::SmallVec;
use veld_core::{AgentId, GridPos, Kind};

/// Per-cell instance list. One entry is the common case under the
/// at-most-one-per-kind-per-cell invariant; two covers transients.
type CellInstances = SmallVec<[AgentId; 2]>;

/// Per-kind per-cell occupancy counts plus instance lookup.
///
/// The count tensor must always equal the number of *active* agents of
/// a kind physically located at a cell; callers are responsible for
/// paired [`decrement`](OccupancyGrid::decrement) /
/// [`increment`](OccupancyGrid::increment) calls around any position
/// change. Count underflow indicates a violated invariant upstream and
/// fails fast in debug builds.
///
/// The instance lookup is mutated independently of the counts: the
/// engine removes a claimed grass instance from the lookup mid-cycle
/// (so later-acting prey cannot double-claim it) while the count stays
/// until end-of-cycle resolution.
#[derive(Clone, Debug)]
pub struct OccupancyGrid {
    width: u32,
    height: u32,
    counts: Vec<u32>,
    instances: Vec<CellInstances>,
}

impl OccupancyGrid {
    /// Create an empty occupancy index for a `width` x `height` grid.
    pub fn new(width: u32, height: u32) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::EmptyGrid { width, height });
        }
        let plane = (width as usize) * (height as usize);
        Ok(Self {
            width,
            height,
            counts: vec![0; plane * Kind::ALL.len()],
            instances: vec![CellInstances::new(); plane * Kind::ALL.len()],
        })
    }

    /// Grid width in cells.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Grid height in cells.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of cells per kind plane.
    pub fn cell_count(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    fn slot(&self, kind: Kind, pos: GridPos) -> usize {
        debug_assert!(
            pos.in_bounds(self.width, self.height),
            "position {pos} outside {}x{} grid",
            self.width,
            self.height,
        );
        kind.index() * self.cell_count() + (pos.x as usize) * (self.height as usize) + pos.y as usize
    }

    /// Count of active agents of `kind` at `pos`.
    pub fn count(&self, kind: Kind, pos: GridPos) -> u32 {
        self.counts[self.slot(kind, pos)]
    }

    /// Sum of counts over the whole plane for `kind`.
    pub fn kind_total(&self, kind: Kind) -> u32 {
        let plane = self.cell_count();
        let start = kind.index() * plane;
        self.counts[start..start + plane].iter().sum()
    }

    /// Record one more agent of `kind` at `pos`.
    pub fn increment(&mut self, kind: Kind, pos: GridPos) {
        let slot = self.slot(kind, pos);
        self.counts[slot] += 1;
    }

    /// Record one fewer agent of `kind` at `pos`.
    ///
    /// Underflow means a caller skipped its paired increment; this is
    /// an invariant violation and fails fast in debug builds. Release
    /// builds saturate at zero.
    pub fn decrement(&mut self, kind: Kind, pos: GridPos) {
        let slot = self.slot(kind, pos);
        debug_assert!(
            self.counts[slot] > 0,
            "occupancy underflow for {kind} at {pos}"
        );
        self.counts[slot] = self.counts[slot].saturating_sub(1);
    }

    /// Agents of `kind` currently listed at `pos`.
    pub fn instances_at(&self, kind: Kind, pos: GridPos) -> &[AgentId] {
        let slot = self.slot(kind, pos);
        &self.instances[slot]
    }

    /// Add `agent` to the instance lookup for `kind` at `pos`.
    pub fn insert_instance(&mut self, kind: Kind, pos: GridPos, agent: AgentId) {
        let slot = self.slot(kind, pos);
        debug_assert!(
            !self.instances[slot].contains(&agent),
            "agent {agent} already listed at {pos}"
        );
        self.instances[slot].push(agent);
    }

    /// Remove `agent` from the instance lookup for `kind` at `pos`.
    ///
    /// Removing an agent that is not listed is a no-op; the engine's
    /// claim-early path may have taken it out already.
    pub fn remove_instance(&mut self, kind: Kind, pos: GridPos, agent: AgentId) {
        let slot = self.slot(kind, pos);
        if let Some(at) = self.instances[slot].iter().position(|&a| a == agent) {
            self.instances[slot].remove(at);
        }
    }

    /// Reset every count and instance list to empty.
    pub fn clear(&mut self) {
        self.counts.fill(0);
        for cell in &mut self.instances {
            cell.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn grid() -> OccupancyGrid {
        OccupancyGrid::new(4, 3).unwrap()
    }

    #[test]
    fn new_rejects_zero_axis() {
        match OccupancyGrid::new(0, 5) {
            Err(GridError::EmptyGrid { width: 0, height: 5 }) => {}
            other => panic!("expected EmptyGrid, got {other:?}"),
        }
        assert!(OccupancyGrid::new(5, 0).is_err());
    }

    #[test]
    fn counts_start_at_zero() {
        let g = grid();
        for kind in Kind::ALL {
            assert_eq!(g.kind_total(kind), 0);
            assert_eq!(g.count(kind, GridPos::new(0, 0)), 0);
        }
    }

    #[test]
    fn increment_decrement_roundtrip() {
        let mut g = grid();
        let pos = GridPos::new(2, 1);
        g.increment(Kind::Prey, pos);
        assert_eq!(g.count(Kind::Prey, pos), 1);
        assert_eq!(g.count(Kind::Predator, pos), 0);
        assert_eq!(g.kind_total(Kind::Prey), 1);
        g.decrement(Kind::Prey, pos);
        assert_eq!(g.count(Kind::Prey, pos), 0);
    }

    #[test]
    fn kind_planes_are_independent() {
        let mut g = grid();
        let pos = GridPos::new(1, 2);
        g.increment(Kind::Predator, pos);
        g.increment(Kind::Grass, pos);
        assert_eq!(g.count(Kind::Predator, pos), 1);
        assert_eq!(g.count(Kind::Prey, pos), 0);
        assert_eq!(g.count(Kind::Grass, pos), 1);
    }

    #[test]
    fn instance_lookup_tracks_membership() {
        let mut g = grid();
        let pos = GridPos::new(3, 0);
        g.insert_instance(Kind::Grass, pos, AgentId(9));
        assert_eq!(g.instances_at(Kind::Grass, pos), &[AgentId(9)]);
        g.remove_instance(Kind::Grass, pos, AgentId(9));
        assert!(g.instances_at(Kind::Grass, pos).is_empty());
    }

    #[test]
    fn remove_missing_instance_is_noop() {
        let mut g = grid();
        let pos = GridPos::new(0, 0);
        g.remove_instance(Kind::Prey, pos, AgentId(1));
        assert!(g.instances_at(Kind::Prey, pos).is_empty());
    }

    #[test]
    fn instance_removal_leaves_count_untouched() {
        // The claim-early path: lookup entry goes, count stays.
        let mut g = grid();
        let pos = GridPos::new(1, 1);
        g.increment(Kind::Grass, pos);
        g.insert_instance(Kind::Grass, pos, AgentId(4));
        g.remove_instance(Kind::Grass, pos, AgentId(4));
        assert_eq!(g.count(Kind::Grass, pos), 1);
        assert!(g.instances_at(Kind::Grass, pos).is_empty());
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "occupancy underflow")]
    fn decrement_below_zero_fails_fast_in_debug() {
        let mut g = grid();
        g.decrement(Kind::Predator, GridPos::new(0, 0));
    }

    #[test]
    fn clear_resets_everything() {
        let mut g = grid();
        let pos = GridPos::new(2, 2);
        g.increment(Kind::Prey, pos);
        g.insert_instance(Kind::Prey, pos, AgentId(0));
        g.clear();
        assert_eq!(g.kind_total(Kind::Prey), 0);
        assert!(g.instances_at(Kind::Prey, pos).is_empty());
    }

    proptest! {
        #[test]
        fn totals_match_per_cell_sums(
            moves in proptest::collection::vec((0u32..4, 0u32..3), 0..40)
        ) {
            let mut g = grid();
            for &(x, y) in &moves {
                g.increment(Kind::Prey, GridPos::new(x as i32, y as i32));
            }
            let mut sum = 0;
            for x in 0..4 {
                for y in 0..3 {
                    sum += g.count(Kind::Prey, GridPos::new(x, y));
                }
            }
            prop_assert_eq!(sum, moves.len() as u32);
            prop_assert_eq!(g.kind_total(Kind::Prey), moves.len() as u32);
        }
    }
}
