//! Population bookkeeping: who exists, and who is currently active.

use crate::agent::Agent;
use indexmap::IndexMap;
use veld_core::{AgentId, Kind};

/// Owns every allocated agent slot and tracks per-kind active sets.
///
/// Slots are pushed once, in ascending-id creation order; after that,
/// population change is purely [`activate`](PopulationRegistry::activate)
/// / [`deactivate`](PopulationRegistry::deactivate). The per-kind
/// member lists preserve creation order, which fixes the iteration
/// order of cycle resolution and the dormant-slot tie-break.
#[derive(Clone, Debug, Default)]
pub struct PopulationRegistry {
    agents: Vec<Agent>,
    by_name: IndexMap<String, AgentId>,
    members: [Vec<AgentId>; 3],
    active: [Vec<AgentId>; 3],
}

impl PopulationRegistry {
    /// An empty registry; slots are pushed during population setup.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a slot. The agent's id must equal the next slab index;
    /// this keeps `AgentId` usable as a direct index.
    pub fn push(&mut self, agent: Agent) -> AgentId {
        debug_assert_eq!(agent.id.index(), self.agents.len(), "non-contiguous id");
        let id = agent.id;
        self.by_name.insert(agent.name.clone(), id);
        self.members[agent.kind.index()].push(id);
        if agent.is_active {
            self.active[agent.kind.index()].push(id);
        }
        self.agents.push(agent);
        id
    }

    /// Total allocated slots across all kinds.
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    /// Whether no slots are allocated.
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// Shared access to a slot.
    pub fn agent(&self, id: AgentId) -> Option<&Agent> {
        self.agents.get(id.index())
    }

    /// Mutable access to a slot.
    pub fn agent_mut(&mut self, id: AgentId) -> Option<&mut Agent> {
        self.agents.get_mut(id.index())
    }

    /// Resolve a stable external name to its id.
    pub fn id_of(&self, name: &str) -> Option<AgentId> {
        self.by_name.get(name).copied()
    }

    /// All allocated ids of `kind`, in creation order.
    pub fn ids(&self, kind: Kind) -> &[AgentId] {
        &self.members[kind.index()]
    }

    /// All allocated names of `kind`, in creation order.
    pub fn names(&self, kind: Kind) -> impl Iterator<Item = &str> {
        self.members[kind.index()]
            .iter()
            .map(|id| self.agents[id.index()].name.as_str())
    }

    /// Currently active ids of `kind`, in activation order.
    pub fn active_ids(&self, kind: Kind) -> &[AgentId] {
        &self.active[kind.index()]
    }

    /// Number of currently active agents of `kind`.
    pub fn active_count(&self, kind: Kind) -> usize {
        self.active[kind.index()].len()
    }

    /// Mark a dormant slot active and add it to the active set.
    ///
    /// Activating an already-active slot is a no-op.
    pub fn activate(&mut self, id: AgentId) {
        let agent = &mut self.agents[id.index()];
        if agent.is_active {
            return;
        }
        agent.is_active = true;
        self.active[agent.kind.index()].push(id);
    }

    /// Mark an active slot dormant and remove it from the active set.
    ///
    /// Deactivating an already-dormant slot is a no-op. The slot keeps
    /// its identity for later reactivation.
    pub fn deactivate(&mut self, id: AgentId) {
        let agent = &mut self.agents[id.index()];
        if !agent.is_active {
            return;
        }
        agent.is_active = false;
        let kind = agent.kind.index();
        if let Some(at) = self.active[kind].iter().position(|&a| a == id) {
            self.active[kind].remove(at);
        }
    }

    /// The *last* dormant slot of `kind` in creation order.
    ///
    /// Reproduction recruits this exact slot; taking the last rather
    /// than any dormant slot keeps seeded runs reproducible.
    pub fn last_dormant(&self, kind: Kind) -> Option<AgentId> {
        self.members[kind.index()]
            .iter()
            .copied()
            .filter(|id| !self.agents[id.index()].is_active)
            .last()
    }

    /// Drop every slot; used when an episode is re-populated.
    pub fn reset(&mut self) {
        self.agents.clear();
        self.by_name.clear();
        for list in &mut self.members {
            list.clear();
        }
        for list in &mut self.active {
            list.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded_registry(kind: Kind, n: u32) -> PopulationRegistry {
        let mut reg = PopulationRegistry::new();
        for i in 0..n {
            let mut agent = Agent::new(AgentId(i), kind, 7);
            agent.is_active = true;
            reg.push(agent);
        }
        reg
    }

    #[test]
    fn push_indexes_by_name_and_kind() {
        let reg = seeded_registry(Kind::Prey, 3);
        assert_eq!(reg.len(), 3);
        assert_eq!(reg.id_of("prey_1"), Some(AgentId(1)));
        assert_eq!(reg.ids(Kind::Prey), &[AgentId(0), AgentId(1), AgentId(2)]);
        assert_eq!(reg.active_count(Kind::Prey), 3);
        assert_eq!(reg.active_count(Kind::Predator), 0);
        let names: Vec<&str> = reg.names(Kind::Prey).collect();
        assert_eq!(names, ["prey_0", "prey_1", "prey_2"]);
    }

    #[test]
    fn deactivate_removes_from_active_only() {
        let mut reg = seeded_registry(Kind::Predator, 3);
        reg.deactivate(AgentId(1));
        assert_eq!(reg.active_count(Kind::Predator), 2);
        assert_eq!(reg.active_ids(Kind::Predator), &[AgentId(0), AgentId(2)]);
        assert_eq!(reg.ids(Kind::Predator).len(), 3);
        assert!(!reg.agent(AgentId(1)).unwrap().is_active);
        // Repeated deactivation is a no-op.
        reg.deactivate(AgentId(1));
        assert_eq!(reg.active_count(Kind::Predator), 2);
    }

    #[test]
    fn activate_restores_membership() {
        let mut reg = seeded_registry(Kind::Prey, 2);
        reg.deactivate(AgentId(0));
        reg.activate(AgentId(0));
        assert_eq!(reg.active_count(Kind::Prey), 2);
        assert_eq!(reg.active_ids(Kind::Prey), &[AgentId(1), AgentId(0)]);
        // Activating an active slot changes nothing.
        reg.activate(AgentId(0));
        assert_eq!(reg.active_count(Kind::Prey), 2);
    }

    #[test]
    fn last_dormant_takes_the_highest_creation_slot() {
        let mut reg = seeded_registry(Kind::Prey, 4);
        assert_eq!(reg.last_dormant(Kind::Prey), None);
        reg.deactivate(AgentId(1));
        reg.deactivate(AgentId(3));
        reg.deactivate(AgentId(2));
        // Creation order wins, not deactivation order.
        assert_eq!(reg.last_dormant(Kind::Prey), Some(AgentId(3)));
        reg.activate(AgentId(3));
        assert_eq!(reg.last_dormant(Kind::Prey), Some(AgentId(2)));
    }

    #[test]
    fn reset_empties_all_indexes() {
        let mut reg = seeded_registry(Kind::Grass, 2);
        reg.reset();
        assert!(reg.is_empty());
        assert_eq!(reg.id_of("grass_0"), None);
        assert_eq!(reg.active_count(Kind::Grass), 0);
    }
}
