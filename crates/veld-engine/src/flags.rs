//! Per-cycle intent flags.
//!
//! Flags stage consumption and starvation outcomes during a cycle so
//! every agent acts against a consistent pre-resolution world; the
//! engine commits them in one batch at the last step. They are plain
//! fixed-size arrays keyed by agent id, cleared once per cycle.

use veld_core::AgentId;

/// The three intent classes staged during a cycle.
///
/// `starved`: energy was exhausted at step time. `eaten`: a prey was
/// selected by a predator, or a grass claimed by a prey. `fed`: the
/// agent made a successful catch/graze this cycle.
#[derive(Clone, Debug, Default)]
pub(crate) struct CycleFlags {
    starved: Vec<bool>,
    eaten: Vec<bool>,
    fed: Vec<bool>,
}

impl CycleFlags {
    pub(crate) fn new(slots: usize) -> Self {
        Self {
            starved: vec![false; slots],
            eaten: vec![false; slots],
            fed: vec![false; slots],
        }
    }

    pub(crate) fn mark_starved(&mut self, id: AgentId) {
        self.starved[id.index()] = true;
    }

    pub(crate) fn is_starved(&self, id: AgentId) -> bool {
        self.starved[id.index()]
    }

    pub(crate) fn mark_eaten(&mut self, id: AgentId) {
        self.eaten[id.index()] = true;
    }

    pub(crate) fn is_eaten(&self, id: AgentId) -> bool {
        self.eaten[id.index()]
    }

    pub(crate) fn mark_fed(&mut self, id: AgentId) {
        self.fed[id.index()] = true;
    }

    pub(crate) fn is_fed(&self, id: AgentId) -> bool {
        self.fed[id.index()]
    }

    /// Clear every flag for one slot (a freshly recruited newborn).
    pub(crate) fn clear_agent(&mut self, id: AgentId) {
        self.starved[id.index()] = false;
        self.eaten[id.index()] = false;
        self.fed[id.index()] = false;
    }

    /// Reset all flags for the next cycle.
    pub(crate) fn clear(&mut self) {
        self.starved.fill(false);
        self.eaten.fill(false);
        self.fed.fill(false);
    }
}
