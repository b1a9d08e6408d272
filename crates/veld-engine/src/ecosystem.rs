//! The cycle resolution engine.
//!
//! [`Ecosystem`] owns every piece of mutable simulation state — the
//! occupancy grid, the population registry, the per-cycle intent
//! flags, rewards, and the seeded RNG — and is driven one agent at a
//! time by an external turn scheduler. A *cycle* is one step by every
//! currently active agent; the scheduler flags the final step of each
//! cycle, which triggers batch resolution of all staged outcomes.
//!
//! # Step protocol
//!
//! [`step()`](Ecosystem::step) applies movement effects immediately
//! (occupancy moves with the agent) but defers consumption,
//! starvation, and reproduction to the cycle boundary: interactions
//! only *mark* intent flags. Agents acting later in the same cycle
//! therefore see a consistent pre-resolution world, and all removals
//! and births commit atomically in one batch. The single exception is
//! the grass claim: a claimed grass instance leaves the position
//! lookup immediately (so two prey cannot eat the same grass in one
//! cycle) while its occupancy count survives until resolution.
//!
//! # Determinism
//!
//! All randomness — initial placement, tie-breaks among co-located
//! targets, reproduction placement — flows through one `ChaCha8Rng`.
//! Resolution iterates kinds in the fixed order predators, prey,
//! grass, and agents within a kind in ascending creation order, so a
//! seed plus an action sequence replays exactly.

use rand::{RngExt, SeedableRng};
use rand_chacha::ChaCha8Rng;

use veld_agents::{Agent, MotionTable, PopulationRegistry};
use veld_core::{AgentId, CycleId, GridPos, Kind};
use veld_grid::OccupancyGrid;
use veld_obs::{ObsWindow, WindowBuilder};

use crate::config::{ConfigError, EcosystemConfig, KindParams};
use crate::error::EngineError;
use crate::flags::CycleFlags;
use crate::stats::EpisodeStats;

/// The predator-prey-grass simulation engine.
///
/// Constructed once per experiment via [`new()`](Ecosystem::new);
/// [`reset()`](Ecosystem::reset) starts a fresh episode in place. The
/// engine never ends an episode on its own — it exposes the
/// termination predicates and the cycle counter, and the external
/// scheduler decides.
pub struct Ecosystem {
    config: EcosystemConfig,
    motion: MotionTable,
    window: WindowBuilder,
    grid: OccupancyGrid,
    registry: PopulationRegistry,
    flags: CycleFlags,
    rewards: Vec<f64>,
    rng: ChaCha8Rng,
    cycle: CycleId,
    stats: EpisodeStats,
}

impl Ecosystem {
    /// Validate `config`, allocate all agent slots, and place the
    /// initial populations.
    pub fn new(config: EcosystemConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let motion = MotionTable::new(config.action_range, config.moore_neighborhood_actions)?;
        let window = WindowBuilder::new(config.max_observation_range)?;
        let grid = OccupancyGrid::new(config.width, config.height)?;
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        let mut eco = Self {
            motion,
            window,
            grid,
            registry: PopulationRegistry::new(),
            flags: CycleFlags::new(0),
            rewards: Vec::new(),
            rng,
            cycle: CycleId(0),
            stats: EpisodeStats::default(),
            config,
        };
        eco.populate();
        Ok(eco)
    }

    /// Start a fresh episode: re-place all populations at random
    /// distinct cells, zero counters, history, flags, and rewards.
    ///
    /// Passing a seed reseeds the RNG; `None` continues the current
    /// random stream.
    pub fn reset(&mut self, seed: Option<u64>) {
        if let Some(seed) = seed {
            self.config.seed = seed;
            self.rng = ChaCha8Rng::seed_from_u64(seed);
        }
        self.populate();
    }

    fn populate(&mut self) {
        self.registry.reset();
        self.grid.clear();
        self.cycle = CycleId(0);
        self.stats.reset();

        let total = (self.config.n_possible_predator
            + self.config.n_possible_prey
            + self.config.n_possible_grass) as usize;
        self.flags = CycleFlags::new(total);
        self.rewards = vec![0.0; total];

        let mut next_id = 0u32;
        for kind in Kind::ALL {
            let params = self.config.params(kind);

            // Fresh per-kind vacancy list: kinds may overlap each
            // other, but cells are distinct within a kind.
            let mut vacant: Vec<GridPos> = Vec::with_capacity(self.grid.cell_count());
            for x in 0..self.config.width as i32 {
                for y in 0..self.config.height as i32 {
                    vacant.push(GridPos::new(x, y));
                }
            }

            for _ in 0..self.config.n_possible(kind) {
                let id = AgentId(next_id);
                next_id += 1;
                let at = self.rng.random_range(0..vacant.len());
                let cell = vacant.remove(at);
                let mut agent = Agent::new(id, kind, params.observation_range);
                agent.position = cell;
                agent.energy = params.initial_energy;
                agent.is_active = true;
                self.registry.push(agent);
                self.grid.increment(kind, cell);
                self.grid.insert_instance(kind, cell, id);
            }

            // Slots beyond the initial active count start dormant,
            // available for reproduction to recruit later.
            let keep = self.config.n_initial_active(kind) as usize;
            let tail: Vec<AgentId> = self.registry.ids(kind)[keep..].to_vec();
            for id in tail {
                let pos = match self.registry.agent(id) {
                    Some(a) => a.position,
                    None => continue,
                };
                self.registry.deactivate(id);
                self.grid.remove_instance(kind, pos, id);
                self.grid.decrement(kind, pos);
                if let Some(a) = self.registry.agent_mut(id) {
                    a.energy = 0.0;
                }
            }
        }

        self.record_population_snapshot();
    }

    // ── Stepping ───────────────────────────────────────────────────

    /// Advance one agent by one step.
    ///
    /// Movement and claim effects apply immediately; consumption,
    /// starvation, and reproduction are staged and committed when
    /// `is_last_step_of_cycle` is true. Rewards are zeroed at every
    /// step and only populated during the last step's resolution.
    ///
    /// Stepping an inactive agent skips the action phase but still
    /// performs the reward reset and, when flagged, the resolution —
    /// the scheduler owns the skip-dead-agents policy, not the engine.
    pub fn step(
        &mut self,
        action: usize,
        agent: AgentId,
        is_last_step_of_cycle: bool,
    ) -> Result<(), EngineError> {
        if self.motion.offset(action).is_none() {
            return Err(EngineError::InvalidAction {
                action,
                n_actions: self.motion.len(),
            });
        }
        let is_active = self
            .registry
            .agent(agent)
            .ok_or(EngineError::UnknownAgentId { id: agent })?
            .is_active;

        if is_active {
            self.act(agent, action);
        }

        self.rewards.fill(0.0);

        if is_last_step_of_cycle {
            self.resolve_cycle();
        }
        Ok(())
    }

    /// The immediate (non-deferred) half of one agent's step.
    fn act(&mut self, id: AgentId, action: usize) {
        let Some(offset) = self.motion.offset(action) else {
            return;
        };
        let (kind, pos, energy) = match self.registry.agent(id) {
            Some(a) => (a.kind, a.position, a.energy),
            None => return,
        };
        if !kind.is_learning() {
            return;
        }
        if energy <= 0.0 {
            self.flags.mark_starved(id);
            return;
        }

        let (w, h) = (self.grid.width(), self.grid.height());
        let candidate = pos.offset(offset.0, offset.1);
        // A cell already holding an agent of the same kind resolves to
        // "stay", like an out-of-bounds target. This keeps the
        // one-per-kind-per-cell occupancy invariant.
        let blocked = candidate != pos
            && candidate.in_bounds(w, h)
            && self.grid.count(kind, candidate) > 0;
        let here = if blocked {
            pos
        } else {
            self.grid.remove_instance(kind, pos, id);
            self.grid.decrement(kind, pos);
            let new_pos = match self.registry.agent_mut(id) {
                Some(a) => a.apply_move(offset, w, h),
                None => pos,
            };
            self.grid.increment(kind, new_pos);
            self.grid.insert_instance(kind, new_pos, id);
            new_pos
        };
        if let Some(a) = self.registry.agent_mut(id) {
            a.age += 1;
        }

        match kind {
            Kind::Predator => {
                if self.grid.count(Kind::Prey, here) > 0 {
                    if let Some(victim) = self.choose_at(Kind::Prey, here) {
                        self.flags.mark_fed(id);
                        self.flags.mark_eaten(victim);
                    }
                }
            }
            Kind::Prey => {
                // The count may outlive the instance entry: an
                // earlier-acting prey can have claimed the only grass
                // here this cycle, and then choose_at finds nothing.
                if self.grid.count(Kind::Grass, here) > 0 {
                    if let Some(meal) = self.choose_at(Kind::Grass, here) {
                        self.flags.mark_fed(id);
                        self.flags.mark_eaten(meal);
                        self.grid.remove_instance(Kind::Grass, here, meal);
                    }
                }
            }
            Kind::Grass => {}
        }
    }

    /// Pick one agent of `kind` standing at `pos`: the single
    /// candidate when there is exactly one, a uniform draw otherwise.
    fn choose_at(&mut self, kind: Kind, pos: GridPos) -> Option<AgentId> {
        let list = self.grid.instances_at(kind, pos);
        match list.len() {
            0 => None,
            1 => Some(list[0]),
            n => Some(list[self.rng.random_range(0..n)]),
        }
    }

    // ── Cycle resolution ───────────────────────────────────────────

    /// Commit all staged outcomes: predators, then prey, then grass.
    fn resolve_cycle(&mut self) {
        self.resolve_learning_kind(Kind::Predator);
        self.resolve_learning_kind(Kind::Prey);
        self.resolve_grass();

        self.cycle = CycleId(self.cycle.0 + 1);
        self.record_population_snapshot();
        self.flags.clear();
    }

    fn resolve_learning_kind(&mut self, kind: Kind) {
        let params = self.config.params(kind);
        // Stable snapshot: births during this pass must not extend the
        // iteration.
        let ids: Vec<AgentId> = self.registry.ids(kind).to_vec();
        for id in ids {
            let (active, pos, age) = match self.registry.agent(id) {
                Some(a) => (a.is_active, a.position, a.age),
                None => continue,
            };
            if !active {
                continue;
            }
            let starved = self.flags.is_starved(id);
            let eaten = self.flags.is_eaten(id);
            if starved || eaten {
                self.registry.deactivate(id);
                self.grid.remove_instance(kind, pos, id);
                self.grid.decrement(kind, pos);
                if let Some(a) = self.registry.agent_mut(id) {
                    a.energy = 0.0;
                    a.age = 0;
                }
                self.rewards[id.index()] += params.death_reward;
                self.stats.record_death(kind, starved, age);
            } else {
                let fed = self.flags.is_fed(id);
                self.rewards[id.index()] += params.step_reward;
                if fed {
                    self.rewards[id.index()] += params.catch_reward;
                }
                let energy_after = match self.registry.agent_mut(id) {
                    Some(a) => {
                        a.energy += params.energy_gain_per_step;
                        if fed {
                            a.energy += params.catch_energy;
                        }
                        a.energy
                    }
                    None => continue,
                };
                if params.reproduction_enabled && energy_after > params.creation_energy_threshold
                {
                    // A full roster means no recruit: the parent pays
                    // nothing and no birth occurs.
                    if let Some(child) = self.registry.last_dormant(kind) {
                        self.spawn_child(kind, id, child, &params);
                    }
                }
            }
        }
    }

    /// Recruit `child` from the dormant pool, funded by `parent`.
    fn spawn_child(&mut self, kind: Kind, parent: AgentId, child: AgentId, params: &KindParams) {
        if let Some(p) = self.registry.agent_mut(parent) {
            p.energy -= params.initial_energy;
        }
        self.flags.clear_agent(child);
        self.registry.activate(child);
        let cell = self.random_vacant_cell(kind);
        if let Some(c) = self.registry.agent_mut(child) {
            c.energy = params.initial_energy;
            c.age = 0;
            c.position = cell;
        }
        self.grid.increment(kind, cell);
        self.grid.insert_instance(kind, cell, child);
        self.rewards[parent.index()] += params.reproduction_reward;
        self.stats.record_birth(kind);
    }

    /// Uniformly random cell not occupied by `kind`, by rejection
    /// sampling. At least one exists whenever a dormant slot did.
    fn random_vacant_cell(&mut self, kind: Kind) -> GridPos {
        loop {
            let pos = GridPos::new(
                self.rng.random_range(0..self.config.width as i32),
                self.rng.random_range(0..self.config.height as i32),
            );
            if self.grid.count(kind, pos) == 0 {
                return pos;
            }
        }
    }

    fn resolve_grass(&mut self) {
        let growth = self.config.energy_gain_per_step_grass;
        let threshold = self.config.initial_energy_grass;
        let ids: Vec<AgentId> = self.registry.ids(Kind::Grass).to_vec();
        for id in ids {
            // Growth accrues every cycle, active or not; this is what
            // produces the fixed regrowth delay.
            let (pos, was_active) = match self.registry.agent_mut(id) {
                Some(a) => {
                    a.energy += growth;
                    (a.position, a.is_active)
                }
                None => continue,
            };

            if was_active && self.flags.is_eaten(id) {
                self.registry.deactivate(id);
                // The instance entry left the lookup at claim time;
                // only the count commits here.
                self.grid.decrement(Kind::Grass, pos);
                if let Some(a) = self.registry.agent_mut(id) {
                    a.energy = 0.0;
                }
            }

            if self.config.regrow_grass {
                let revive = match self.registry.agent(id) {
                    Some(a) => !a.is_active && a.energy > threshold,
                    None => false,
                };
                if revive {
                    self.registry.activate(id);
                    self.grid.increment(Kind::Grass, pos);
                    self.grid.insert_instance(Kind::Grass, pos, id);
                }
            }
        }
    }

    fn record_population_snapshot(&mut self) {
        self.stats.record_active(
            self.registry.active_count(Kind::Predator),
            self.registry.active_count(Kind::Prey),
            self.registry.active_count(Kind::Grass),
        );
    }

    // ── Observation and rewards ────────────────────────────────────

    /// Extract the observation window centered on the named agent.
    pub fn observe(&self, agent_name: &str) -> Result<ObsWindow, EngineError> {
        let id = self
            .registry
            .id_of(agent_name)
            .ok_or_else(|| EngineError::UnknownName {
                name: agent_name.to_string(),
            })?;
        let agent = self
            .registry
            .agent(id)
            .ok_or(EngineError::UnknownAgentId { id })?;
        Ok(self
            .window
            .build(&self.grid, agent.position, agent.observation_range)?)
    }

    /// The named agent's reward from the most recent step.
    ///
    /// Zero on every non-last step by design; only the last step's
    /// resolution populates rewards.
    pub fn reward(&self, agent_name: &str) -> Option<f64> {
        let id = self.registry.id_of(agent_name)?;
        self.rewards.get(id.index()).copied()
    }

    // ── Scenario setup ─────────────────────────────────────────────

    /// Move an agent to an explicit cell, keeping occupancy in sync.
    ///
    /// Intended for scripted scenario setup before stepping begins.
    /// Rejects out-of-bounds targets and, for active agents, cells
    /// already holding the same kind. Dormant agents only update their
    /// recorded position (they are absent from occupancy).
    pub fn relocate(&mut self, agent: AgentId, pos: GridPos) -> Result<(), EngineError> {
        let (kind, old, active) = match self.registry.agent(agent) {
            Some(a) => (a.kind, a.position, a.is_active),
            None => return Err(EngineError::UnknownAgentId { id: agent }),
        };
        if !pos.in_bounds(self.grid.width(), self.grid.height()) {
            return Err(EngineError::OutOfBounds { pos });
        }
        if pos == old {
            return Ok(());
        }
        if active && self.grid.count(kind, pos) > 0 {
            return Err(EngineError::CellOccupied { pos });
        }
        if active {
            self.grid.remove_instance(kind, old, agent);
            self.grid.decrement(kind, old);
            self.grid.increment(kind, pos);
            self.grid.insert_instance(kind, pos, agent);
        }
        if let Some(a) = self.registry.agent_mut(agent) {
            a.position = pos;
        }
        Ok(())
    }

    // ── Termination predicates and accessors ───────────────────────

    /// Whether no predator is active.
    pub fn is_no_predator(&self) -> bool {
        self.registry.active_count(Kind::Predator) == 0
    }

    /// Whether no prey is active.
    pub fn is_no_prey(&self) -> bool {
        self.registry.active_count(Kind::Prey) == 0
    }

    /// Whether no grass is active.
    pub fn is_no_grass(&self) -> bool {
        self.registry.active_count(Kind::Grass) == 0
    }

    /// Whether every slot of `kind` is already active (reproduction
    /// cannot recruit).
    pub fn is_no_creation_possible(&self, kind: Kind) -> bool {
        self.registry.active_count(kind) == self.config.n_possible(kind) as usize
    }

    /// Completed cycles this episode.
    pub fn cycle_count(&self) -> CycleId {
        self.cycle
    }

    /// The configured cycle ceiling the scheduler truncates at.
    pub fn max_cycles(&self) -> u64 {
        self.config.max_cycles
    }

    /// Size of the shared action space.
    pub fn n_actions(&self) -> usize {
        self.motion.len()
    }

    /// The active configuration.
    pub fn config(&self) -> &EcosystemConfig {
        &self.config
    }

    /// Read-only view of the occupancy index.
    pub fn grid(&self) -> &OccupancyGrid {
        &self.grid
    }

    /// Episode metrics and population time series.
    pub fn stats(&self) -> &EpisodeStats {
        &self.stats
    }

    /// Shared access to an agent slot.
    pub fn agent(&self, id: AgentId) -> Option<&Agent> {
        self.registry.agent(id)
    }

    /// Resolve a stable name to its id.
    pub fn id_of(&self, name: &str) -> Option<AgentId> {
        self.registry.id_of(name)
    }

    /// All allocated ids of `kind`, in creation order.
    pub fn ids(&self, kind: Kind) -> &[AgentId] {
        self.registry.ids(kind)
    }

    /// Currently active ids of `kind`.
    pub fn active_ids(&self, kind: Kind) -> &[AgentId] {
        self.registry.active_ids(kind)
    }

    /// Number of active agents of `kind`.
    pub fn active_count(&self, kind: Kind) -> usize {
        self.registry.active_count(kind)
    }
}

impl std::fmt::Debug for Ecosystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ecosystem")
            .field("cycle", &self.cycle)
            .field("seed", &self.config.seed)
            .field("active_predator", &self.active_count(Kind::Predator))
            .field("active_prey", &self.active_count(Kind::Prey))
            .field("active_grass", &self.active_count(Kind::Grass))
            .finish()
    }
}
