//! Veld: a grid-based predator-prey-grass ecosystem simulation for
//! multi-agent decision-making research.
//!
//! This is the top-level facade crate that re-exports the public API
//! from all Veld sub-crates. For most users, adding `veld` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use veld::prelude::*;
//!
//! // Build the default 16x16 ecosystem, seeded for replay.
//! let config = EcosystemConfig {
//!     seed: 42,
//!     ..EcosystemConfig::default()
//! };
//! let mut eco = Ecosystem::new(config).unwrap();
//!
//! // One cycle: every active agent steps once; the last step commits
//! // deferred consumption, starvation, and reproduction outcomes.
//! let mut agents = eco.active_ids(Kind::Predator).to_vec();
//! agents.extend_from_slice(eco.active_ids(Kind::Prey));
//! let last = agents.len() - 1;
//! const STAY: usize = 2;
//! for (i, id) in agents.into_iter().enumerate() {
//!     eco.step(STAY, id, i == last).unwrap();
//! }
//! assert_eq!(eco.cycle_count().0, 1);
//!
//! // Observations are fixed-shape multi-channel windows.
//! let window = eco.observe("predator_0").unwrap();
//! assert_eq!(window.shape(), (OBS_CHANNELS, 7, 7));
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in
//! the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `veld-core` | IDs, the kind taxonomy, grid positions |
//! | [`grid`] | `veld-grid` | The per-cell occupancy index |
//! | [`agents`] | `veld-agents` | Agent entities, motion tables, the registry |
//! | [`obs`] | `veld-obs` | Observation window extraction |
//! | [`engine`] | `veld-engine` | The cycle resolution engine and its config |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types and IDs (`veld-core`).
pub use veld_core as types;

/// The per-cell occupancy index (`veld-grid`).
pub use veld_grid as grid;

/// Agent entities and population bookkeeping (`veld-agents`).
pub use veld_agents as agents;

/// Observation window extraction (`veld-obs`).
pub use veld_obs as obs;

/// The cycle resolution engine (`veld-engine`).
pub use veld_engine as engine;

/// Common imports for typical Veld usage.
///
/// ```rust
/// use veld::prelude::*;
/// ```
pub mod prelude {
    // Core vocabulary
    pub use veld_core::{AgentId, CycleId, GridPos, Kind, OBS_CHANNELS, WALL_CHANNEL};

    // Occupancy
    pub use veld_grid::{GridError, OccupancyGrid};

    // Agents
    pub use veld_agents::{Agent, MotionTable, PopulationRegistry};

    // Observation
    pub use veld_obs::{ObsWindow, WindowBuilder, WindowError};

    // Engine
    pub use veld_engine::{
        ConfigError, Ecosystem, EcosystemConfig, EngineError, EpisodeStats, KindParams,
    };
}
