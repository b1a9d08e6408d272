//! Ecosystem configuration, validation, and per-kind parameter records.
//!
//! [`EcosystemConfig`] is the builder-input for constructing an
//! [`Ecosystem`](crate::Ecosystem). [`validate()`](EcosystemConfig::validate)
//! checks structural invariants at startup; the per-kind view used by
//! cycle resolution is resolved through
//! [`params()`](EcosystemConfig::params).

use std::error::Error;
use std::fmt;

use veld_agents::{MotionError, MotionTable};
use veld_core::Kind;
use veld_grid::GridError;
use veld_obs::WindowError;

/// Sight radius assigned to grass slots. Grass never drives a policy,
/// but every slot carries a valid odd range so `observe()` works
/// uniformly; 1 exposes only the window's center cell.
pub const GRASS_OBS_RANGE: u32 = 1;

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected during [`EcosystemConfig::validate()`].
#[derive(Debug, PartialEq)]
pub enum ConfigError {
    /// Grid has a zero-length axis.
    EmptyGrid {
        /// Configured width.
        width: u32,
        /// Configured height.
        height: u32,
    },
    /// The shared maximum observation window must be odd and positive.
    WindowNotOdd {
        /// The rejected window size.
        size: u32,
    },
    /// A per-kind observation range must be odd so its visible area
    /// has a center cell.
    ObservationRangeNotOdd {
        /// The kind with the invalid range.
        kind: Kind,
        /// The rejected range.
        range: u32,
    },
    /// A per-kind observation range exceeds the maximum window.
    ObservationRangeTooLarge {
        /// The kind with the invalid range.
        kind: Kind,
        /// The rejected range.
        range: u32,
        /// The shared maximum window size.
        max: u32,
    },
    /// More agents start active than slots exist for the kind.
    InitialExceedsPossible {
        /// The over-subscribed kind.
        kind: Kind,
        /// Configured initially-active count.
        initial: u32,
        /// Configured slot ceiling.
        possible: u32,
    },
    /// A kind's slot ceiling exceeds the number of grid cells, making
    /// distinct initial placement impossible.
    PopulationExceedsCells {
        /// The over-subscribed kind.
        kind: Kind,
        /// Configured slot ceiling.
        possible: u32,
        /// Number of grid cells.
        cells: u32,
    },
    /// Episode length must be at least one cycle.
    ZeroMaxCycles,
    /// The motion table parameters are invalid.
    Motion(MotionError),
    /// The observation window parameters are invalid.
    Window(WindowError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyGrid { width, height } => {
                write!(f, "grid must have at least one cell, got {width}x{height}")
            }
            Self::WindowNotOdd { size } => {
                write!(f, "max observation window must be odd, got {size}")
            }
            Self::ObservationRangeNotOdd { kind, range } => {
                write!(f, "{kind} observation range must be odd, got {range}")
            }
            Self::ObservationRangeTooLarge { kind, range, max } => {
                write!(
                    f,
                    "{kind} observation range {range} exceeds max window {max}"
                )
            }
            Self::InitialExceedsPossible {
                kind,
                initial,
                possible,
            } => {
                write!(
                    f,
                    "{kind}: {initial} initially active but only {possible} slots"
                )
            }
            Self::PopulationExceedsCells {
                kind,
                possible,
                cells,
            } => {
                write!(
                    f,
                    "{kind}: {possible} slots cannot be placed on {cells} cells"
                )
            }
            Self::ZeroMaxCycles => write!(f, "max_cycles must be at least 1"),
            Self::Motion(e) => write!(f, "motion: {e}"),
            Self::Window(e) => write!(f, "window: {e}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Motion(e) => Some(e),
            Self::Window(e) => Some(e),
            _ => None,
        }
    }
}

impl From<MotionError> for ConfigError {
    fn from(e: MotionError) -> Self {
        Self::Motion(e)
    }
}

impl From<WindowError> for ConfigError {
    fn from(e: WindowError) -> Self {
        Self::Window(e)
    }
}

impl From<GridError> for ConfigError {
    fn from(e: GridError) -> Self {
        // The occupancy grid only fails on a zero-sized axis, which
        // validate() reports the same way.
        let GridError::EmptyGrid { width, height } = e;
        Self::EmptyGrid { width, height }
    }
}

// ── KindParams ─────────────────────────────────────────────────────

/// The per-kind parameter record cycle resolution branches over.
///
/// Resolved from [`EcosystemConfig`] once per resolution pass; grass
/// carries zeros for the fields that only apply to learning kinds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KindParams {
    /// Energy granted on activation and transferred to offspring.
    pub initial_energy: f64,
    /// Energy delta applied at every cycle-end (metabolic cost for
    /// predator/prey, growth for grass).
    pub energy_gain_per_step: f64,
    /// Sight radius (odd, at most the max window).
    pub observation_range: u32,
    /// Reward component applied at every survived cycle.
    pub step_reward: f64,
    /// Reward bonus for a successful catch this cycle.
    pub catch_reward: f64,
    /// Reward assigned on removal (starvation or being eaten).
    pub death_reward: f64,
    /// Reward granted to a parent on reproduction.
    pub reproduction_reward: f64,
    /// Energy gained from a successful catch this cycle.
    pub catch_energy: f64,
    /// Energy level above which reproduction is attempted.
    pub creation_energy_threshold: f64,
    /// Whether this kind reproduces at all.
    pub reproduction_enabled: bool,
}

// ── EcosystemConfig ────────────────────────────────────────────────

/// Complete configuration for constructing an [`Ecosystem`](crate::Ecosystem).
///
/// Defaults mirror the reference parameterisation of the environment.
#[derive(Clone, Debug, PartialEq)]
pub struct EcosystemConfig {
    /// Grid width in cells.
    pub width: u32,
    /// Grid height in cells.
    pub height: u32,
    /// Cycle ceiling the external scheduler truncates at.
    pub max_cycles: u64,
    /// Predator slot ceiling.
    pub n_possible_predator: u32,
    /// Prey slot ceiling.
    pub n_possible_prey: u32,
    /// Grass slot ceiling (all grass starts active).
    pub n_possible_grass: u32,
    /// Predators active at reset.
    pub n_initial_active_predator: u32,
    /// Prey active at reset.
    pub n_initial_active_prey: u32,
    /// Shared maximum observation window (odd).
    pub max_observation_range: u32,
    /// Predator sight radius (odd, at most the max window).
    pub obs_range_predator: u32,
    /// Prey sight radius (odd, at most the max window).
    pub obs_range_prey: u32,
    /// Predator energy delta per cycle (typically negative).
    pub energy_gain_per_step_predator: f64,
    /// Prey energy delta per cycle (typically negative).
    pub energy_gain_per_step_prey: f64,
    /// Grass energy growth per cycle (accrues even while inactive).
    pub energy_gain_per_step_grass: f64,
    /// Predator energy at activation.
    pub initial_energy_predator: f64,
    /// Prey energy at activation.
    pub initial_energy_prey: f64,
    /// Grass energy at activation; also the regrowth threshold.
    pub initial_energy_grass: f64,
    /// Whether eaten grass regrows once its energy re-crosses the
    /// initial level.
    pub regrow_grass: bool,
    /// Predator reproduction energy threshold.
    pub predator_creation_energy_threshold: f64,
    /// Prey reproduction energy threshold.
    pub prey_creation_energy_threshold: f64,
    /// Whether predators reproduce.
    pub create_predator: bool,
    /// Whether prey reproduce.
    pub create_prey: bool,
    /// Predator reward per survived cycle.
    pub step_reward_predator: f64,
    /// Prey reward per survived cycle.
    pub step_reward_prey: f64,
    /// Predator reward for catching prey.
    pub catch_reward_prey: f64,
    /// Prey reward for grazing grass.
    pub catch_reward_grass: f64,
    /// Predator reward on death.
    pub death_reward_predator: f64,
    /// Prey reward on death.
    pub death_reward_prey: f64,
    /// Predator reward for reproducing.
    pub reproduction_reward_predator: f64,
    /// Prey reward for reproducing.
    pub reproduction_reward_prey: f64,
    /// Predator energy gained from a caught prey.
    pub catch_prey_energy: f64,
    /// Prey energy gained from grazed grass.
    pub catch_grass_energy: f64,
    /// Side length of the motion neighbourhood (odd).
    pub action_range: u32,
    /// Chebyshev (Moore) neighbourhood instead of Manhattan-limited.
    pub moore_neighborhood_actions: bool,
    /// RNG seed for deterministic placement and tie-breaking.
    pub seed: u64,
}

impl Default for EcosystemConfig {
    fn default() -> Self {
        Self {
            width: 16,
            height: 16,
            max_cycles: 10_000,
            n_possible_predator: 6,
            n_possible_prey: 8,
            n_possible_grass: 30,
            n_initial_active_predator: 6,
            n_initial_active_prey: 8,
            max_observation_range: 7,
            obs_range_predator: 5,
            obs_range_prey: 7,
            energy_gain_per_step_predator: -0.3,
            energy_gain_per_step_prey: -0.05,
            energy_gain_per_step_grass: 0.2,
            initial_energy_predator: 5.0,
            initial_energy_prey: 5.0,
            initial_energy_grass: 3.0,
            regrow_grass: false,
            predator_creation_energy_threshold: 10.0,
            prey_creation_energy_threshold: 10.0,
            create_predator: false,
            create_prey: false,
            step_reward_predator: -0.3,
            step_reward_prey: -0.05,
            catch_reward_prey: 5.0,
            catch_reward_grass: 3.0,
            death_reward_predator: -10.0,
            death_reward_prey: -10.0,
            reproduction_reward_predator: 10.0,
            reproduction_reward_prey: 10.0,
            catch_prey_energy: 5.0,
            catch_grass_energy: 3.0,
            action_range: 3,
            moore_neighborhood_actions: false,
            seed: 42,
        }
    }
}

impl EcosystemConfig {
    /// Validate all structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::EmptyGrid {
                width: self.width,
                height: self.height,
            });
        }
        if self.max_observation_range == 0 || self.max_observation_range % 2 == 0 {
            return Err(ConfigError::WindowNotOdd {
                size: self.max_observation_range,
            });
        }
        for kind in [Kind::Predator, Kind::Prey] {
            let range = self.params(kind).observation_range;
            if range == 0 || range % 2 == 0 {
                return Err(ConfigError::ObservationRangeNotOdd { kind, range });
            }
            if range > self.max_observation_range {
                return Err(ConfigError::ObservationRangeTooLarge {
                    kind,
                    range,
                    max: self.max_observation_range,
                });
            }
        }
        if self.n_initial_active_predator > self.n_possible_predator {
            return Err(ConfigError::InitialExceedsPossible {
                kind: Kind::Predator,
                initial: self.n_initial_active_predator,
                possible: self.n_possible_predator,
            });
        }
        if self.n_initial_active_prey > self.n_possible_prey {
            return Err(ConfigError::InitialExceedsPossible {
                kind: Kind::Prey,
                initial: self.n_initial_active_prey,
                possible: self.n_possible_prey,
            });
        }
        let cells = self.width * self.height;
        for kind in Kind::ALL {
            let possible = self.n_possible(kind);
            if possible > cells {
                return Err(ConfigError::PopulationExceedsCells {
                    kind,
                    possible,
                    cells,
                });
            }
        }
        if self.max_cycles == 0 {
            return Err(ConfigError::ZeroMaxCycles);
        }
        // Delegates the oddness check to the motion table constructor.
        MotionTable::new(self.action_range, self.moore_neighborhood_actions)?;
        Ok(())
    }

    /// Slot ceiling for `kind`.
    pub fn n_possible(&self, kind: Kind) -> u32 {
        match kind {
            Kind::Predator => self.n_possible_predator,
            Kind::Prey => self.n_possible_prey,
            Kind::Grass => self.n_possible_grass,
        }
    }

    /// Initially-active count for `kind` (all grass starts active).
    pub fn n_initial_active(&self, kind: Kind) -> u32 {
        match kind {
            Kind::Predator => self.n_initial_active_predator,
            Kind::Prey => self.n_initial_active_prey,
            Kind::Grass => self.n_possible_grass,
        }
    }

    /// Resolve the per-kind parameter record for `kind`.
    pub fn params(&self, kind: Kind) -> KindParams {
        match kind {
            Kind::Predator => KindParams {
                initial_energy: self.initial_energy_predator,
                energy_gain_per_step: self.energy_gain_per_step_predator,
                observation_range: self.obs_range_predator,
                step_reward: self.step_reward_predator,
                catch_reward: self.catch_reward_prey,
                death_reward: self.death_reward_predator,
                reproduction_reward: self.reproduction_reward_predator,
                catch_energy: self.catch_prey_energy,
                creation_energy_threshold: self.predator_creation_energy_threshold,
                reproduction_enabled: self.create_predator,
            },
            Kind::Prey => KindParams {
                initial_energy: self.initial_energy_prey,
                energy_gain_per_step: self.energy_gain_per_step_prey,
                observation_range: self.obs_range_prey,
                step_reward: self.step_reward_prey,
                catch_reward: self.catch_reward_grass,
                death_reward: self.death_reward_prey,
                reproduction_reward: self.reproduction_reward_prey,
                catch_energy: self.catch_grass_energy,
                creation_energy_threshold: self.prey_creation_energy_threshold,
                reproduction_enabled: self.create_prey,
            },
            Kind::Grass => KindParams {
                initial_energy: self.initial_energy_grass,
                energy_gain_per_step: self.energy_gain_per_step_grass,
                observation_range: GRASS_OBS_RANGE,
                step_reward: 0.0,
                catch_reward: 0.0,
                death_reward: 0.0,
                reproduction_reward: 0.0,
                catch_energy: 0.0,
                creation_energy_threshold: 0.0,
                reproduction_enabled: false,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn default_config_validates() {
        assert!(EcosystemConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_axis_rejected() {
        let cfg = EcosystemConfig {
            width: 0,
            ..EcosystemConfig::default()
        };
        match cfg.validate() {
            Err(ConfigError::EmptyGrid { width: 0, .. }) => {}
            other => panic!("expected EmptyGrid, got {other:?}"),
        }
    }

    #[test]
    fn even_window_rejected() {
        let cfg = EcosystemConfig {
            max_observation_range: 8,
            ..EcosystemConfig::default()
        };
        match cfg.validate() {
            Err(ConfigError::WindowNotOdd { size: 8 }) => {}
            other => panic!("expected WindowNotOdd, got {other:?}"),
        }
    }

    #[test]
    fn even_observation_range_rejected() {
        let cfg = EcosystemConfig {
            obs_range_predator: 4,
            ..EcosystemConfig::default()
        };
        match cfg.validate() {
            Err(ConfigError::ObservationRangeNotOdd {
                kind: Kind::Predator,
                range: 4,
            }) => {}
            other => panic!("expected ObservationRangeNotOdd, got {other:?}"),
        }
    }

    #[test]
    fn oversized_observation_range_rejected() {
        let cfg = EcosystemConfig {
            obs_range_prey: 9,
            ..EcosystemConfig::default()
        };
        match cfg.validate() {
            Err(ConfigError::ObservationRangeTooLarge {
                kind: Kind::Prey,
                range: 9,
                max: 7,
            }) => {}
            other => panic!("expected ObservationRangeTooLarge, got {other:?}"),
        }
    }

    #[test]
    fn initial_exceeding_possible_rejected() {
        let cfg = EcosystemConfig {
            n_initial_active_prey: 9,
            n_possible_prey: 8,
            ..EcosystemConfig::default()
        };
        match cfg.validate() {
            Err(ConfigError::InitialExceedsPossible {
                kind: Kind::Prey, ..
            }) => {}
            other => panic!("expected InitialExceedsPossible, got {other:?}"),
        }
    }

    #[test]
    fn population_exceeding_cells_rejected() {
        let cfg = EcosystemConfig {
            width: 4,
            height: 4,
            n_possible_grass: 17,
            ..EcosystemConfig::default()
        };
        match cfg.validate() {
            Err(ConfigError::PopulationExceedsCells {
                kind: Kind::Grass, ..
            }) => {}
            other => panic!("expected PopulationExceedsCells, got {other:?}"),
        }
    }

    #[test]
    fn even_action_range_rejected() {
        let cfg = EcosystemConfig {
            action_range: 2,
            ..EcosystemConfig::default()
        };
        match cfg.validate() {
            Err(ConfigError::Motion(MotionError::EvenActionRange { range: 2 })) => {}
            other => panic!("expected Motion(EvenActionRange), got {other:?}"),
        }
    }

    #[test]
    fn zero_max_cycles_rejected() {
        let cfg = EcosystemConfig {
            max_cycles: 0,
            ..EcosystemConfig::default()
        };
        match cfg.validate() {
            Err(ConfigError::ZeroMaxCycles) => {}
            other => panic!("expected ZeroMaxCycles, got {other:?}"),
        }
    }

    proptest! {
        #[test]
        fn any_odd_geometry_validates(half in 1u32..5, side in 6u32..20) {
            let cfg = EcosystemConfig {
                width: side,
                height: side,
                max_observation_range: 2 * half + 1,
                obs_range_predator: 2 * half + 1,
                obs_range_prey: 1,
                n_possible_grass: side,
                ..EcosystemConfig::default()
            };
            prop_assert!(cfg.validate().is_ok());
        }
    }

    #[test]
    fn params_resolve_per_kind() {
        let cfg = EcosystemConfig::default();
        let predator = cfg.params(Kind::Predator);
        assert_eq!(predator.catch_energy, 5.0);
        assert_eq!(predator.observation_range, 5);
        let prey = cfg.params(Kind::Prey);
        assert_eq!(prey.catch_reward, 3.0);
        assert!(!prey.reproduction_enabled);
        let grass = cfg.params(Kind::Grass);
        assert_eq!(grass.energy_gain_per_step, 0.2);
        assert_eq!(grass.observation_range, GRASS_OBS_RANGE);
    }
}
