//! The agent kind taxonomy and its observation channel mapping.

use std::fmt;

/// Observation channel reserved for grid boundary ("wall") presence.
///
/// The wall channel has no agent instances behind it; it encodes
/// out-of-bounds cells in observation windows.
pub const WALL_CHANNEL: usize = 0;

/// Total number of observation channels: wall plus one per [`Kind`].
pub const OBS_CHANNELS: usize = 4;

/// The category of an agent, fixed for its lifetime.
///
/// Kind-specific parameters (energy deltas, rewards, observation
/// ranges) live in the engine configuration; this enum is the tag the
/// engine branches on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    /// Hunts prey; starves without catches.
    Predator,
    /// Grazes on grass; hunted by predators.
    Prey,
    /// Stationary forage; may regrow after being eaten.
    Grass,
}

impl Kind {
    /// All kinds in resolution order: predators, then prey, then grass.
    pub const ALL: [Kind; 3] = [Kind::Predator, Kind::Prey, Kind::Grass];

    /// Dense index in `0..3`, used for per-kind storage planes.
    pub fn index(self) -> usize {
        match self {
            Kind::Predator => 0,
            Kind::Prey => 1,
            Kind::Grass => 2,
        }
    }

    /// Observation channel for this kind (channel 0 is the wall).
    pub fn channel(self) -> usize {
        self.index() + 1
    }

    /// Lowercase label used to derive agent names (`predator_3`).
    pub fn label(self) -> &'static str {
        match self {
            Kind::Predator => "predator",
            Kind::Prey => "prey",
            Kind::Grass => "grass",
        }
    }

    /// Whether agents of this kind act and learn (predator/prey) as
    /// opposed to being passive forage (grass).
    pub fn is_learning(self) -> bool {
        !matches!(self, Kind::Grass)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
