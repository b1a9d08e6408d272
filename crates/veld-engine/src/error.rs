//! Error types for engine entry points.

use std::error::Error;
use std::fmt;

use veld_core::{AgentId, GridPos};
use veld_obs::WindowError;

/// Errors from [`Ecosystem`](crate::Ecosystem) entry points.
///
/// All of these indicate caller bugs or violated preconditions; the
/// simulation is deterministic and has no transient failures.
#[derive(Clone, Debug, PartialEq)]
pub enum EngineError {
    /// The action index is outside the motion table.
    InvalidAction {
        /// The rejected action.
        action: usize,
        /// Size of the motion table.
        n_actions: usize,
    },
    /// No agent slot with this id exists.
    UnknownAgentId {
        /// The unresolved id.
        id: AgentId,
    },
    /// No agent with this name exists.
    UnknownName {
        /// The unresolved name.
        name: String,
    },
    /// A target cell lies outside the grid.
    OutOfBounds {
        /// The rejected position.
        pos: GridPos,
    },
    /// A target cell is already occupied by an agent of the same kind.
    CellOccupied {
        /// The contested position.
        pos: GridPos,
    },
    /// Observation extraction failed.
    Window(WindowError),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidAction { action, n_actions } => {
                write!(f, "action {action} outside motion table of {n_actions}")
            }
            Self::UnknownAgentId { id } => write!(f, "unknown agent id {id}"),
            Self::UnknownName { name } => write!(f, "unknown agent name '{name}'"),
            Self::OutOfBounds { pos } => write!(f, "position {pos} outside the grid"),
            Self::CellOccupied { pos } => {
                write!(f, "cell {pos} already holds an agent of that kind")
            }
            Self::Window(e) => write!(f, "observation: {e}"),
        }
    }
}

impl Error for EngineError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Window(e) => Some(e),
            _ => None,
        }
    }
}

impl From<WindowError> for EngineError {
    fn from(e: WindowError) -> Self {
        Self::Window(e)
    }
}
