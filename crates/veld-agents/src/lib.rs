//! Agent entities and population bookkeeping for Veld simulations.
//!
//! Defines the mutable per-agent state ([`Agent`]), the fixed motion
//! offset table actions index into ([`MotionTable`]), and the
//! [`PopulationRegistry`] that owns every allocated agent slot and
//! tracks which slots are currently active. Slots toggle between
//! active and dormant over an episode; allocation happens once.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod agent;
pub mod motion;
pub mod registry;

pub use agent::Agent;
pub use motion::{MotionError, MotionTable};
pub use registry::PopulationRegistry;
