//! Cycle resolution engine for Veld simulations.
//!
//! [`Ecosystem`] is the primary user-facing API: an external turn
//! scheduler steps one agent at a time, flags the last step of each
//! cycle, and reads rewards, observations, and termination predicates
//! back out. All mutable simulation state lives inside the engine
//! object; there is no ambient or global state.
//!
//! # Ownership model
//!
//! `Ecosystem` is a plain owned value; all mutating methods take
//! `&mut self` and every read-out borrows `&self`. Nothing suspends or
//! blocks — a step either completes fully or fails fast with an
//! [`EngineError`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod ecosystem;
pub mod error;
pub(crate) mod flags;
pub mod stats;

pub use config::{ConfigError, EcosystemConfig, KindParams, GRASS_OBS_RANGE};
pub use ecosystem::Ecosystem;
pub use error::EngineError;
pub use stats::EpisodeStats;
