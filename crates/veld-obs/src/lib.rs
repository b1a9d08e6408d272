//! Partial observation windows for Veld simulations.
//!
//! The [`WindowBuilder`] extracts a fixed-size, multi-channel view of
//! the occupancy grid centered on an agent: channel 0 encodes grid
//! boundary ("wall") presence, the remaining channels carry per-kind
//! occupancy counts. Windows are clipped at grid edges and masked down
//! to the requesting agent's own sight radius while keeping a uniform
//! tensor shape across agents. Extraction is strictly read-only.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod builder;
pub mod error;
pub mod window;

pub use builder::WindowBuilder;
pub use error::WindowError;
pub use window::ObsWindow;
