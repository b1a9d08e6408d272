//! Benchmark profiles for the Veld ecosystem simulation.
//!
//! Provides pre-built [`EcosystemConfig`] profiles shared by the
//! criterion benches:
//!
//! - [`reference_profile`]: the default 16x16 grid with reproduction
//!   and regrowth enabled
//! - [`stress_profile`]: a 64x64 grid with large populations

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use veld_engine::EcosystemConfig;

/// The default-sized benchmark profile with every lifecycle feature
/// enabled.
pub fn reference_profile(seed: u64) -> EcosystemConfig {
    EcosystemConfig {
        regrow_grass: true,
        create_predator: true,
        create_prey: true,
        seed,
        ..EcosystemConfig::default()
    }
}

/// A 64x64 stress profile with large per-kind populations.
pub fn stress_profile(seed: u64) -> EcosystemConfig {
    EcosystemConfig {
        width: 64,
        height: 64,
        n_possible_predator: 40,
        n_possible_prey: 60,
        n_possible_grass: 400,
        n_initial_active_predator: 30,
        n_initial_active_prey: 50,
        regrow_grass: true,
        create_predator: true,
        create_prey: true,
        seed,
        ..EcosystemConfig::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profiles_validate() {
        reference_profile(42).validate().unwrap();
        stress_profile(42).validate().unwrap();
    }
}
