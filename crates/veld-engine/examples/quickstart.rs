//! Veld Quickstart — a complete, minimal episode from scratch.
//!
//! Demonstrates:
//!   1. Building an EcosystemConfig with reproduction and regrowth
//!   2. Driving cycles with a seeded random policy
//!   3. Reading rewards, observations, and termination predicates
//!   4. Inspecting episode statistics and resetting
//!
//! Run with:
//!   cargo run --example quickstart

use rand::{RngExt, SeedableRng};
use rand_chacha::ChaCha8Rng;
use veld_core::{GridPos, Kind};
use veld_engine::{Ecosystem, EcosystemConfig};

// ─── Episode parameters ─────────────────────────────────────────

const SEED: u64 = 42;
const MAX_CYCLES: u64 = 200;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Veld Quickstart ===\n");

    // 1. Configure a 16x16 ecosystem with the full lifecycle enabled.
    let config = EcosystemConfig {
        regrow_grass: true,
        create_predator: true,
        create_prey: true,
        max_cycles: MAX_CYCLES,
        seed: SEED,
        ..EcosystemConfig::default()
    };
    let mut eco = Ecosystem::new(config)?;
    println!(
        "Ecosystem created: {}x{} grid, {} predators / {} prey / {} grass active, seed {}\n",
        eco.config().width,
        eco.config().height,
        eco.active_count(Kind::Predator),
        eco.active_count(Kind::Prey),
        eco.active_count(Kind::Grass),
        SEED,
    );

    // 2. Drive cycles with a seeded random policy. The scheduler role:
    //    pick each active agent once per cycle, flag the last step.
    let mut policy = ChaCha8Rng::seed_from_u64(SEED);
    let n_actions = eco.n_actions();
    while eco.cycle_count().0 < eco.max_cycles() {
        let mut roster = eco.active_ids(Kind::Predator).to_vec();
        roster.extend_from_slice(eco.active_ids(Kind::Prey));
        if roster.is_empty() {
            break;
        }
        let last = roster.len() - 1;
        for (i, id) in roster.into_iter().enumerate() {
            let action = policy.random_range(0..n_actions);
            eco.step(action, id, i == last)?;
        }

        let cycle = eco.cycle_count().0;
        if cycle % 25 == 0 {
            println!(
                "  cycle {:>4}: predators={:>2} prey={:>2} grass={:>2}",
                cycle,
                eco.active_count(Kind::Predator),
                eco.active_count(Kind::Prey),
                eco.active_count(Kind::Grass),
            );
        }
        if eco.is_no_predator() || eco.is_no_prey() {
            println!(
                "\nEpisode terminated at cycle {}: {}",
                cycle,
                if eco.is_no_predator() {
                    "all predators starved"
                } else {
                    "all prey eaten or starved"
                }
            );
            break;
        }
    }

    // 3. Sample one observation and one reward readout.
    if let Some(&id) = eco.active_ids(Kind::Predator).first() {
        let name = eco
            .agent(id)
            .map(|a| a.name.clone())
            .unwrap_or_default();
        let window = eco.observe(&name)?;
        println!(
            "\n{name}: observation shape {:?}, last reward {:?}",
            window.shape(),
            eco.reward(&name),
        );
    }

    // 4. Final population map.
    println!("\nFinal grid (P=predator, p=prey, *=grass):");
    for y in 0..eco.config().height as i32 {
        let row: String = (0..eco.config().width as i32)
            .map(|x| {
                let pos = GridPos::new(x, y);
                if eco.grid().count(Kind::Predator, pos) > 0 {
                    'P'
                } else if eco.grid().count(Kind::Prey, pos) > 0 {
                    'p'
                } else if eco.grid().count(Kind::Grass, pos) > 0 {
                    '*'
                } else {
                    '.'
                }
            })
            .collect();
        println!("  {row}");
    }

    // 5. Episode statistics.
    let stats = eco.stats();
    println!(
        "\nStats: starved {} predators / {} prey, {} prey eaten, born {} predators / {} prey",
        stats.n_starved_predator,
        stats.n_starved_prey,
        stats.n_eaten_prey,
        stats.n_born_predator,
        stats.n_born_prey,
    );

    // 6. Reset for a fresh episode under a new seed.
    eco.reset(Some(123));
    println!(
        "\nReset to seed 123: cycle {}, {} prey active. Done.",
        eco.cycle_count(),
        eco.active_count(Kind::Prey),
    );
    Ok(())
}
