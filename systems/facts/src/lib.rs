#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Seeded biome fact lookup.
//!
//! Entering a cell has a configurable chance of surfacing one fact about its
//! biome. The generator is seeded so a replayed command stream shares the same
//! facts.

use abyssal_core::Biome;
use rand::{seq::SliceRandom, Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Probability that entering a cell with a known biome shares a fact.
pub const DEFAULT_FACT_CHANCE: f64 = 0.25;

const VENT_FACTS: &[&str] = &[
    "Hydrothermal vents can exceed 400°C, yet the water stays liquid under the pressure.",
    "Vent bacteria use chemosynthesis, turning hydrogen sulfide into energy without sunlight.",
];

const TRENCH_FACTS: &[&str] = &[
    "Trenches reach pressures above 1000 atmospheres.",
    "Amphipods in the deepest trenches digest wood that sinks from the surface.",
];

const SEAMOUNT_FACTS: &[&str] = &[
    "Deep sea corals grow extremely slowly, often less than 1 cm per year.",
    "Seamounts deflect currents upward, pulling nutrients toward the light.",
];

const SLOPE_FACTS: &[&str] = &[
    "Apex predators often rely on low-light ambush hunting.",
    "Some predators track electrical signals emitted by prey.",
];

const PLAIN_FACTS: &[&str] = &[
    "Abyssal plains cover roughly half of the Earth's surface.",
    "Manganese nodules on the plain grow only a few millimetres per million years.",
];

/// Configuration parameters required to construct the fact system.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Config {
    chance: f64,
    seed: u64,
}

impl Config {
    /// Creates a configuration; `chance` is clamped to `[0, 1]`.
    #[must_use]
    pub fn new(chance: f64, seed: u64) -> Self {
        let chance = if chance.is_nan() {
            0.0
        } else {
            chance.clamp(0.0, 1.0)
        };
        Self { chance, seed }
    }

    /// Probability of sharing a fact per eligible cell.
    #[must_use]
    pub const fn chance(&self) -> f64 {
        self.chance
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_FACT_CHANCE, 0)
    }
}

/// Facts available for a biome; empty for biomes without a table.
#[must_use]
pub fn facts_for(biome: &Biome) -> &'static [&'static str] {
    match biome {
        Biome::Hydrothermal => VENT_FACTS,
        Biome::Trench => TRENCH_FACTS,
        Biome::Seamount => SEAMOUNT_FACTS,
        Biome::Slope => SLOPE_FACTS,
        Biome::Plain => PLAIN_FACTS,
        Biome::Other(_) | Biome::Unknown => &[],
    }
}

/// Probabilistic biome fact lookup.
#[derive(Clone, Debug)]
pub struct Facts {
    chance: f64,
    rng: ChaCha8Rng,
}

impl Facts {
    /// Creates a fact system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            chance: config.chance,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
        }
    }

    /// Draws a fact for `biome`, or `None` when the biome has no facts or the draw misses.
    pub fn lookup(&mut self, biome: &Biome) -> Option<&'static str> {
        let facts = facts_for(biome);
        if facts.is_empty() || !self.rng.gen_bool(self.chance) {
            return None;
        }
        facts.choose(&mut self.rng).copied()
    }
}

impl Default for Facts {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
