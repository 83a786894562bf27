//! Injectable random source
//!
//! Every random roll in the simulation goes through [`RandomSource`], so a run
//! is reproducible from its seed and tests can script exact outcomes.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Source of uniform rolls in `[0, 1)`
pub trait RandomSource: std::fmt::Debug {
    fn next_unit(&mut self) -> f32;
}

/// Seeded PCG generator used for real runs
#[derive(Debug, Clone)]
pub struct SeededRng {
    seed: u64,
    rng: Pcg32,
}

impl SeededRng {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for SeededRng {
    fn next_unit(&mut self) -> f32 {
        self.rng.random::<f32>()
    }
}

/// Always returns the same roll
#[derive(Debug, Clone, Copy)]
pub struct ConstantRng(pub f32);

impl RandomSource for ConstantRng {
    fn next_unit(&mut self) -> f32 {
        self.0
    }
}

/// Replays a fixed sequence of rolls, cycling when exhausted
#[derive(Debug, Clone)]
pub struct ScriptedRng {
    rolls: Vec<f32>,
    cursor: usize,
}

impl ScriptedRng {
    pub fn new(rolls: Vec<f32>) -> Self {
        Self { rolls, cursor: 0 }
    }
}

impl RandomSource for ScriptedRng {
    fn next_unit(&mut self) -> f32 {
        if self.rolls.is_empty() {
            return 0.0;
        }
        let roll = self.rolls[self.cursor % self.rolls.len()];
        self.cursor += 1;
        roll
    }
}
