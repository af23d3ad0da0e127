// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Jitter sources for the physics step.

Each `ChipEngine` owns one source, so sessions never share a generator:
- `EntropyJitter`: `rand::thread_rng()` (production)
- `SeededJitter`: `StdRng` seeded from a `u64` (reproducible runs, tests)
- `NoJitter`: always zero (exact assertions)
*/

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Symmetric uniform noise
pub trait JitterSource: Send {
    /// Uniform sample from `[-bound, bound]`. A non-positive bound yields 0.
    fn sample(&mut self, bound: f64) -> f64;
}

fn uniform<R: Rng + ?Sized>(rng: &mut R, bound: f64) -> f64 {
    if bound.is_nan() || bound <= 0.0 {
        return 0.0;
    }
    rng.gen_range(-bound..=bound)
}

#[derive(Debug, Default, Clone, Copy)]
pub struct EntropyJitter;

impl JitterSource for EntropyJitter {
    fn sample(&mut self, bound: f64) -> f64 {
        uniform(&mut rand::thread_rng(), bound)
    }
}

#[derive(Debug, Clone)]
pub struct SeededJitter {
    rng: StdRng,
}

impl SeededJitter {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl JitterSource for SeededJitter {
    fn sample(&mut self, bound: f64) -> f64 {
        uniform(&mut self.rng, bound)
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoJitter;

impl JitterSource for NoJitter {
    fn sample(&mut self, _bound: f64) -> f64 {
        0.0
    }
}

/// Noise band half-widths applied once per tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JitterBounds {
    /// Die temperature noise (°C)
    pub global_temp_c: f64,
    /// Per-core clock noise (GHz)
    pub core_clock_ghz: f64,
    /// Per-core temperature offset from the die (°C)
    pub core_temp_c: f64,
}

impl Default for JitterBounds {
    fn default() -> Self {
        Self {
            global_temp_c: 0.3,
            core_clock_ghz: 0.03,
            core_temp_c: 1.5,
        }
    }
}
