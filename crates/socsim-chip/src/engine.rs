// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Per-device power/thermal state machine
//!
//! Time only moves when `advance()` is called; there is no background clock.

use std::sync::atomic::{AtomicU64, Ordering};

use tracing::{debug, info};

use crate::policy::{mode_change_allowed, resolve_power_mode, ThermalGovernor};
use crate::rng::{EntropyJitter, JitterBounds, JitterSource, NoJitter, SeededJitter};
use crate::types::{ChipSnapshot, ChipState, PowerMode, AMBIENT_TEMP_C};
use crate::{ChipError, ChipResult};

/// Simulated SoC power management firmware for one device
pub struct ChipEngine {
    state: ChipState,
    jitter: Box<dyn JitterSource>,
    bounds: JitterBounds,
    ticks: u64,
}

impl std::fmt::Debug for ChipEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChipEngine")
            .field("state", &self.state)
            .field("bounds", &self.bounds)
            .field("ticks", &self.ticks)
            .finish_non_exhaustive()
    }
}

impl ChipEngine {
    /// Engine in factory state using `jitter` for all noise draws
    pub fn new(jitter: Box<dyn JitterSource>, bounds: JitterBounds) -> Self {
        Self {
            state: ChipState::factory(),
            jitter,
            bounds,
            ticks: 0,
        }
    }

    /// Engine with no noise; every tick is exact
    pub fn deterministic() -> Self {
        Self::new(Box::new(NoJitter), JitterBounds::default())
    }

    /// Run one policy + physics step and return the resulting snapshot
    pub fn advance(&mut self) -> ChipSnapshot {
        let s = &mut self.state;

        let resolved = resolve_power_mode(s.battery_percent, s.power_mode);
        if resolved != s.power_mode {
            info!(
                target: "socsim-chip",
                "PMIC override: {} -> {} (battery {:.1}%)",
                s.power_mode, resolved, s.battery_percent
            );
            s.power_mode = resolved;
        }

        let mut profile = s.power_mode.profile();

        let throttling = ThermalGovernor::evaluate(s.throttling, s.global_temp_c);
        if throttling != s.throttling {
            info!(
                target: "socsim-chip",
                "Thermal governor: throttling {} at {:.1}°C",
                if throttling { "engaged" } else { "released" },
                s.global_temp_c
            );
            s.throttling = throttling;
        }
        if s.throttling {
            profile = profile.throttled();
        }

        s.battery_percent = (s.battery_percent - profile.drain_per_tick).max(0.0);
        let noise = self.jitter.sample(self.bounds.global_temp_c);
        s.global_temp_c = (s.global_temp_c + profile.thermal_load_per_tick + noise).max(AMBIENT_TEMP_C);

        for core in s.cores.iter_mut() {
            core.clock_ghz = profile.target_for(core.cluster) + self.jitter.sample(self.bounds.core_clock_ghz);
            core.temp_c = s.global_temp_c + self.jitter.sample(self.bounds.core_temp_c);
        }

        self.ticks += 1;
        debug!(
            target: "socsim-chip",
            "tick {}: battery={:.2}% temp={:.2}°C mode={} throttling={}",
            self.ticks, s.battery_percent, s.global_temp_c, s.power_mode, s.throttling
        );

        ChipSnapshot::from_state(&self.state)
    }

    /// Select a user mode. Takes effect on the next `advance()`.
    pub fn set_mode(&mut self, requested: PowerMode) -> ChipResult<()> {
        if !requested.is_user_selectable() {
            return Err(ChipError::InvalidMode(requested.to_string()));
        }
        if !mode_change_allowed(self.state.battery_percent) {
            return Err(ChipError::PowerPolicyViolation {
                battery_percent: self.state.battery_percent,
            });
        }
        info!(target: "socsim-chip", "Power mode set to {}", requested);
        self.state.power_mode = requested;
        Ok(())
    }

    /// Parse a wire mode name and apply it with `set_mode`
    pub fn request_mode(&mut self, requested: &str) -> ChipResult<PowerMode> {
        let mode = requested
            .parse::<PowerMode>()
            .map_err(|_| ChipError::InvalidMode(requested.to_string()))?;
        self.set_mode(mode)?;
        Ok(mode)
    }

    /// Restore factory defaults
    pub fn reboot(&mut self) {
        self.state = ChipState::factory();
        self.ticks = 0;
        info!(target: "socsim-chip", "SoC rebooted to factory state");
    }

    /// Current full-precision state
    pub fn state(&self) -> &ChipState {
        &self.state
    }

    /// Ticks since creation or last reboot
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Bench hook: force the battery level, clamped to 0–100
    pub fn set_battery_percent(&mut self, percent: f64) {
        self.state.battery_percent = percent.clamp(0.0, 100.0);
    }

    /// Bench hook: force the die temperature, floored at ambient
    pub fn set_global_temp_c(&mut self, temp_c: f64) {
        self.state.global_temp_c = temp_c.max(AMBIENT_TEMP_C);
    }
}

/// How new engines obtain their noise
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JitterMode {
    Entropy,
    /// Engine `n` is seeded with `base + n`
    Seeded(u64),
    Disabled,
}

/// Builds engines for the session registry
#[derive(Debug)]
pub struct ChipEngineFactory {
    bounds: JitterBounds,
    mode: JitterMode,
    built: AtomicU64,
}

impl ChipEngineFactory {
    pub fn new(bounds: JitterBounds, mode: JitterMode) -> Self {
        Self {
            bounds,
            mode,
            built: AtomicU64::new(0),
        }
    }

    pub fn deterministic() -> Self {
        Self::new(JitterBounds::default(), JitterMode::Disabled)
    }

    pub fn build(&self) -> ChipEngine {
        let n = self.built.fetch_add(1, Ordering::Relaxed);
        let jitter: Box<dyn JitterSource> = match self.mode {
            JitterMode::Entropy => Box::new(EntropyJitter),
            JitterMode::Seeded(base) => Box::new(SeededJitter::new(base.wrapping_add(n))),
            JitterMode::Disabled => Box::new(NoJitter),
        };
        ChipEngine::new(jitter, self.bounds)
    }

    pub fn engines_built(&self) -> u64 {
        self.built.load(Ordering::Relaxed)
    }
}

impl Default for ChipEngineFactory {
    fn default() -> Self {
        Self::new(JitterBounds::default(), JitterMode::Entropy)
    }
}
