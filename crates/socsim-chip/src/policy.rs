// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! PMIC policy table and thermal governor
//!
//! Resolution order for every tick:
//! 1. battery override (`resolve_power_mode`)
//! 2. per-mode profile lookup (`PowerMode::profile`)
//! 3. thermal clamp (`ThermalGovernor`), which always wins

use crate::types::{Cluster, PowerMode};

/// Battery level at or below which `UltraSaver` is forced (%)
pub const ULTRA_SAVER_THRESHOLD: f64 = 5.0;

/// Battery level at or below which `BatterySaver` is forced and mode requests are refused (%)
pub const BATTERY_SAVER_THRESHOLD: f64 = 20.0;

/// Die temperature above which throttling engages (°C)
pub const THROTTLE_ENGAGE_C: f64 = 85.0;

/// Die temperature below which throttling releases (°C)
pub const THROTTLE_RELEASE_C: f64 = 65.0;

/// Clock targets and per-tick physics for one power mode
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModeProfile {
    pub prime_target_ghz: f64,
    pub perf_target_ghz: f64,
    /// Battery percentage points drained per tick
    pub drain_per_tick: f64,
    /// Die temperature change per tick before jitter (°C)
    pub thermal_load_per_tick: f64,
}

impl ModeProfile {
    pub fn target_for(&self, cluster: Cluster) -> f64 {
        match cluster {
            Cluster::Prime => self.prime_target_ghz,
            Cluster::Performance => self.perf_target_ghz,
        }
    }

    /// Apply the thermal safety clamp. Drain is left as the active mode's.
    pub fn throttled(self) -> Self {
        Self {
            prime_target_ghz: THROTTLE_PROFILE.prime_target_ghz,
            perf_target_ghz: THROTTLE_PROFILE.perf_target_ghz,
            drain_per_tick: self.drain_per_tick,
            thermal_load_per_tick: THROTTLE_PROFILE.thermal_load_per_tick,
        }
    }
}

const HIGH_PERFORMANCE_PROFILE: ModeProfile = ModeProfile {
    prime_target_ghz: 4.32,
    perf_target_ghz: 3.53,
    drain_per_tick: 0.45,
    thermal_load_per_tick: 2.2,
};

const BALANCE_PROFILE: ModeProfile = ModeProfile {
    prime_target_ghz: 3.53,
    perf_target_ghz: 2.80,
    drain_per_tick: 0.15,
    thermal_load_per_tick: 0.4,
};

const BATTERY_SAVER_PROFILE: ModeProfile = ModeProfile {
    prime_target_ghz: 2.00,
    perf_target_ghz: 1.60,
    drain_per_tick: 0.05,
    thermal_load_per_tick: -0.8,
};

const ULTRA_SAVER_PROFILE: ModeProfile = ModeProfile {
    prime_target_ghz: 1.20,
    perf_target_ghz: 0.80,
    drain_per_tick: 0.02,
    thermal_load_per_tick: -2.0,
};

/// Clock cap and forced cooling while throttling. `drain_per_tick` is unused.
pub const THROTTLE_PROFILE: ModeProfile = ModeProfile {
    prime_target_ghz: 1.80,
    perf_target_ghz: 1.40,
    drain_per_tick: 0.0,
    thermal_load_per_tick: -3.5,
};

impl PowerMode {
    pub fn profile(&self) -> ModeProfile {
        match self {
            PowerMode::HighPerformance => HIGH_PERFORMANCE_PROFILE,
            PowerMode::Balance => BALANCE_PROFILE,
            PowerMode::BatterySaver => BATTERY_SAVER_PROFILE,
            PowerMode::UltraSaver => ULTRA_SAVER_PROFILE,
        }
    }
}

/// Battery override: low charge forces a saver mode, otherwise the current mode stands
pub fn resolve_power_mode(battery_percent: f64, current: PowerMode) -> PowerMode {
    if battery_percent <= ULTRA_SAVER_THRESHOLD {
        PowerMode::UltraSaver
    } else if battery_percent <= BATTERY_SAVER_THRESHOLD {
        PowerMode::BatterySaver
    } else {
        current
    }
}

/// Whether a client may switch modes at this battery level
pub fn mode_change_allowed(battery_percent: f64) -> bool {
    battery_percent > BATTERY_SAVER_THRESHOLD
}

/// Hysteresis governor for the throttling flag
#[derive(Debug, Clone, Copy, Default)]
pub struct ThermalGovernor;

impl ThermalGovernor {
    /// Next throttling state. Inside the 65–85 °C band the flag is sticky.
    pub fn evaluate(throttling: bool, global_temp_c: f64) -> bool {
        if global_temp_c > THROTTLE_ENGAGE_C {
            true
        } else if global_temp_c < THROTTLE_RELEASE_C {
            false
        } else {
            throttling
        }
    }
}
