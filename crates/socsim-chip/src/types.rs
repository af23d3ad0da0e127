// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Chip state types
//!
//! Wire names (`"High Performance"`, `"Prime"`, ...) are part of the telemetry
//! contract and must not change.

use serde::{Deserialize, Serialize};

/// Number of CPU cores on the simulated SoC
pub const CORE_COUNT: usize = 8;

/// Cores `0..PRIME_CORE_COUNT` belong to the Prime cluster, the rest to Performance
pub const PRIME_CORE_COUNT: usize = 2;

/// Battery level after a reboot
pub const FACTORY_BATTERY_PERCENT: f64 = 100.0;

/// Die temperature after a reboot (°C)
pub const FACTORY_TEMP_C: f64 = 40.0;

/// Ambient floor; the die never reports below this (°C)
pub const AMBIENT_TEMP_C: f64 = 35.0;

/// CPU cluster a core belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cluster {
    Prime,
    Performance,
}

impl Cluster {
    /// Fixed cluster assignment by core index
    pub fn for_core(id: u8) -> Self {
        if (id as usize) < PRIME_CORE_COUNT {
            Cluster::Prime
        } else {
            Cluster::Performance
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Cluster::Prime => "Prime",
            Cluster::Performance => "Performance",
        }
    }
}

impl std::fmt::Display for Cluster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// PMIC power profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerMode {
    #[serde(rename = "High Performance")]
    HighPerformance,
    #[serde(rename = "Balance")]
    Balance,
    #[serde(rename = "Battery Saver")]
    BatterySaver,
    #[serde(rename = "Ultra Saver")]
    UltraSaver,
}

impl PowerMode {
    /// Modes a client may request; the saver modes are imposed by the PMIC only
    pub const USER_SELECTABLE: [PowerMode; 2] = [PowerMode::HighPerformance, PowerMode::Balance];

    pub fn as_str(&self) -> &'static str {
        match self {
            PowerMode::HighPerformance => "High Performance",
            PowerMode::Balance => "Balance",
            PowerMode::BatterySaver => "Battery Saver",
            PowerMode::UltraSaver => "Ultra Saver",
        }
    }

    pub fn is_user_selectable(&self) -> bool {
        Self::USER_SELECTABLE.contains(self)
    }
}

impl std::fmt::Display for PowerMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PowerMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "High Performance" => Ok(PowerMode::HighPerformance),
            "Balance" => Ok(PowerMode::Balance),
            "Battery Saver" => Ok(PowerMode::BatterySaver),
            "Ultra Saver" => Ok(PowerMode::UltraSaver),
            _ => Err(format!("Unknown power mode: {}", s)),
        }
    }
}

/// One CPU core
#[derive(Debug, Clone, PartialEq)]
pub struct CoreUnit {
    pub id: u8,
    pub cluster: Cluster,
    pub clock_ghz: f64,
    pub temp_c: f64,
}

impl CoreUnit {
    /// Core at its cluster's Balance-mode base clock and factory temperature
    pub fn factory(id: u8) -> Self {
        let cluster = Cluster::for_core(id);
        let profile = PowerMode::Balance.profile();
        Self {
            id,
            cluster,
            clock_ghz: profile.target_for(cluster),
            temp_c: FACTORY_TEMP_C,
        }
    }
}

/// Full-precision state of one chip, owned by a single `ChipEngine`
#[derive(Debug, Clone, PartialEq)]
pub struct ChipState {
    pub battery_percent: f64,
    pub global_temp_c: f64,
    pub power_mode: PowerMode,
    pub throttling: bool,
    /// Always `CORE_COUNT` entries in id order
    pub cores: Vec<CoreUnit>,
}

impl ChipState {
    pub fn factory() -> Self {
        Self {
            battery_percent: FACTORY_BATTERY_PERCENT,
            global_temp_c: FACTORY_TEMP_C,
            power_mode: PowerMode::Balance,
            throttling: false,
            cores: (0..CORE_COUNT as u8).map(CoreUnit::factory).collect(),
        }
    }
}

impl Default for ChipState {
    fn default() -> Self {
        Self::factory()
    }
}

/// Rounded per-core reading as reported in telemetry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoreReading {
    pub id: u8,
    pub cluster: Cluster,
    /// GHz, 2 decimals
    pub clock_ghz: f64,
    /// °C, 1 decimal
    pub temp_c: f64,
}

/// Immutable, presentation-rounded view of a chip after a tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChipSnapshot {
    pub battery_percent: f64,
    pub global_temp_c: f64,
    pub power_mode: PowerMode,
    pub throttling: bool,
    pub cores: Vec<CoreReading>,
}

impl ChipSnapshot {
    pub fn from_state(state: &ChipState) -> Self {
        Self {
            battery_percent: round_to(state.battery_percent, 1),
            global_temp_c: round_to(state.global_temp_c, 1),
            power_mode: state.power_mode,
            throttling: state.throttling,
            cores: state
                .cores
                .iter()
                .map(|core| CoreReading {
                    id: core.id,
                    cluster: core.cluster,
                    clock_ghz: round_to(core.clock_ghz, 2),
                    temp_c: round_to(core.temp_c, 1),
                })
                .collect(),
        }
    }

    /// `"THROTTLING"` while the thermal clamp is engaged, `"OPTIMAL"` otherwise
    pub fn thermal_status(&self) -> &'static str {
        if self.throttling {
            "THROTTLING"
        } else {
            "OPTIMAL"
        }
    }
}

/// Round half away from zero to `decimals` places
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cluster_assignment() {
        let state = ChipState::factory();
        assert_eq!(state.cores.len(), CORE_COUNT);
        for (index, core) in state.cores.iter().enumerate() {
            assert_eq!(core.id as usize, index);
            let expected = if index < 2 { Cluster::Prime } else { Cluster::Performance };
            assert_eq!(core.cluster, expected);
        }
    }

    #[test]
    fn test_power_mode_wire_names() {
        for mode in [
            PowerMode::HighPerformance,
            PowerMode::Balance,
            PowerMode::BatterySaver,
            PowerMode::UltraSaver,
        ] {
            assert_eq!(mode.as_str().parse::<PowerMode>().unwrap(), mode);
            let json = serde_json::to_string(&mode).unwrap();
            assert_eq!(json, format!("\"{}\"", mode.as_str()));
        }
        assert!("high performance".parse::<PowerMode>().is_err());
    }

    #[test]
    fn test_user_selectable_modes() {
        assert!(PowerMode::HighPerformance.is_user_selectable());
        assert!(PowerMode::Balance.is_user_selectable());
        assert!(!PowerMode::BatterySaver.is_user_selectable());
        assert!(!PowerMode::UltraSaver.is_user_selectable());
    }

    #[test]
    fn test_snapshot_rounding() {
        let mut state = ChipState::factory();
        state.battery_percent = 87.26;
        state.global_temp_c = 51.449;
        state.cores[0].clock_ghz = 3.5349;
        state.cores[0].temp_c = 52.06;

        let snapshot = ChipSnapshot::from_state(&state);
        assert_eq!(snapshot.battery_percent, 87.3);
        assert_eq!(snapshot.global_temp_c, 51.4);
        assert_eq!(snapshot.cores[0].clock_ghz, 3.53);
        assert_eq!(snapshot.cores[0].temp_c, 52.1);
        assert_eq!(snapshot.thermal_status(), "OPTIMAL");
    }
}
