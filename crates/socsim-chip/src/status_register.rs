// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! 16-bit hardware status register decoding
//!
//! Bit layout:
//! - bit 0: overheat interrupt
//! - bit 1: low-voltage warning
//! - bits 8-15: id of the core reporting the fault
//!
//! Stateless and independent of `ChipEngine`.

use serde::{Deserialize, Serialize};

use crate::DecodeError;

const OVERHEAT_BIT: u16 = 1 << 0;
const LOW_VOLTAGE_BIT: u16 = 1 << 1;
const CORE_ID_SHIFT: u16 = 8;

/// Decoded fault fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusRegister {
    pub overheat_fault: bool,
    pub voltage_fault: bool,
    pub reporting_core: u8,
}

impl StatusRegister {
    /// Decode hexadecimal text such as `"0x0A01"`; the `0x` prefix is optional
    ///
    /// Any number of hex digits is accepted. Only the low 16 bits are read.
    pub fn decode(register_hex: &str) -> Result<Self, DecodeError> {
        let trimmed = register_hex.trim();
        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);
        if digits.is_empty() {
            return Err(DecodeError::Empty);
        }

        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(DecodeError::InvalidHex(register_hex.to_string()));
        }

        // Low 16 bits live in the last four digits
        let low = &digits[digits.len().saturating_sub(4)..];
        let raw = u16::from_str_radix(low, 16).map_err(|_| DecodeError::InvalidHex(register_hex.to_string()))?;

        Ok(Self::from_raw(raw))
    }

    pub fn from_raw(raw: u16) -> Self {
        Self {
            overheat_fault: raw & OVERHEAT_BIT != 0,
            voltage_fault: raw & LOW_VOLTAGE_BIT != 0,
            reporting_core: (raw >> CORE_ID_SHIFT) as u8,
        }
    }

    /// Re-encode into the register layout (reserved bits 2-7 are zero)
    pub fn to_raw(&self) -> u16 {
        let mut raw = (self.reporting_core as u16) << CORE_ID_SHIFT;
        if self.overheat_fault {
            raw |= OVERHEAT_BIT;
        }
        if self.voltage_fault {
            raw |= LOW_VOLTAGE_BIT;
        }
        raw
    }
}
