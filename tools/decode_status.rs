// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Status Register Decoder

Decodes 16-bit hardware status registers and prints one JSON object per
argument.

Usage:
  cargo run --bin decode-status -- 0x0A01 FF02
*/

use std::env;
use std::process::ExitCode;

use socsim::chip::StatusRegister;

fn main() -> ExitCode {
    let registers: Vec<String> = env::args().skip(1).collect();
    if registers.is_empty() {
        eprintln!("Usage: decode-status <register_hex> [<register_hex> ...]");
        eprintln!("\nExample:\n  decode-status 0x0A01");
        return ExitCode::FAILURE;
    }

    let mut failed = false;
    for register in &registers {
        match StatusRegister::decode(register) {
            Ok(status) => match serde_json::to_string(&status) {
                Ok(json) => println!("{}", json),
                Err(e) => {
                    eprintln!("Error: {}: {}", register, e);
                    failed = true;
                }
            },
            Err(e) => {
                eprintln!("Error: {}: {}", register, e);
                failed = true;
            }
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
