//! `boardc list` — structural dry run listing every entity.

use anyhow::Result;

use crate::board::Board;
use crate::commands::builtin_parsers;
use crate::driver::{compile, Mode};

/// Parse the board without checking reference existence and list entities.
pub fn run(board: &Board) -> Result<()> {
    let compiled = compile(board, &builtin_parsers(), Mode::DryRun)?;

    println!("Peripherals:");
    for p in &compiled.peripherals {
        println!("  {:<24} {:<8} {} {}", p.name, p.kind, p.descriptor.struct_type, p.var);
    }
    println!();
    println!("Devices:");
    for d in &compiled.devices {
        println!("  {:<24} {:<12} {} {}", d.name, d.kind, d.descriptor.struct_type, d.var);
    }
    println!();
    println!("Includes:");
    for header in &compiled.includes {
        println!("  {header}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_ignores_undefined_references() {
        let board = Board::from_yaml_str(
            "devices:\n  - {name: bl, type: ledc_ctrl, peripherals: [ledc_missing]}\n",
        )
        .unwrap();
        assert!(run(&board).is_ok());
    }

    #[test]
    fn list_still_validates_fields() {
        let board = Board::from_yaml_str(
            "peripherals:\n  - {name: sdm0, type: sdm, config: {sample_rate_hz: 0}}\n",
        )
        .unwrap();
        assert!(run(&board).is_err());
    }
}
