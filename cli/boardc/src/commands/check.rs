//! `boardc check` — validate a board and report every entity.

use anyhow::Result;

use crate::board::Board;
use crate::commands::builtin_parsers;
use crate::driver::{compile, Mode};

/// Compile the board and print a one-line summary per entity.
pub fn run(board: &Board, references: bool) -> Result<()> {
    let mode = if references { Mode::Check } else { Mode::DryRun };
    let compiled = compile(board, &builtin_parsers(), mode)?;

    for entity in compiled.entities() {
        println!(
            "  {:<10} {:<24} {:<12} {}",
            entity.category, entity.name, entity.kind, entity.descriptor.struct_type
        );
    }
    println!();
    println!(
        "ok: {} peripheral(s), {} device(s){}",
        compiled.peripherals.len(),
        compiled.devices.len(),
        if references { "" } else { " (references not checked)" }
    );
    Ok(())
}
