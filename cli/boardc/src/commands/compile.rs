//! `boardc compile` — write every descriptor of a board as JSON.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::board::Board;
use crate::commands::builtin_parsers;
use crate::driver::{compile, CompiledBoard, Mode};

/// Compile the board and write the result to `output`.
pub fn run(board: &Board, references: bool, output: &Path) -> Result<CompiledBoard> {
    let mode = if references { Mode::Check } else { Mode::DryRun };
    let compiled = compile(board, &builtin_parsers(), mode)?;

    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    let json = serde_json::to_string_pretty(&compiled)?;
    fs::write(output, json + "\n").with_context(|| format!("writing {}", output.display()))?;
    log::info!("wrote {}", output.display());
    Ok(compiled)
}
