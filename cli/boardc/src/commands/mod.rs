//! CLI command implementations.

pub mod check;
pub mod compile;
pub mod init;
pub mod list;
pub mod types;

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use boardc_core::ParserRegistry;

use crate::board::Board;
use crate::manifest::BoardManifest;

/// The parser registry with every built-in peripheral and device type.
pub fn builtin_parsers() -> ParserRegistry {
    let mut parsers = ParserRegistry::new();
    boardc_peripherals::register(&mut parsers);
    boardc_devices::register(&mut parsers);
    parsers
}

/// Resolve board files (command line > manifest) and load them.
pub fn load_board(
    files: &[PathBuf],
    manifest: Option<&(BoardManifest, PathBuf)>,
) -> Result<Board> {
    let paths = board_paths(files, manifest)?;
    Board::load(&paths)
}

fn board_paths(
    files: &[PathBuf],
    manifest: Option<&(BoardManifest, PathBuf)>,
) -> Result<Vec<PathBuf>> {
    if !files.is_empty() {
        return Ok(files.to_vec());
    }
    match manifest {
        Some((m, dir)) => Ok(m.board_paths(dir)),
        None => bail!(
            "no board files given and no {} found. Pass files or create a manifest.",
            crate::manifest::MANIFEST_FILE
        ),
    }
}

/// Whether reference existence is checked: `--no-references` > manifest > on.
pub fn check_references(no_references: bool, manifest: Option<&BoardManifest>) -> bool {
    !no_references && manifest.map_or(true, |m| m.check.references)
}

/// Display a path relative to `base` when possible.
pub fn display_path(path: &Path, base: &Path) -> String {
    path.strip_prefix(base)
        .unwrap_or(path)
        .display()
        .to_string()
}
