//! `boardc.toml` manifest parsing and project configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Manifest file name searched for from the working directory upward.
pub const MANIFEST_FILE: &str = "boardc.toml";

/// The top-level manifest structure for a board project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardManifest {
    /// Project metadata (required).
    pub project: ProjectConfig,
    /// Board description files.
    #[serde(default)]
    pub board: BoardConfig,
    /// Validation settings.
    #[serde(default)]
    pub check: CheckConfig,
    /// Output settings for `boardc compile`.
    #[serde(default)]
    pub output: OutputConfig,
    /// Logging settings.
    #[serde(default)]
    pub log: LogConfig,
}

/// Project metadata section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Project name (required).
    pub name: String,
    /// Target chip, informational only.
    #[serde(default)]
    pub chip: Option<String>,
}

/// Board files section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardConfig {
    /// YAML files, relative to the manifest directory, read in order.
    #[serde(default = "default_board_files")]
    pub files: Vec<String>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            files: default_board_files(),
        }
    }
}

fn default_board_files() -> Vec<String> {
    vec![
        "board_peripherals.yaml".to_string(),
        "board_devices.yaml".to_string(),
    ]
}

/// Check section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckConfig {
    /// Check that every device reference names a defined peripheral.
    #[serde(default = "default_true")]
    pub references: bool,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self { references: true }
    }
}

fn default_true() -> bool {
    true
}

/// Output section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// JSON output path, relative to the manifest directory.
    #[serde(default = "default_output_path")]
    pub path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_output_path(),
        }
    }
}

fn default_output_path() -> String {
    "build/board.json".to_string()
}

/// Log section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LogConfig {
    /// Default level when no `-v`/`-q` flag is given.
    #[serde(default)]
    pub level: Option<String>,
}

impl BoardManifest {
    /// Search upward from `start_dir` for a `boardc.toml` file, parse and return it
    /// along with the directory it was found in.
    pub fn find_and_load(start_dir: &Path) -> Result<Option<(Self, PathBuf)>> {
        let mut dir = start_dir.to_path_buf();
        loop {
            let candidate = dir.join(MANIFEST_FILE);
            if candidate.is_file() {
                let content = std::fs::read_to_string(&candidate)
                    .with_context(|| format!("reading {}", candidate.display()))?;
                let manifest = Self::parse(&content)
                    .with_context(|| format!("parsing {}", candidate.display()))?;
                return Ok(Some((manifest, dir)));
            }
            if !dir.pop() {
                break;
            }
        }
        Ok(None)
    }

    /// Parse a manifest from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        let manifest: BoardManifest = toml::from_str(s)?;
        if manifest.project.name.is_empty() {
            anyhow::bail!("project.name must not be empty");
        }
        Ok(manifest)
    }

    /// Board files resolved against the manifest directory.
    pub fn board_paths(&self, project_dir: &Path) -> Vec<PathBuf> {
        self.board.files.iter().map(|f| project_dir.join(f)).collect()
    }

    /// Output path resolved against the manifest directory.
    pub fn output_path(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.output.path)
    }

    /// Generate a starter manifest.
    pub fn template(name: &str) -> String {
        format!(
            r#"[project]
name = "{name}"

[board]
files = ["board_peripherals.yaml", "board_devices.yaml"]

[check]
references = true
"#
        )
    }
}
