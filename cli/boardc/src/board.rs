//! Board file loading.
//!
//! A board file is a YAML document with optional `peripherals` and `devices`
//! sequences. Each entry is an entity's raw configuration plus its `name`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use boardc_core::error::ParseError;
use boardc_core::RawConfig;
use serde::Deserialize;
use serde_yaml::Value;

/// One declared peripheral or device.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub name: String,
    pub raw: RawConfig,
}

impl Entity {
    /// The entity's `type` tag.
    pub fn kind(&self) -> &str {
        self.raw.type_tag().unwrap_or("<untyped>")
    }
}

/// All entities of a board, in declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Board {
    pub peripherals: Vec<Entity>,
    pub devices: Vec<Entity>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct BoardFile {
    #[serde(default)]
    peripherals: Option<Vec<Value>>,
    #[serde(default)]
    devices: Option<Vec<Value>>,
}

impl Board {
    /// Parse a single board document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let file: Option<BoardFile> = serde_yaml::from_str(yaml)?;
        let Some(file) = file else {
            return Ok(Self::default());
        };
        let peripherals = file
            .peripherals
            .unwrap_or_default()
            .into_iter()
            .map(entity)
            .collect::<std::result::Result<Vec<_>, _>>()?;
        let devices = file
            .devices
            .unwrap_or_default()
            .into_iter()
            .map(entity)
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(Self {
            peripherals,
            devices,
        })
    }

    /// Load and concatenate board files in order.
    pub fn load(paths: &[PathBuf]) -> Result<Self> {
        let mut board = Self::default();
        for path in paths {
            board.extend(Self::load_file(path)?);
        }
        Ok(board)
    }

    fn load_file(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        let board =
            Self::from_yaml_str(&content).with_context(|| format!("parsing {}", path.display()))?;
        log::info!(
            "loaded {}: {} peripheral(s), {} device(s)",
            path.display(),
            board.peripherals.len(),
            board.devices.len()
        );
        Ok(board)
    }

    /// Append another board's entities after this one's.
    pub fn extend(&mut self, other: Board) {
        self.peripherals.extend(other.peripherals);
        self.devices.extend(other.devices);
    }
}

fn entity(value: Value) -> std::result::Result<Entity, ParseError> {
    let raw = RawConfig::new(value);
    let kind = raw.type_tag().unwrap_or("<untyped>").to_string();
    if !raw.value().is_mapping() {
        return Err(ParseError::malformed("<unnamed>", kind, "entry must be a mapping"));
    }
    let name = raw
        .name()
        .ok_or_else(|| ParseError::malformed("<unnamed>", kind.clone(), "missing 'name'"))?
        .to_string();
    Ok(Entity { name, raw })
}
