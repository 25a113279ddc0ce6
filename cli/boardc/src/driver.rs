//! Compile driver: runs parsers over a board in dependency order.
//!
//! Every peripheral is parsed and registered before the first device is
//! parsed, so device parsers always see a complete, fixed registry.

use boardc_core::error::Result;
use boardc_core::{Category, ParserRegistry, PeripheralRegistry, StructDescriptor};
use serde::Serialize;

use crate::board::Board;

/// How device references are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Check every device reference against the peripheral registry.
    Check,
    /// Structural validation only; reference existence is not checked.
    DryRun,
}

/// One parsed entity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompiledEntity {
    /// Entity name as declared in the board file.
    pub name: String,
    /// The entity's `type` tag.
    #[serde(rename = "type")]
    pub kind: String,
    /// Whether a peripheral or a device parser produced it.
    pub category: Category,
    /// Variable name to emit (suggested or derived from `name`).
    pub var: String,
    /// The parser's output.
    pub descriptor: StructDescriptor,
}

impl CompiledEntity {
    fn new(name: &str, kind: &str, category: Category, descriptor: StructDescriptor) -> Self {
        Self {
            name: name.to_string(),
            kind: kind.to_string(),
            category,
            var: descriptor.var_name(name),
            descriptor,
        }
    }
}

/// The parsed board.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CompiledBoard {
    /// Headers needed by all entities, deduplicated, first-seen order.
    pub includes: Vec<String>,
    /// Peripherals in declaration order.
    pub peripherals: Vec<CompiledEntity>,
    /// Devices in declaration order.
    pub devices: Vec<CompiledEntity>,
}

impl CompiledBoard {
    fn add_includes(&mut self, headers: &[&str]) {
        for header in headers {
            if !self.includes.iter().any(|h| h == header) {
                self.includes.push(header.to_string());
            }
        }
    }

    /// All entities, peripherals first.
    pub fn entities(&self) -> impl Iterator<Item = &CompiledEntity> {
        self.peripherals.iter().chain(self.devices.iter())
    }
}

/// Parse every entity of `board`, stopping at the first failure.
pub fn compile(board: &Board, parsers: &ParserRegistry, mode: Mode) -> Result<CompiledBoard> {
    let mut registry = PeripheralRegistry::new();
    for entity in &board.peripherals {
        let descriptor = parsers.parse_peripheral(&entity.name, &entity.raw)?;
        registry.insert(entity.name.clone(), entity.kind(), descriptor)?;
    }
    log::debug!("registered {} peripheral(s)", registry.len());

    let mut out = CompiledBoard::default();
    for (name, peripheral) in registry.iter() {
        out.add_includes(parsers.includes(&peripheral.kind).unwrap_or_default());
        out.peripherals.push(CompiledEntity::new(
            name,
            &peripheral.kind,
            Category::Peripheral,
            peripheral.descriptor.clone(),
        ));
    }

    let lookup = match mode {
        Mode::Check => Some(&registry),
        Mode::DryRun => None,
    };
    for entity in &board.devices {
        let descriptor = parsers.parse_device(&entity.name, &entity.raw, lookup)?;
        out.add_includes(parsers.includes(entity.kind()).unwrap_or_default());
        out.devices.push(CompiledEntity::new(
            &entity.name,
            entity.kind(),
            Category::Device,
            descriptor,
        ));
    }

    log::info!(
        "compiled {} peripheral(s) and {} device(s)",
        out.peripherals.len(),
        out.devices.len()
    );
    Ok(out)
}
