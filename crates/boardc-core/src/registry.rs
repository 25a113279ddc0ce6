//! Registry of already-parsed peripherals.
//!
//! The driver fills it in declaration order before any device is parsed;
//! device parsers only ever see it through a shared reference.

use std::collections::BTreeMap;

use crate::descriptor::StructDescriptor;
use crate::error::{ErrorCause, ParseError};

/// A parsed peripheral and its type tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredPeripheral {
    /// Peripheral type tag (e.g. "gpio").
    pub kind: String,
    /// The peripheral's descriptor.
    pub descriptor: StructDescriptor,
}

/// Peripheral name to parsed peripheral. Names are unique across a board.
#[derive(Debug, Clone, Default)]
pub struct PeripheralRegistry {
    entries: BTreeMap<String, RegisteredPeripheral>,
    order: Vec<String>,
}

impl PeripheralRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a parsed peripheral. Fails if the name is already taken.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        kind: impl Into<String>,
        descriptor: StructDescriptor,
    ) -> Result<(), ParseError> {
        let name = name.into();
        let kind = kind.into();
        if self.entries.contains_key(&name) {
            return Err(ParseError::new(name, kind, ErrorCause::Duplicate));
        }
        self.order.push(name.clone());
        self.entries
            .insert(name, RegisteredPeripheral { kind, descriptor });
        Ok(())
    }

    /// Whether a peripheral with this name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Registered peripherals in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RegisteredPeripheral)> {
        self.order
            .iter()
            .filter_map(|name| self.entries.get(name).map(|p| (name.as_str(), p)))
    }

    /// Number of registered peripherals.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no peripheral is registered yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
