//! Parser capabilities and type-tag dispatch.
//!
//! Each peripheral or device type is a standalone parser exposing the same two
//! operations: the headers its emitted code needs, and `parse`. Peripherals
//! are leaves and parse from their raw configuration alone; devices also
//! receive the peripheral registry to resolve their references.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::descriptor::StructDescriptor;
use crate::error::{ErrorCause, ParseError, Result};
use crate::raw::RawConfig;
use crate::registry::PeripheralRegistry;

/// A parser for one peripheral type.
pub trait PeripheralParser: Send + Sync {
    /// The `type` tag this parser handles.
    fn type_name(&self) -> &'static str;

    /// Headers required by code emitted for this type, in order.
    fn includes(&self) -> &'static [&'static str];

    /// Validate a peripheral's raw configuration.
    fn parse(&self, name: &str, raw: &RawConfig) -> Result<StructDescriptor>;
}

/// A parser for one device type.
pub trait DeviceParser: Send + Sync {
    /// The `type` tag this parser handles.
    fn type_name(&self) -> &'static str;

    /// Name prefix every referenced peripheral must carry.
    fn peripheral_family(&self) -> &'static str;

    /// Headers required by code emitted for this type, in order.
    fn includes(&self) -> &'static [&'static str];

    /// Validate a device's raw configuration and resolve its peripheral
    /// reference. `None` skips the existence check against the registry.
    fn parse(
        &self,
        name: &str,
        raw: &RawConfig,
        peripherals: Option<&PeripheralRegistry>,
    ) -> Result<StructDescriptor>;
}

/// Whether a type tag names a peripheral or a device parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Peripheral,
    Device,
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Peripheral => f.pad("peripheral"),
            Self::Device => f.pad("device"),
        }
    }
}

/// Type tag to parser.
#[derive(Default)]
pub struct ParserRegistry {
    peripherals: BTreeMap<&'static str, Box<dyn PeripheralParser>>,
    devices: BTreeMap<&'static str, Box<dyn DeviceParser>>,
}

impl ParserRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a peripheral parser under its type tag.
    pub fn register_peripheral(&mut self, parser: impl PeripheralParser + 'static) {
        let tag = parser.type_name();
        if self.peripherals.insert(tag, Box::new(parser)).is_some() {
            log::warn!("peripheral parser '{tag}' registered twice, keeping the latest");
        }
    }

    /// Register a device parser under its type tag.
    pub fn register_device(&mut self, parser: impl DeviceParser + 'static) {
        let tag = parser.type_name();
        if self.devices.insert(tag, Box::new(parser)).is_some() {
            log::warn!("device parser '{tag}' registered twice, keeping the latest");
        }
    }

    /// The peripheral parser for a type tag.
    pub fn peripheral(&self, tag: &str) -> Option<&dyn PeripheralParser> {
        self.peripherals.get(tag).map(|p| p.as_ref())
    }

    /// The device parser for a type tag.
    pub fn device(&self, tag: &str) -> Option<&dyn DeviceParser> {
        self.devices.get(tag).map(|p| p.as_ref())
    }

    /// Registered peripheral type tags, sorted.
    pub fn peripheral_types(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.peripherals.keys().copied()
    }

    /// Registered device type tags, sorted.
    pub fn device_types(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.devices.keys().copied()
    }

    /// Which kind of parser handles a type tag.
    pub fn category(&self, tag: &str) -> Option<Category> {
        if self.peripherals.contains_key(tag) {
            Some(Category::Peripheral)
        } else if self.devices.contains_key(tag) {
            Some(Category::Device)
        } else {
            None
        }
    }

    /// Headers for a type tag, whichever kind of parser handles it.
    pub fn includes(&self, tag: &str) -> Option<&'static [&'static str]> {
        self.peripheral(tag)
            .map(|p| p.includes())
            .or_else(|| self.device(tag).map(|d| d.includes()))
    }

    /// Parse a peripheral, dispatching on its `type` tag.
    pub fn parse_peripheral(&self, name: &str, raw: &RawConfig) -> Result<StructDescriptor> {
        let tag = require_tag(name, raw)?;
        let parser = self
            .peripheral(tag)
            .ok_or_else(|| ParseError::new(name, tag, ErrorCause::UnknownType))?;
        log::debug!("parsing peripheral '{name}' as {tag}");
        parser.parse(name, raw)
    }

    /// Parse a device, dispatching on its `type` tag.
    pub fn parse_device(
        &self,
        name: &str,
        raw: &RawConfig,
        peripherals: Option<&PeripheralRegistry>,
    ) -> Result<StructDescriptor> {
        let tag = require_tag(name, raw)?;
        let parser = self
            .device(tag)
            .ok_or_else(|| ParseError::new(name, tag, ErrorCause::UnknownType))?;
        log::debug!("parsing device '{name}' as {tag}");
        parser.parse(name, raw, peripherals)
    }
}

fn require_tag<'a>(name: &str, raw: &'a RawConfig) -> Result<&'a str> {
    raw.type_tag()
        .ok_or_else(|| ParseError::malformed(name, "<untyped>", "missing 'type' tag"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{InitMap, InitValue};
    use crate::reference::resolve_first;

    struct Dummy;

    impl PeripheralParser for Dummy {
        fn type_name(&self) -> &'static str {
            "dummy"
        }
        fn includes(&self) -> &'static [&'static str] {
            &["dummy.h"]
        }
        fn parse(&self, _name: &str, _raw: &RawConfig) -> Result<StructDescriptor> {
            Ok(StructDescriptor::new("dummy_t", InitMap::new()))
        }
    }

    struct DummyCtrl;

    impl DeviceParser for DummyCtrl {
        fn type_name(&self) -> &'static str {
            "dummy_ctrl"
        }
        fn peripheral_family(&self) -> &'static str {
            "dummy"
        }
        fn includes(&self) -> &'static [&'static str] {
            &["dev_dummy_ctrl.h"]
        }
        fn parse(
            &self,
            name: &str,
            raw: &RawConfig,
            peripherals: Option<&PeripheralRegistry>,
        ) -> Result<StructDescriptor> {
            let target = resolve_first(raw, self.peripheral_family(), peripherals)
                .map_err(|c| ParseError::new(name, "dummy_ctrl", c))?;
            Ok(StructDescriptor::new(
                "dev_dummy_ctrl_t",
                InitMap::new().with("target", target),
            ))
        }
    }

    fn registry() -> ParserRegistry {
        let mut r = ParserRegistry::new();
        r.register_peripheral(Dummy);
        r.register_device(DummyCtrl);
        r
    }

    fn raw(yaml: &str) -> RawConfig {
        RawConfig::from_yaml_str(yaml).unwrap()
    }

    #[test]
    fn dispatches_by_tag() {
        let r = registry();
        let d = r.parse_peripheral("d0", &raw("type: dummy")).unwrap();
        assert_eq!(d.struct_type, "dummy_t");

        let d = r
            .parse_device("c0", &raw("type: dummy_ctrl\nperipherals: [dummy0]"), None)
            .unwrap();
        assert_eq!(d.struct_init.get("target"), Some(&InitValue::from("dummy0")));
    }

    #[test]
    fn unknown_tag_is_wrapped() {
        let r = registry();
        let err = r.parse_peripheral("x", &raw("type: nope")).unwrap_err();
        assert_eq!(err.cause, ErrorCause::UnknownType);
        assert_eq!(err.to_string(), "nope 'x': no parser registered for this type");

        // A device tag is not a peripheral tag.
        assert!(r.parse_peripheral("x", &raw("type: dummy_ctrl")).is_err());
    }

    #[test]
    fn missing_tag_is_malformed() {
        let err = registry().parse_peripheral("x", &raw("config: {}")).unwrap_err();
        assert!(matches!(err.cause, ErrorCause::Malformed { .. }));
        assert_eq!(err.entity, "x");
    }

    #[test]
    fn introspection() {
        let r = registry();
        assert_eq!(r.includes("dummy"), Some(&["dummy.h"][..]));
        assert_eq!(r.includes("dummy_ctrl"), Some(&["dev_dummy_ctrl.h"][..]));
        assert_eq!(r.includes("nope"), None);
        assert_eq!(r.category("dummy"), Some(Category::Peripheral));
        assert_eq!(r.category("dummy_ctrl"), Some(Category::Device));
        assert_eq!(r.peripheral_types().collect::<Vec<_>>(), vec!["dummy"]);
        assert_eq!(r.device_types().collect::<Vec<_>>(), vec!["dummy_ctrl"]);
    }

    #[test]
    fn reregistering_replaces() {
        let mut r = registry();
        r.register_peripheral(Dummy);
        assert_eq!(r.peripheral_types().count(), 1);
    }
}
