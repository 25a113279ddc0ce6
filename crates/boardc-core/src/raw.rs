//! Raw, untyped entity configuration as read from a board file.
//!
//! A raw configuration is a YAML mapping with a `type` tag, an optional
//! `config` mapping and, for devices, an optional `peripherals` sequence.
//! Accessors return an [`ErrorCause`] on shape errors; parsers attach the
//! entity identity before returning.

use serde_yaml::{Mapping, Value};

use crate::error::ErrorCause;
use crate::field::{describe_value, Fields};
use crate::reference::PeripheralRef;

/// An entity's raw configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct RawConfig(Value);

impl RawConfig {
    /// Wrap an already-loaded YAML value.
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Parse a raw configuration from YAML text.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml).map(Self)
    }

    /// The underlying YAML value.
    pub fn value(&self) -> &Value {
        &self.0
    }

    fn mapping(&self) -> Result<Option<&Mapping>, ErrorCause> {
        match &self.0 {
            Value::Null => Ok(None),
            Value::Mapping(m) => Ok(Some(m)),
            other => Err(ErrorCause::Malformed {
                detail: format!("expected a mapping, found {}", describe_value(other)),
            }),
        }
    }

    fn get(&self, key: &str) -> Result<Option<&Value>, ErrorCause> {
        Ok(self.mapping()?.and_then(|m| m.get(key)))
    }

    /// The `type` tag, if present and a string.
    pub fn type_tag(&self) -> Option<&str> {
        self.get("type").ok().flatten().and_then(Value::as_str)
    }

    /// The `name` key, if present and a string.
    pub fn name(&self) -> Option<&str> {
        self.get("name").ok().flatten().and_then(Value::as_str)
    }

    /// A field reader over the `config` mapping. Absent or null reads as empty.
    pub fn fields(&self) -> Result<Fields<'_>, ErrorCause> {
        match self.get("config")? {
            None | Some(Value::Null) => Ok(Fields::new(None)),
            Some(Value::Mapping(m)) => Ok(Fields::new(Some(m))),
            Some(other) => Err(ErrorCause::Malformed {
                detail: format!("'config' must be a mapping, found {}", describe_value(other)),
            }),
        }
    }

    /// The first declared peripheral reference and the number of entries in
    /// `peripherals`. Absent or null reads as empty. Entries after the first
    /// are counted but never normalized.
    pub fn first_peripheral_ref(&self) -> Result<(Option<PeripheralRef>, usize), ErrorCause> {
        match self.get("peripherals")? {
            None | Some(Value::Null) => Ok((None, 0)),
            Some(Value::Sequence(entries)) => {
                let first = entries.first().map(PeripheralRef::from_value).transpose()?;
                Ok((first, entries.len()))
            }
            Some(other) => Err(ErrorCause::Malformed {
                detail: format!(
                    "'peripherals' must be a sequence, found {}",
                    describe_value(other)
                ),
            }),
        }
    }
}

impl From<Value> for RawConfig {
    fn from(value: Value) -> Self {
        Self(value)
    }
}
