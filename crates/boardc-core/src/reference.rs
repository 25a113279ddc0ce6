//! Peripheral references declared by devices, and their resolution.
//!
//! A board file may write a reference either as a bare name or as a mapping
//! with a `name` key. Both normalize to [`PeripheralRef`]; every device parser
//! resolves its reference through [`resolve_first`].

use serde::{Deserialize, Serialize};
use serde_yaml::Value;

use crate::error::ErrorCause;
use crate::field::describe_value;
use crate::raw::RawConfig;
use crate::registry::PeripheralRegistry;

/// A device's reference to a peripheral.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PeripheralRef {
    /// `- gpio-0`
    Name(String),
    /// `- name: gpio-0`
    Named {
        /// Referenced peripheral name.
        name: String,
    },
}

impl PeripheralRef {
    /// Normalize one `peripherals` entry.
    pub fn from_value(value: &Value) -> Result<Self, ErrorCause> {
        serde_yaml::from_value(value.clone()).map_err(|_| ErrorCause::Malformed {
            detail: format!(
                "peripheral reference must be a name or a mapping with a 'name' key, found {}",
                describe_value(value)
            ),
        })
    }

    /// The referenced peripheral name.
    pub fn name(&self) -> &str {
        match self {
            Self::Name(name) | Self::Named { name } => name,
        }
    }
}

/// Resolve a device's peripheral reference.
///
/// Only the first `peripherals` entry is bound; a device type has exactly one
/// peripheral slot and later entries are ignored unread. The name must start
/// with `family`, and when a registry is supplied it must name a registered
/// peripheral. Passing `None` skips the existence check.
pub fn resolve_first(
    raw: &RawConfig,
    family: &'static str,
    registry: Option<&PeripheralRegistry>,
) -> Result<String, ErrorCause> {
    let (first, declared) = raw.first_peripheral_ref()?;
    let first = first.ok_or(ErrorCause::MissingReference)?;
    let name = first.name();
    if declared > 1 {
        log::debug!(
            "binding '{name}', ignoring {} additional peripheral reference(s)",
            declared - 1
        );
    }
    if !name.starts_with(family) {
        return Err(ErrorCause::WrongFamily {
            reference: name.to_string(),
            family,
        });
    }
    if let Some(registry) = registry {
        if !registry.contains(name) {
            return Err(ErrorCause::UndefinedReference {
                reference: name.to_string(),
            });
        }
    }
    Ok(name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{InitMap, StructDescriptor};

    fn device(names: &[&str]) -> RawConfig {
        let yaml = format!("type: dummy_ctrl\nperipherals: [{}]", names.join(", "));
        RawConfig::from_yaml_str(&yaml).unwrap()
    }

    fn registry_with(names: &[(&str, &str)]) -> PeripheralRegistry {
        let mut registry = PeripheralRegistry::new();
        for (name, kind) in names {
            registry
                .insert(*name, *kind, StructDescriptor::new("t", InitMap::new()))
                .unwrap();
        }
        registry
    }

    #[test]
    fn both_shapes_normalize() {
        let bare: Value = serde_yaml::from_str("gpio-0").unwrap();
        let mapped: Value = serde_yaml::from_str("{name: gpio-0, role: output}").unwrap();
        assert_eq!(PeripheralRef::from_value(&bare).unwrap().name(), "gpio-0");
        assert_eq!(PeripheralRef::from_value(&mapped).unwrap().name(), "gpio-0");
    }

    #[test]
    fn mapping_without_name_is_malformed() {
        let v: Value = serde_yaml::from_str("{id: gpio-0}").unwrap();
        assert!(matches!(
            PeripheralRef::from_value(&v),
            Err(ErrorCause::Malformed { .. })
        ));
        assert!(PeripheralRef::from_value(&Value::Number(3.into())).is_err());
    }

    #[test]
    fn empty_is_missing() {
        assert_eq!(
            resolve_first(&device(&[]), "gpio", None),
            Err(ErrorCause::MissingReference)
        );
        let absent = RawConfig::from_yaml_str("type: dummy_ctrl").unwrap();
        assert_eq!(
            resolve_first(&absent, "gpio", None),
            Err(ErrorCause::MissingReference)
        );
    }

    #[test]
    fn prefix_is_checked() {
        let err = resolve_first(&device(&["ldo1"]), "gpio", None).unwrap_err();
        assert_eq!(
            err,
            ErrorCause::WrongFamily {
                reference: "ldo1".into(),
                family: "gpio"
            }
        );
        assert!(resolve_first(&device(&["gpio_led"]), "gpio", None).is_ok());
        assert!(resolve_first(&device(&["gpio-0"]), "gpio", None).is_ok());
    }

    #[test]
    fn prefix_is_checked_before_existence() {
        let registry = registry_with(&[("gpio-0", "gpio")]);
        let err = resolve_first(&device(&["ldo1"]), "gpio", Some(&registry)).unwrap_err();
        assert!(matches!(err, ErrorCause::WrongFamily { .. }));
    }

    #[test]
    fn existence_checked_only_with_registry() {
        let registry = registry_with(&[("gpio-0", "gpio")]);
        assert_eq!(
            resolve_first(&device(&["gpio-0"]), "gpio", Some(&registry)).unwrap(),
            "gpio-0"
        );
        assert_eq!(
            resolve_first(&device(&["gpio-9"]), "gpio", Some(&registry)),
            Err(ErrorCause::UndefinedReference {
                reference: "gpio-9".into()
            })
        );
        assert_eq!(
            resolve_first(&device(&["gpio-9"]), "gpio", None).unwrap(),
            "gpio-9"
        );
    }

    #[test]
    fn only_first_reference_is_bound() {
        let registry = registry_with(&[("gpio-0", "gpio")]);
        let bound = resolve_first(&device(&["gpio-0", "ldo-missing", "7"]), "gpio", Some(&registry));
        assert_eq!(bound.unwrap(), "gpio-0");
        let bound = resolve_first(&device(&["gpio-0", "{role: spare}"]), "gpio", None);
        assert_eq!(bound.unwrap(), "gpio-0");
    }
}
