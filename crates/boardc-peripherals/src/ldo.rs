//! `ldo` — on-chip LDO regulator channel (`esp_ldo_channel_config_t`).

use boardc_core::error::{ErrorCause, ParseError, Result};
use boardc_core::field::IntRule;
use boardc_core::{InitMap, PeripheralParser, RawConfig, StructDescriptor};

const TYPE: &str = "ldo";

/// Parser for `type: ldo`.
///
/// The `adjustable` and `owned_by_hw` flags are emitted as `0`/`1` integers
/// into the structure's bit-field `flags` member, so they are validated as
/// flags rather than booleans.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ldo;

impl PeripheralParser for Ldo {
    fn type_name(&self) -> &'static str {
        TYPE
    }

    fn includes(&self) -> &'static [&'static str] {
        &["esp_ldo_regulator.h"]
    }

    fn parse(&self, name: &str, raw: &RawConfig) -> Result<StructDescriptor> {
        build(name, raw).map_err(|cause| ParseError::new(name, TYPE, cause))
    }
}

fn build(name: &str, raw: &RawConfig) -> std::result::Result<StructDescriptor, ErrorCause> {
    let mut fields = raw.fields()?;
    let chan_id = fields.integer("chan_id", 0, IntRule::AtLeast(0))?;
    let voltage_mv = fields.integer("voltage_mv", 0, IntRule::AtLeast(0))?;
    let adjustable = fields.flag("adjustable", 1)?;
    let owned_by_hw = fields.flag("owned_by_hw", 0)?;
    fields.warn_unread(name, TYPE);

    let flags = InitMap::new()
        .with("adjustable", adjustable)
        .with("owned_by_hw", owned_by_hw);
    let init = InitMap::new()
        .with("chan_id", chan_id)
        .with("voltage_mv", voltage_mv)
        .with("flags", flags);
    Ok(StructDescriptor::new("esp_ldo_channel_config_t", init))
}

#[cfg(test)]
mod tests {
    use super::*;
    use boardc_core::{Constraint, InitValue};

    fn parse(yaml: &str) -> Result<StructDescriptor> {
        Ldo.parse("ldo1", &RawConfig::from_yaml_str(yaml).unwrap())
    }

    #[test]
    fn flags_default() {
        let d = parse("type: ldo\nconfig: {chan_id: 2, voltage_mv: 3300}").unwrap();
        assert_eq!(d.struct_type, "esp_ldo_channel_config_t");
        assert_eq!(d.struct_init.get("chan_id"), Some(&InitValue::Int(2)));
        assert_eq!(d.struct_init.get("voltage_mv"), Some(&InitValue::Int(3300)));
        let flags = InitMap::new().with("adjustable", 1i64).with("owned_by_hw", 0i64);
        assert_eq!(d.struct_init.get("flags"), Some(&InitValue::Nested(flags)));
        assert_eq!(d.struct_init.len(), 3);
    }

    #[test]
    fn empty_config_parses() {
        let d = parse("type: ldo").unwrap();
        assert_eq!(d.struct_init.get("chan_id"), Some(&InitValue::Int(0)));
    }

    #[test]
    fn flag_rejects_boolean() {
        let err = parse("type: ldo\nconfig: {adjustable: true}").unwrap_err();
        assert_eq!(
            err.to_string(),
            "ldo 'ldo1': field 'adjustable' = true must be an integer"
        );
    }

    #[test]
    fn flag_rejects_out_of_set() {
        let err = parse("type: ldo\nconfig: {owned_by_hw: 2}").unwrap_err();
        match err.cause {
            ErrorCause::Field(f) => {
                assert_eq!(f.field, "owned_by_hw");
                assert_eq!(f.constraint, Constraint::OneOf(&[0, 1]));
            }
            other => panic!("unexpected cause {other:?}"),
        }
    }

    #[test]
    fn negative_voltage() {
        let err = parse("type: ldo\nconfig: {voltage_mv: -5}").unwrap_err();
        assert!(err.to_string().contains("must be >= 0"));
    }

    #[test]
    fn idempotent() {
        let raw = RawConfig::from_yaml_str("type: ldo\nconfig: {chan_id: 3}").unwrap();
        assert_eq!(Ldo.parse("ldo1", &raw).unwrap(), Ldo.parse("ldo1", &raw).unwrap());
    }
}
