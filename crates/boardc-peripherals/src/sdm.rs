//! `sdm` — sigma-delta modulator channel (`sdm_config_t`).

use boardc_core::error::{ErrorCause, ParseError, Result};
use boardc_core::field::IntRule;
use boardc_core::{InitMap, PeripheralParser, RawConfig, StructDescriptor};

const TYPE: &str = "sdm";

const CLOCK_SOURCES: &[&str] = &["default", "apb", "xtal"];

/// Parser for `type: sdm`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sdm;

impl PeripheralParser for Sdm {
    fn type_name(&self) -> &'static str {
        TYPE
    }

    fn includes(&self) -> &'static [&'static str] {
        &["driver/sdm.h"]
    }

    fn parse(&self, name: &str, raw: &RawConfig) -> Result<StructDescriptor> {
        build(name, raw).map_err(|cause| ParseError::new(name, TYPE, cause))
    }
}

fn build(name: &str, raw: &RawConfig) -> std::result::Result<StructDescriptor, ErrorCause> {
    let mut fields = raw.fields()?;
    let gpio_num = fields.integer("gpio_num", 0, IntRule::AtLeast(0))?;
    let clk_src = fields.choice("clk_src", "default", CLOCK_SOURCES)?;
    let sample_rate_hz = fields.integer("sample_rate_hz", 1_000_000, IntRule::GreaterThan(0))?;
    let invert_out = fields.boolean("invert_out", false)?;
    let io_loop_back = fields.boolean("io_loop_back", false)?;
    fields.warn_unread(name, TYPE);

    let flags = InitMap::new()
        .with("invert_out", invert_out)
        .with("io_loop_back", io_loop_back);
    let init = InitMap::new()
        .with("gpio_num", gpio_num)
        .with("clk_src", format!("SDM_CLK_SRC_{}", clk_src.to_ascii_uppercase()))
        .with("sample_rate_hz", sample_rate_hz)
        .with("flags", flags);
    Ok(StructDescriptor::new("sdm_config_t", init))
}

#[cfg(test)]
mod tests {
    use super::*;
    use boardc_core::InitValue;

    fn parse(yaml: &str) -> Result<StructDescriptor> {
        Sdm.parse("sdm0", &RawConfig::from_yaml_str(yaml).unwrap())
    }

    #[test]
    fn defaults() {
        let d = parse("type: sdm").unwrap();
        assert_eq!(d.struct_type, "sdm_config_t");
        assert_eq!(
            d.struct_init.keys().collect::<Vec<_>>(),
            vec!["gpio_num", "clk_src", "sample_rate_hz", "flags"]
        );
        assert_eq!(d.struct_init.get("clk_src"), Some(&InitValue::from("SDM_CLK_SRC_DEFAULT")));
        assert_eq!(d.struct_init.get("sample_rate_hz"), Some(&InitValue::Int(1_000_000)));
        let flags = InitMap::new().with("invert_out", false).with("io_loop_back", false);
        assert_eq!(d.struct_init.get("flags"), Some(&InitValue::Nested(flags)));
    }

    #[test]
    fn zero_sample_rate_rejected() {
        let err = parse("type: sdm\nconfig: {sample_rate_hz: 0}").unwrap_err();
        assert_eq!(
            err.to_string(),
            "sdm 'sdm0': field 'sample_rate_hz' = 0 must be > 0"
        );
    }

    #[test]
    fn flags_are_booleans() {
        let d = parse("type: sdm\nconfig: {gpio_num: 5, invert_out: true, clk_src: xtal}").unwrap();
        assert_eq!(d.struct_init.get("gpio_num"), Some(&InitValue::Int(5)));
        assert_eq!(d.struct_init.get("clk_src"), Some(&InitValue::from("SDM_CLK_SRC_XTAL")));
        match d.struct_init.get("flags") {
            Some(InitValue::Nested(flags)) => {
                assert_eq!(flags.get("invert_out"), Some(&InitValue::Bool(true)));
            }
            other => panic!("unexpected flags {other:?}"),
        }

        let err = parse("type: sdm\nconfig: {invert_out: 1}").unwrap_err();
        assert!(err.to_string().contains("must be a boolean"));
    }
}
