//! `ledc_ctrl` — a dimmable light or backlight driven by one LEDC channel.

use boardc_core::error::{ErrorCause, ParseError, Result};
use boardc_core::field::IntRule;
use boardc_core::{resolve_first, DeviceParser, PeripheralRegistry, RawConfig, StructDescriptor};

use crate::common::device_header;

const TYPE: &str = "ledc_ctrl";
const FAMILY: &str = "ledc";

/// Parser for `type: ledc_ctrl`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LedcCtrl;

impl DeviceParser for LedcCtrl {
    fn type_name(&self) -> &'static str {
        TYPE
    }

    fn peripheral_family(&self) -> &'static str {
        FAMILY
    }

    fn includes(&self) -> &'static [&'static str] {
        &["dev_ledc_ctrl.h"]
    }

    fn parse(
        &self,
        name: &str,
        raw: &RawConfig,
        peripherals: Option<&PeripheralRegistry>,
    ) -> Result<StructDescriptor> {
        build(name, raw, peripherals).map_err(|cause| ParseError::new(name, TYPE, cause))
    }
}

fn build(
    name: &str,
    raw: &RawConfig,
    peripherals: Option<&PeripheralRegistry>,
) -> std::result::Result<StructDescriptor, ErrorCause> {
    let ledc_name = resolve_first(raw, FAMILY, peripherals)?;

    let mut fields = raw.fields()?;
    let default_percent = fields.integer("default_percent", 100, IntRule::InRange(0, 100))?;
    fields.warn_unread(name, TYPE);

    let init = device_header(name, TYPE)
        .with("ledc_name", ledc_name)
        .with("default_percent", default_percent);
    Ok(StructDescriptor::new("dev_ledc_ctrl_config_t", init))
}

#[cfg(test)]
mod tests {
    use super::*;
    use boardc_core::{InitValue, ParserRegistry};

    fn raw(yaml: &str) -> RawConfig {
        RawConfig::from_yaml_str(yaml).unwrap()
    }

    fn registry() -> PeripheralRegistry {
        let mut parsers = ParserRegistry::new();
        boardc_peripherals::register(&mut parsers);
        let d = parsers
            .parse_peripheral("ledc_backlight", &raw("type: ledc\nconfig: {gpio_num: 26}"))
            .unwrap();
        let mut registry = PeripheralRegistry::new();
        registry.insert("ledc_backlight", "ledc", d).unwrap();
        registry
    }

    #[test]
    fn default_percent_applies() {
        let d = LedcCtrl
            .parse(
                "lcd_backlight",
                &raw("type: ledc_ctrl\nperipherals: [ledc_backlight]"),
                Some(&registry()),
            )
            .unwrap();
        assert_eq!(d.struct_type, "dev_ledc_ctrl_config_t");
        assert_eq!(
            d.struct_init.keys().collect::<Vec<_>>(),
            vec!["name", "type", "ledc_name", "default_percent"]
        );
        assert_eq!(d.struct_init.get("name"), Some(&InitValue::from("\"lcd_backlight\"")));
        assert_eq!(d.struct_init.get("ledc_name"), Some(&InitValue::from("ledc_backlight")));
        assert_eq!(d.struct_init.get("default_percent"), Some(&InitValue::Int(100)));
    }

    #[test]
    fn percent_out_of_range() {
        let err = LedcCtrl
            .parse(
                "lcd_backlight",
                &raw("type: ledc_ctrl\nperipherals: [ledc_backlight]\nconfig: {default_percent: 101}"),
                None,
            )
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "ledc_ctrl 'lcd_backlight': field 'default_percent' = 101 must be between 0 and 100"
        );
    }

    #[test]
    fn gpio_reference_is_wrong_family() {
        let err = LedcCtrl
            .parse("lcd_backlight", &raw("type: ledc_ctrl\nperipherals: [gpio-0]"), None)
            .unwrap_err();
        assert_eq!(
            err.cause,
            ErrorCause::WrongFamily {
                reference: "gpio-0".into(),
                family: "ledc"
            }
        );
    }

    #[test]
    fn malformed_reference_entry() {
        let err = LedcCtrl
            .parse("lcd_backlight", &raw("type: ledc_ctrl\nperipherals: [[a, b]]"), None)
            .unwrap_err();
        assert!(matches!(err.cause, ErrorCause::Malformed { .. }));
        assert_eq!(err.kind, "ledc_ctrl");
    }
}
