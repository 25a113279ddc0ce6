//! `ledc` — LED PWM controller channel (`ledc_channel_config_t`).

use boardc_core::error::{ErrorCause, ParseError, Result};
use boardc_core::field::IntRule;
use boardc_core::{InitMap, PeripheralParser, RawConfig, StructDescriptor};

const TYPE: &str = "ledc";

const SPEED_MODES: &[&str] = &["low_speed", "high_speed"];

/// Parser for `type: ledc`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ledc;

impl PeripheralParser for Ledc {
    fn type_name(&self) -> &'static str {
        TYPE
    }

    fn includes(&self) -> &'static [&'static str] {
        &["driver/ledc.h"]
    }

    fn parse(&self, name: &str, raw: &RawConfig) -> Result<StructDescriptor> {
        build(name, raw).map_err(|cause| ParseError::new(name, TYPE, cause))
    }
}

fn build(name: &str, raw: &RawConfig) -> std::result::Result<StructDescriptor, ErrorCause> {
    let mut fields = raw.fields()?;
    let gpio_num = fields.integer("gpio_num", 0, IntRule::InRange(0, 63))?;
    let speed_mode = fields.choice("speed_mode", "low_speed", SPEED_MODES)?;
    let channel = fields.integer("channel", 0, IntRule::InRange(0, 7))?;
    let timer_sel = fields.integer("timer_sel", 0, IntRule::InRange(0, 3))?;
    let duty = fields.integer("duty", 0, IntRule::AtLeast(0))?;
    let hpoint = fields.integer("hpoint", 0, IntRule::AtLeast(0))?;
    let output_invert = fields.flag("output_invert", 0)?;
    fields.warn_unread(name, TYPE);

    let init = InitMap::new()
        .with("gpio_num", gpio_num)
        .with("speed_mode", format!("LEDC_{}_MODE", speed_mode.to_ascii_uppercase()))
        .with("channel", format!("LEDC_CHANNEL_{channel}"))
        .with("timer_sel", format!("LEDC_TIMER_{timer_sel}"))
        .with("duty", duty)
        .with("hpoint", hpoint)
        .with("flags", InitMap::new().with("output_invert", output_invert));
    Ok(StructDescriptor::new("ledc_channel_config_t", init))
}
