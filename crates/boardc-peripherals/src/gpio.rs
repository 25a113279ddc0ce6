//! `gpio` — a single GPIO pin configured through `gpio_config_t`.

use boardc_core::error::{ErrorCause, ParseError, Result};
use boardc_core::field::IntRule;
use boardc_core::{InitMap, PeripheralParser, RawConfig, StructDescriptor};

const TYPE: &str = "gpio";

const MODES: &[&str] = &[
    "disable",
    "input",
    "output",
    "output_od",
    "input_output",
    "input_output_od",
];

const INTR_TYPES: &[&str] = &[
    "disable",
    "posedge",
    "negedge",
    "anyedge",
    "low_level",
    "high_level",
];

/// Parser for `type: gpio`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Gpio;

impl PeripheralParser for Gpio {
    fn type_name(&self) -> &'static str {
        TYPE
    }

    fn includes(&self) -> &'static [&'static str] {
        &["driver/gpio.h"]
    }

    fn parse(&self, name: &str, raw: &RawConfig) -> Result<StructDescriptor> {
        build(name, raw).map_err(|cause| ParseError::new(name, TYPE, cause))
    }
}

fn build(name: &str, raw: &RawConfig) -> std::result::Result<StructDescriptor, ErrorCause> {
    let mut fields = raw.fields()?;
    let pin = fields.integer("pin", 0, IntRule::InRange(0, 63))?;
    let mode = fields.choice("mode", "output", MODES)?;
    let pull_up = fields.boolean("pull_up", false)?;
    let pull_down = fields.boolean("pull_down", false)?;
    let intr_type = fields.choice("intr_type", "disable", INTR_TYPES)?;
    fields.warn_unread(name, TYPE);

    let init = InitMap::new()
        .with("pin_bit_mask", format!("BIT64({pin})"))
        .with("mode", format!("GPIO_MODE_{}", mode.to_ascii_uppercase()))
        .with(
            "pull_up_en",
            if pull_up { "GPIO_PULLUP_ENABLE" } else { "GPIO_PULLUP_DISABLE" },
        )
        .with(
            "pull_down_en",
            if pull_down { "GPIO_PULLDOWN_ENABLE" } else { "GPIO_PULLDOWN_DISABLE" },
        )
        .with("intr_type", format!("GPIO_INTR_{}", intr_type.to_ascii_uppercase()));
    Ok(StructDescriptor::new("gpio_config_t", init))
}
