//! `gpio_ctrl` — an actuator or indicator driven by one GPIO peripheral.

use boardc_core::error::{ErrorCause, ParseError, Result};
use boardc_core::{resolve_first, DeviceParser, PeripheralRegistry, RawConfig, StructDescriptor};

use crate::common::device_header;

const TYPE: &str = "gpio_ctrl";
const FAMILY: &str = "gpio";

/// Parser for `type: gpio_ctrl`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GpioCtrl;

impl DeviceParser for GpioCtrl {
    fn type_name(&self) -> &'static str {
        TYPE
    }

    fn peripheral_family(&self) -> &'static str {
        FAMILY
    }

    fn includes(&self) -> &'static [&'static str] {
        &["dev_gpio_ctrl.h"]
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
    let gpio_name = resolve_first(raw, FAMILY, peripherals)?;

    let mut fields = raw.fields()?;
    let active_level = fields.flag("active_level", 0)?;
    let default_level = fields.flag("default_level", 0)?;
    fields.warn_unread(name, TYPE);

    let init = device_header(name, TYPE)
        .with("gpio_name", gpio_name)
        .with("active_level", active_level)
        .with("default_level", default_level);
    Ok(StructDescriptor::new("dev_gpio_ctrl_config_t", init))
}
