//! Device parsers.
//!
//! A device is a logical function bound to one peripheral. Each parser
//! resolves the device's first peripheral reference (family prefix, then
//! registry membership when a registry is supplied) before validating its own
//! fields.

mod common;
pub mod gpio_ctrl;
pub mod ledc_ctrl;

pub use gpio_ctrl::GpioCtrl;
pub use ledc_ctrl::LedcCtrl;

use boardc_core::ParserRegistry;

/// Register every built-in device parser.
pub fn register(registry: &mut ParserRegistry) {
    registry.register_device(GpioCtrl);
    registry.register_device(LedcCtrl);
}
