//! Peripheral parsers.
//!
//! Peripherals are leaves in the reference graph: each parser validates one
//! peripheral's `config` mapping on its own and never consults the registry.

pub mod gpio;
pub mod ldo;
pub mod ledc;
pub mod sdm;

pub use gpio::Gpio;
pub use ldo::Ldo;
pub use ledc::Ledc;
pub use sdm::Sdm;

use boardc_core::ParserRegistry;

/// Register every built-in peripheral parser.
pub fn register(registry: &mut ParserRegistry) {
    registry.register_peripheral(Gpio);
    registry.register_peripheral(Ldo);
    registry.register_peripheral(Ledc);
    registry.register_peripheral(Sdm);
}
