//! Core model and dispatch for the board description compiler.
//!
//! Peripherals and devices are declared in board files as untyped
//! configuration. Type-specific parsers validate that configuration and
//! produce [`StructDescriptor`]s ready for static-initializer emission.
//!
//! ## Modules
//!
//! - [`raw`] — untyped entity configuration
//! - [`field`] — single-field validators and defaulting reader
//! - [`reference`] — device-to-peripheral references and their resolution
//! - [`descriptor`] — the parser output record
//! - [`registry`] — already-parsed peripherals, by name
//! - [`parser`] — parser traits and type-tag dispatch
//! - [`error`] — structured parse errors

pub mod descriptor;
pub mod error;
pub mod field;
pub mod parser;
pub mod raw;
pub mod reference;
pub mod registry;

pub use descriptor::{InitMap, InitValue, StructDescriptor};
pub use error::{Constraint, ErrorCause, FieldError, ParseError};
pub use field::{Fields, IntRule};
pub use parser::{Category, DeviceParser, ParserRegistry, PeripheralParser};
pub use raw::RawConfig;
pub use reference::{resolve_first, PeripheralRef};
pub use registry::{PeripheralRegistry, RegisteredPeripheral};
