//! `boardc types` — list registered peripheral and device types.

use anyhow::Result;

use crate::commands::builtin_parsers;

/// Print every registered type with its headers.
pub fn run() -> Result<()> {
    let parsers = builtin_parsers();

    println!("Peripheral types:");
    for tag in parsers.peripheral_types() {
        let includes = parsers.includes(tag).unwrap_or_default();
        println!("  {tag:<12} {}", includes.join(", "));
    }
    println!();
    println!("Device types:");
    for tag in parsers.device_types() {
        let includes = parsers.includes(tag).unwrap_or_default();
        let family = parsers.device(tag).map_or("", |d| d.peripheral_family());
        println!("  {tag:<12} {:<20} references: {family}*", includes.join(", "));
    }
    Ok(())
}
