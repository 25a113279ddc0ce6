//! `boardc init` — board project scaffolding.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};

use crate::manifest::{BoardManifest, MANIFEST_FILE};

const PERIPHERALS_TEMPLATE: &str = "\
peripherals:
  - name: gpio-0
    type: gpio
    config:
      pin: 0
      mode: input
";

const DEVICES_TEMPLATE: &str = "\
devices:
  - name: button
    type: gpio_ctrl
    peripherals: [gpio-0]
    config:
      active_level: 0
";

/// Create a new board project in directory `name` under the cwd.
pub fn run(name: &str) -> Result<()> {
    create_project(Path::new(name), name)
}

pub(crate) fn create_project(project_dir: &Path, name: &str) -> Result<()> {
    if project_dir.exists() {
        bail!("directory '{}' already exists", project_dir.display());
    }
    fs::create_dir_all(project_dir)
        .with_context(|| format!("creating {}", project_dir.display()))?;

    fs::write(project_dir.join(MANIFEST_FILE), BoardManifest::template(name))
        .with_context(|| format!("writing {MANIFEST_FILE}"))?;
    fs::write(project_dir.join("board_peripherals.yaml"), PERIPHERALS_TEMPLATE)
        .context("writing board_peripherals.yaml")?;
    fs::write(project_dir.join("board_devices.yaml"), DEVICES_TEMPLATE)
        .context("writing board_devices.yaml")?;
    fs::write(project_dir.join(".gitignore"), "build/\n").context("writing .gitignore")?;

    println!("Created board project '{name}'");
    println!("  {name}/{MANIFEST_FILE}");
    println!("  {name}/board_peripherals.yaml");
    println!("  {name}/board_devices.yaml");
    Ok(())
}
