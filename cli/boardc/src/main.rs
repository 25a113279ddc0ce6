//! boardc — board description compiler.
//!
//! Reads YAML board descriptions, validates every peripheral and device and
//! emits their initialization descriptors.

mod board;
mod commands;
mod driver;
mod logging;
mod manifest;

use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Parser, Subcommand};

use manifest::BoardManifest;

#[derive(Parser)]
#[command(name = "boardc", version, about = "Board description compiler")]
struct Cli {
    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    /// Silence all log output
    #[arg(short, long, global = true)]
    quiet: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new board project
    Init {
        /// Project name
        name: String,
    },
    /// Validate a board and summarize every entity
    Check {
        /// Board files (default: [board] files from boardc.toml)
        files: Vec<PathBuf>,
        /// Skip checking that device references name defined peripherals
        #[arg(long)]
        no_references: bool,
    },
    /// List entities without checking reference existence
    List {
        /// Board files (default: [board] files from boardc.toml)
        files: Vec<PathBuf>,
    },
    /// Compile a board and write descriptors as JSON
    Compile {
        /// Board files (default: [board] files from boardc.toml)
        files: Vec<PathBuf>,
        /// Output path (default: [output] path from boardc.toml)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Skip checking that device references name defined peripherals
        #[arg(long)]
        no_references: bool,
    },
    /// List registered peripheral and device types
    Types,
}

fn main() {
    let cli = Cli::parse();

    let result = run(cli);
    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;
    let manifest = BoardManifest::find_and_load(&cwd)?;

    let configured = manifest.as_ref().and_then(|(m, _)| m.log.level.as_deref());
    logging::configure_logging(logging::level(cli.verbose, cli.quiet, configured)?)?;
    if let Some((m, dir)) = &manifest {
        log::debug!("using manifest for '{}' in {}", m.project.name, dir.display());
    }

    match cli.command {
        Commands::Init { name } => commands::init::run(&name),

        Commands::Check {
            files,
            no_references,
        } => {
            let board = commands::load_board(&files, manifest.as_ref())?;
            let references =
                commands::check_references(no_references, manifest.as_ref().map(|(m, _)| m));
            commands::check::run(&board, references)
        }

        Commands::List { files } => {
            let board = commands::load_board(&files, manifest.as_ref())?;
            commands::list::run(&board)
        }

        Commands::Compile {
            files,
            output,
            no_references,
        } => {
            let board = commands::load_board(&files, manifest.as_ref())?;
            let references =
                commands::check_references(no_references, manifest.as_ref().map(|(m, _)| m));
            let output = match (output, &manifest) {
                (Some(path), _) => path,
                (None, Some((m, dir))) => m.output_path(dir),
                (None, None) => cwd.join("build/board.json"),
            };
            let compiled = commands::compile::run(&board, references, &output)?;
            println!(
                "Compiled {} peripheral(s), {} device(s) -> {}",
                compiled.peripherals.len(),
                compiled.devices.len(),
                commands::display_path(&output, &cwd)
            );
            Ok(())
        }

        Commands::Types => commands::types::run(),
    }
}
