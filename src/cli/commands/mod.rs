//! CLI command handlers for `archdiagram`.
//!
//! This module provides handlers for various CLI subcommands.
//! Each command is implemented in its own submodule.

pub mod check;
pub mod config;
pub mod dot;
pub mod render;

use arch_diagram::config::Config;
use arch_diagram::core::{
    architecture,
    description::DiagramDescription,
    models::Diagram,
    render::{DotGenerator, OutputFormat},
};
use logger::{error, info};
use std::path::{Path, PathBuf};

/// Load the diagram described by `file`, or the built-in architecture
///
/// A description that lists no formats uses the configured default format.
///
/// # Errors
/// Returns a printable `✗ …` message if the file cannot be read or the
/// diagram is invalid.
pub fn load_diagram(file: Option<&Path>, config: &Config) -> Result<Diagram, String> {
    let Some(path) = file else {
        info!("Using built-in datalinker architecture");
        return architecture::datalinker()
            .map_err(|e| format!("✗ Failed to build built-in diagram: {e}"));
    };

    let description = DiagramDescription::load(path).map_err(|e| {
        error!("Failed to load {}: {e}", path.display());
        format!("✗ Failed to load {}: {e}", path.display())
    })?;
    let use_config_format = description.formats.is_empty();

    let diagram = description.to_diagram().map_err(|e| {
        error!("Invalid diagram {}: {e}", path.display());
        format!("✗ Invalid diagram {}: {e}", path.display())
    })?;
    info!("Diagram loaded: {}", path.display());

    if use_config_format && !config.render.format.is_empty() {
        let format = config
            .render
            .format
            .parse::<OutputFormat>()
            .map_err(|e| format!("✗ Invalid config format: {e}"))?;
        return Ok(diagram.with_formats(vec![format]));
    }
    Ok(diagram)
}

/// DOT generator honoring the configured icon directory
pub fn dot_generator(config: &Config) -> DotGenerator {
    if config.paths.icons_dir.is_empty() {
        DotGenerator::new()
    } else {
        DotGenerator::with_icons_dir(PathBuf::from(&config.paths.icons_dir))
    }
}

/// Report a failed command and exit with status 1
pub fn fail(message: &str) -> ! {
    eprintln!("{message}");
    std::process::exit(1);
}
