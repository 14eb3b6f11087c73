//! Dot command handler

use super::{dot_generator, fail, load_diagram};
use arch_diagram::config::Config;
use logger::{error, info};
use std::fs;
use std::path::Path;

/// Print the DOT source of a diagram, or write it to `output`
pub fn run(file: Option<&Path>, output: Option<&Path>, config: &Config) {
    let result = load_diagram(file, config).and_then(|diagram| {
        dot_generator(config)
            .generate(&diagram)
            .map_err(|e| format!("✗ Failed to generate DOT: {e}"))
    });

    let dot = match result {
        Ok(dot) => dot,
        Err(err) => {
            error!("DOT generation failed: {err}");
            fail(&err);
        }
    };

    match output {
        Some(path) => {
            if let Err(e) = fs::write(path, &dot) {
                error!("Failed to write {}: {e}", path.display());
                fail(&format!("✗ Failed to write {}: {e}", path.display()));
            }
            info!("DOT written to {}", path.display());
            println!("✓ DOT written: {}", path.display());
        }
        None => print!("{dot}"),
    }
}
