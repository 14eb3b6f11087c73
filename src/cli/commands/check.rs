//! Check command handler
//!
//! Validates a diagram without rendering it and reports whether the
//! configured engine can be started.

use super::{fail, load_diagram};
use arch_diagram::config::Config;
use arch_diagram::core::render::GraphvizRenderer;
use logger::error;
use std::path::Path;

/// Validate a diagram and print its summary
pub fn run(file: Option<&Path>, config: &Config) {
    let diagram = match load_diagram(file, config) {
        Ok(diagram) => diagram,
        Err(err) => {
            error!("Check failed: {err}");
            fail(&err);
        }
    };

    println!("✓ Diagram is valid\n");
    print!("{diagram}");
    let outputs: Vec<String> = diagram
        .formats
        .iter()
        .map(|f| format!("{}.{}", diagram.filename, f.extension()))
        .collect();
    println!("\nOutputs: {}", outputs.join(", "));

    let renderer = GraphvizRenderer::with_engine(&config.render.engine);
    match renderer.detect() {
        Ok(version) => println!("\n✓ Engine: {version}"),
        Err(e) => println!("\n✗ Engine unavailable: {e}"),
    }
}
