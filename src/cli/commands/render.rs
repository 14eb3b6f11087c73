//! Render command handler
//!
//! Writes one file per requested format into the output directory.

use super::{dot_generator, fail, load_diagram};
use arch_diagram::config::Config;
use arch_diagram::core::render::{DiagramWriter, GraphvizRenderer, OutputFormat};
use logger::{error, info, verbose};
use std::fs;
use std::path::{Path, PathBuf};

/// Run the render command.
///
/// # Arguments
/// * `file` - Optional diagram description; the built-in architecture otherwise
/// * `output` - Optional output directory; config `out_dir` otherwise
/// * `formats` - Formats replacing the diagram's own list (empty: keep it)
/// * `show` - Open the results in the system viewer
/// * `config` - Effective configuration
pub fn run(
    file: Option<&Path>,
    output: Option<&Path>,
    formats: &[String],
    show: bool,
    config: &Config,
) {
    match render(file, output, formats, show, config) {
        Ok(written) => {
            for path in written {
                println!("✓ Diagram written: {}", path.display());
            }
        }
        Err(err) => {
            error!("Render failed: {err}");
            fail(&err);
        }
    }
}

fn render(
    file: Option<&Path>,
    output: Option<&Path>,
    formats: &[String],
    show: bool,
    config: &Config,
) -> Result<Vec<PathBuf>, String> {
    let formats = OutputFormat::parse_list(formats).map_err(|e| format!("✗ {e}"))?;
    let diagram = load_diagram(file, config)?;
    let show = show || diagram.show || config.render.show;
    let diagram = diagram.with_formats(formats).with_show(show);

    let out_dir = output.map_or_else(|| PathBuf::from(&config.paths.out_dir), Path::to_path_buf);
    fs::create_dir_all(&out_dir).map_err(|e| {
        format!(
            "✗ Failed to create output directory {}: {e}",
            out_dir.display()
        )
    })?;

    let renderer = GraphvizRenderer::with_engine(&config.render.engine);
    verbose!(
        "Rendering '{}' ({} nodes, {} edges) with {}",
        diagram.title,
        diagram.node_count(),
        diagram.edge_count(),
        renderer.engine()
    );

    let written = DiagramWriter::new(&renderer)
        .with_generator(dot_generator(config))
        .write(&diagram, &out_dir)
        .map_err(|e| format!("✗ Failed to render '{}': {e}", diagram.title))?;
    info!("Rendered {} file(s) into {}", written.len(), out_dir.display());
    Ok(written)
}
