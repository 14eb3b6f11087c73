//! Integration tests for logger behavior while building and writing diagrams.

use arch_diagram::core::architecture;
use arch_diagram::core::render::{DiagramWriter, GraphvizRenderer, OutputFormat};
use logger::{debug, error, info, set_level, warn, Level};

#[test]
fn logs_do_not_panic() {
    set_level(Level::Debug);
    info!("info integration");
    warn!("warn integration");
    error!("error integration");
    debug!("debug integration");
}

#[test]
fn building_and_writing_at_debug_level() {
    set_level(Level::Debug);
    let dir = tempfile::TempDir::new().unwrap();
    let diagram = architecture::datalinker()
        .unwrap()
        .with_formats(vec![OutputFormat::Dot]);
    let renderer = GraphvizRenderer::new();

    let written = DiagramWriter::new(&renderer)
        .write(&diagram, dir.path())
        .unwrap();
    assert_eq!(written.len(), 1);
}
