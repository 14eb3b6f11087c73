//! Integration tests for writing rendered diagrams

use arch_diagram::core::architecture;
use arch_diagram::core::render::{DiagramWriter, GraphvizRenderer, OutputFormat};
use arch_diagram::DiagramError;
use std::fs;
use tempfile::TempDir;

const MISSING_ENGINE: &str = "archdiagram-test-no-such-engine";

#[test]
fn dot_output_writes_exactly_one_file() {
    let dir = TempDir::new().unwrap();
    let diagram = architecture::datalinker()
        .unwrap()
        .with_formats(vec![OutputFormat::Dot]);
    let renderer = GraphvizRenderer::with_engine(MISSING_ENGINE);

    let written = DiagramWriter::new(&renderer)
        .write(&diagram, dir.path())
        .unwrap();

    assert_eq!(written, vec![dir.path().join("architecture.dot")]);
    let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
    assert_eq!(entries.len(), 1);

    let dot = fs::read_to_string(&written[0]).unwrap();
    assert!(dot.contains("subgraph cluster_0"));
    assert_eq!(dot.matches(" -> ").count(), 8);
}

#[test]
fn missing_engine_leaves_no_file() {
    let dir = TempDir::new().unwrap();
    let diagram = architecture::datalinker().unwrap();
    let renderer = GraphvizRenderer::with_engine(MISSING_ENGINE);

    let err = DiagramWriter::new(&renderer)
        .write(&diagram, dir.path())
        .unwrap_err();

    assert!(matches!(err, DiagramError::BackendUnavailable { .. }));
    assert!(!dir.path().join("architecture.png").exists());
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn png_is_rendered_when_graphviz_is_installed() {
    let renderer = GraphvizRenderer::new();
    if !renderer.is_available() {
        eprintln!("Skipping: Graphviz 'dot' not installed");
        return;
    }

    let dir = TempDir::new().unwrap();
    let diagram = architecture::datalinker().unwrap();
    let written = DiagramWriter::new(&renderer)
        .write(&diagram, dir.path())
        .unwrap();

    assert_eq!(written, vec![dir.path().join("architecture.png")]);
    let bytes = fs::read(&written[0]).unwrap();
    assert!(bytes.starts_with(b"\x89PNG"));
}
