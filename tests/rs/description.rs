//! Integration tests for TOML diagram descriptions

use arch_diagram::core::architecture;
use arch_diagram::core::description::DiagramDescription;
use arch_diagram::core::render::dot::to_dot;
use arch_diagram::DiagramError;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const SAMPLE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/diagrams/datalinker.toml");

#[test]
fn sample_matches_builtin_diagram() {
    let from_file = DiagramDescription::load(Path::new(SAMPLE))
        .unwrap()
        .to_diagram()
        .unwrap();
    let builtin = architecture::datalinker().unwrap();

    assert_eq!(from_file.edge_labels(), builtin.edge_labels());
    assert_eq!(
        from_file.member_labels("Science Platform"),
        builtin.member_labels("Science Platform")
    );
    assert_eq!(
        to_dot(&from_file, None).unwrap(),
        to_dot(&builtin, None).unwrap()
    );
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = TempDir::new().unwrap();
    let err = DiagramDescription::load(&dir.path().join("nope.toml")).unwrap_err();
    assert!(matches!(err, DiagramError::Io { .. }));
}

#[test]
fn nested_clusters_and_paths() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested.toml");
    fs::write(
        &path,
        r#"
name = "Nested Example"
direction = "TB"

[[clusters]]
id = "outer"
label = "Region"

[[clusters]]
id = "inner"
label = "Zone"
parent = "outer"

[[nodes]]
id = "lb"
kind = "lb"
cluster = "outer"

[[nodes]]
id = "web"
kind = "server"
cluster = "inner"

[[nodes]]
id = "db"
kind = "database"
cluster = "inner"

[[edges]]
path = ["lb", "web", "db"]
color = "firebrick"
direction = "both"
"#,
    )
    .unwrap();

    let diagram = DiagramDescription::load(&path)
        .unwrap()
        .to_diagram()
        .unwrap();

    assert_eq!(diagram.filename, "nested_example");
    assert_eq!(diagram.member_labels("Region"), vec!["lb"]);
    assert_eq!(diagram.member_labels("Zone"), vec!["web", "db"]);
    assert_eq!(diagram.edge_labels(), vec![("lb", "web"), ("web", "db")]);

    let dot = to_dot(&diagram, None).unwrap();
    assert!(dot.contains("rankdir=\"TB\""));
    assert!(dot.contains("\t\tsubgraph cluster_1 {"));
    assert!(dot.contains("n1 -> n2 [color=\"firebrick\", dir=\"both\"]"));
}

#[test]
fn bad_edge_style_is_rejected() {
    let doc = r#"
name = "x"
[[nodes]]
id = "a"
[[nodes]]
id = "b"
[[edges]]
from = "a"
to = "b"
style = "wavy"
"#;
    let err = DiagramDescription::from_toml(doc)
        .unwrap()
        .to_diagram()
        .unwrap_err();
    assert!(matches!(err, DiagramError::UnknownEdgeAttr(_)));
}

#[test]
fn bad_format_is_rejected() {
    let doc = "name = \"x\"\nformats = [\"gif\"]\n";
    let err = DiagramDescription::from_toml(doc)
        .unwrap()
        .to_diagram()
        .unwrap_err();
    assert!(matches!(err, DiagramError::UnknownFormat(_)));
}
