//! Integration smoke tests for `arch_diagram`

use arch_diagram::core::architecture;
use arch_diagram::core::render::dot::to_dot;
use arch_diagram::get_version;

#[test]
fn version_is_not_empty() {
    let v = get_version();
    assert!(!v.trim().is_empty());
}

#[test]
fn builtin_diagram_serializes() {
    let diagram = architecture::datalinker().unwrap();
    let dot = to_dot(&diagram, None).unwrap();
    assert!(dot.starts_with("digraph \"datalinker architecture\" {"));
    assert_eq!(dot.matches("subgraph cluster_").count(), 2);
    assert_eq!(dot.matches(" -> ").count(), 8);
}
