//! Integration tests for diagram construction

use arch_diagram::core::architecture;
use arch_diagram::core::builder::DiagramBuilder;
use arch_diagram::core::models::{Diagram, NodeKind};
use arch_diagram::core::render::dot::to_dot;
use arch_diagram::DiagramError;

fn three_nodes() -> (DiagramBuilder, [arch_diagram::core::models::NodeId; 3]) {
    let mut b = DiagramBuilder::new("t");
    let a = b.add_node("A", NodeKind::Server);
    let m = b.add_node("B", NodeKind::Server);
    let c = b.add_node("C", NodeKind::Server);
    (b, [a, m, c])
}

fn dot_of(diagram: &Diagram) -> String {
    to_dot(diagram, None).unwrap()
}

#[test]
fn fan_out_equals_individual_edges() {
    let (mut fan, [a, m, c]) = three_nodes();
    fan.add_edges(a, &[m, c]).unwrap();

    let (mut single, [a2, m2, c2]) = three_nodes();
    single.add_edge(a2, m2).unwrap();
    single.add_edge(a2, c2).unwrap();

    let fan = fan.build().unwrap();
    let single = single.build().unwrap();
    assert_eq!(fan.edge_labels(), single.edge_labels());
    assert_eq!(dot_of(&fan), dot_of(&single));
}

#[test]
fn chain_equals_consecutive_edges() {
    let (mut chained, [a, m, c]) = three_nodes();
    chained.chain(&[a, m, c]).unwrap();

    let (mut single, [a2, m2, c2]) = three_nodes();
    single.add_edge(a2, m2).unwrap();
    single.add_edge(m2, c2).unwrap();

    assert_eq!(
        chained.build().unwrap().edge_labels(),
        vec![("A", "B"), ("B", "C")]
    );
    assert_eq!(single.build().unwrap().edge_labels(), vec![("A", "B"), ("B", "C")]);
}

#[test]
fn every_clustered_node_has_exactly_one_cluster() {
    let diagram = architecture::datalinker().unwrap();
    for node in &diagram.nodes {
        let owners = diagram
            .clusters
            .iter()
            .filter(|c| c.contains(node.id))
            .count();
        let expected = usize::from(node.cluster.is_some());
        assert_eq!(owners, expected, "node '{}'", node.label);
    }
}

#[test]
fn edge_to_node_of_other_diagram_fails() {
    let mut other = DiagramBuilder::new("other");
    let ghost = other.add_node("ghost", NodeKind::Generic);

    let mut b = DiagramBuilder::new("t");
    let a = b.add_node("a", NodeKind::Generic);
    assert!(matches!(
        b.chain(&[a, ghost]),
        Err(DiagramError::InvalidNodeId(_))
    ));
    assert_eq!(b.build().unwrap().edge_count(), 0);
}

#[test]
fn repeated_builds_produce_identical_dot() {
    let first = dot_of(&architecture::datalinker().unwrap());
    let second = dot_of(&architecture::datalinker().unwrap());
    assert_eq!(first, second);
}

#[test]
fn end_to_end_reference_diagram() {
    let diagram = architecture::datalinker().unwrap();
    assert_eq!(diagram.node_count(), 8);
    assert_eq!(diagram.clusters.len(), 2);
    assert_eq!(diagram.edge_count(), 8);

    let dot = dot_of(&diagram);
    assert!(dot.contains("label=\"Science Platform\""));
    assert!(dot.contains("label=\"Data Storage\""));
    assert!(dot.contains("splines=\"spline\""));
    assert!(dot.contains("n2 -> n3\n"));
    assert!(dot.contains("n2 -> n4\n"));
    assert!(dot.contains("n0 -> n7\n"));
}
