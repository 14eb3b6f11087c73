//! The immutable result of building a diagram

use super::{Cluster, ClusterId, Edge, Node, NodeId};
use crate::core::error::DiagramError;
use crate::core::render::OutputFormat;
use crate::core::style::StyleAttrs;
use std::fmt;
use std::str::FromStr;

/// Layout direction of the graph (`rankdir`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Top to bottom
    TopBottom,
    /// Bottom to top
    BottomTop,
    /// Left to right
    #[default]
    LeftRight,
    /// Right to left
    RightLeft,
}

impl Direction {
    /// Graphviz `rankdir` value
    #[must_use]
    pub const fn as_dot(self) -> &'static str {
        match self {
            Self::TopBottom => "TB",
            Self::BottomTop => "BT",
            Self::LeftRight => "LR",
            Self::RightLeft => "RL",
        }
    }
}

impl FromStr for Direction {
    type Err = DiagramError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "TB" => Ok(Self::TopBottom),
            "BT" => Ok(Self::BottomTop),
            "LR" => Ok(Self::LeftRight),
            "RL" => Ok(Self::RightLeft),
            _ => Err(DiagramError::UnknownDirection(s.to_string())),
        }
    }
}

/// A fully declared diagram: nodes, clusters, edges and presentation settings
///
/// Produced by [`DiagramBuilder::build`](crate::core::builder::DiagramBuilder::build);
/// never mutated afterwards except for the output settings (`with_formats`,
/// `with_show`), which do not touch topology.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagram {
    /// Title; also the default graph label
    pub title: String,
    /// Output file stem (no extension)
    pub filename: String,
    /// Requested output formats, one file each
    pub formats: Vec<OutputFormat>,
    /// Open the result in the system viewer after rendering
    pub show: bool,
    /// Layout direction
    pub direction: Direction,
    /// Graph-level attribute overrides
    pub graph_attr: StyleAttrs,
    /// Node-level attribute overrides
    pub node_attr: StyleAttrs,
    /// Edge-level attribute overrides
    pub edge_attr: StyleAttrs,
    /// Nodes in declaration order
    pub nodes: Vec<Node>,
    /// Clusters in the order they were opened
    pub clusters: Vec<Cluster>,
    /// Edges in declaration order
    pub edges: Vec<Edge>,
}

impl Diagram {
    /// Number of nodes
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Look up a node by handle
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index).filter(|n| n.id == id)
    }

    /// Look up a cluster by handle
    #[must_use]
    pub fn cluster(&self, id: ClusterId) -> Option<&Cluster> {
        self.clusters.get(id.0)
    }

    /// First node carrying `label`
    #[must_use]
    pub fn node_by_label(&self, label: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.label == label)
    }

    /// First cluster carrying `label`
    #[must_use]
    pub fn cluster_by_label(&self, label: &str) -> Option<&Cluster> {
        self.clusters.iter().find(|c| c.label == label)
    }

    /// Labels of the nodes declared directly in the cluster named `label`
    #[must_use]
    pub fn member_labels(&self, label: &str) -> Vec<&str> {
        self.cluster_by_label(label)
            .map(|c| {
                c.members
                    .iter()
                    .filter_map(|id| self.node(*id))
                    .map(|n| n.label.as_str())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Clusters directly inside `parent` (`None` for top level), in opening order
    pub fn child_clusters(&self, parent: Option<ClusterId>) -> impl Iterator<Item = &Cluster> {
        self.clusters.iter().filter(move |c| c.parent == parent)
    }

    /// Nodes declared outside every cluster
    pub fn top_level_nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(|n| n.cluster.is_none())
    }

    /// Edges as `(from label, to label)` pairs, in declaration order
    #[must_use]
    pub fn edge_labels(&self) -> Vec<(&str, &str)> {
        self.edges
            .iter()
            .filter_map(|e| {
                let from = self.node(e.from)?;
                let to = self.node(e.to)?;
                Some((from.label.as_str(), to.label.as_str()))
            })
            .collect()
    }

    /// Replace the output formats
    #[must_use]
    pub fn with_formats(mut self, formats: Vec<OutputFormat>) -> Self {
        if !formats.is_empty() {
            self.formats = formats;
        }
        self
    }

    /// Replace the preview flag
    #[must_use]
    pub const fn with_show(mut self, show: bool) -> Self {
        self.show = show;
        self
    }
}

impl fmt::Display for Diagram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Diagram \"{}\" ({} nodes, {} clusters, {} edges):",
            self.title,
            self.nodes.len(),
            self.clusters.len(),
            self.edges.len()
        )?;
        writeln!(f)?;

        for cluster in &self.clusters {
            let indent = "  ".repeat(cluster.depth);
            let members: Vec<&str> = cluster
                .members
                .iter()
                .filter_map(|id| self.node(*id))
                .map(|n| n.label.as_str())
                .collect();
            writeln!(f, "{indent}[{}] {}", cluster.label, members.join(", "))?;
        }

        for (from, to) in self.edge_labels() {
            writeln!(f, "  {from} → {to}")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_parses_case_insensitively() {
        assert_eq!("lr".parse::<Direction>().unwrap(), Direction::LeftRight);
        assert_eq!("TB".parse::<Direction>().unwrap(), Direction::TopBottom);
        assert!(matches!(
            "diagonal".parse::<Direction>(),
            Err(DiagramError::UnknownDirection(_))
        ));
    }

    #[test]
    fn default_direction_is_left_right() {
        assert_eq!(Direction::default().as_dot(), "LR");
    }
}
