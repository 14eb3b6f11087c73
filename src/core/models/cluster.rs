//! Named visual groupings of nodes

use super::NodeId;

/// Handle to a cluster inside the diagram that created it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClusterId(pub(crate) usize);

impl ClusterId {
    /// Position of the cluster in the order it was opened
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }

    /// Identifier used for the subgraph in DOT output
    ///
    /// Graphviz only draws a bounding box for subgraphs whose name starts with `cluster`.
    #[must_use]
    pub fn dot_id(self) -> String {
        format!("cluster_{}", self.0)
    }
}

/// A labeled box around the nodes declared inside it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cluster {
    /// Handle of this cluster
    pub id: ClusterId,
    /// Caption drawn on the box
    pub label: String,
    /// Enclosing cluster, if nested
    pub parent: Option<ClusterId>,
    /// Nesting depth; top-level clusters are at depth 1
    pub depth: usize,
    /// Nodes declared directly inside this cluster, in declaration order
    pub members: Vec<NodeId>,
}

impl Cluster {
    /// Whether `node` was declared directly inside this cluster
    #[must_use]
    pub fn contains(&self, node: NodeId) -> bool {
        self.members.contains(&node)
    }
}
