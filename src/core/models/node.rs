//! Diagram nodes and their visual categories

use crate::core::error::DiagramError;
use std::fmt;
use std::str::FromStr;

/// Handle to a node inside the diagram that created it
///
/// Handles carry the identity of their builder, so a handle obtained from one
/// diagram cannot silently address a node of another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    pub(crate) owner: u64,
    pub(crate) index: usize,
}

impl NodeId {
    /// Position of the node in declaration order
    #[must_use]
    pub const fn index(self) -> usize {
        self.index
    }

    /// Identifier used for the node in DOT output
    #[must_use]
    pub fn dot_id(self) -> String {
        format!("n{}", self.index)
    }
}

/// Visual category of a node; decides its shape, color and icon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// End user or client
    User,
    /// Network load balancer / ingress
    LoadBalancer,
    /// Service running on a container orchestration platform
    Kubernetes,
    /// Generic compute server
    Server,
    /// Relational or analytical database
    Database,
    /// Object or file storage
    Storage,
    /// Anything else
    Generic,
}

impl NodeKind {
    /// All categories, in a stable order
    pub const ALL: [Self; 7] = [
        Self::User,
        Self::LoadBalancer,
        Self::Kubernetes,
        Self::Server,
        Self::Database,
        Self::Storage,
        Self::Generic,
    ];

    /// Short lowercase name, also used as the icon file stem
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::LoadBalancer => "load_balancer",
            Self::Kubernetes => "kubernetes",
            Self::Server => "server",
            Self::Database => "database",
            Self::Storage => "storage",
            Self::Generic => "generic",
        }
    }

    /// Graphviz shape used when no icon is available
    #[must_use]
    pub const fn shape(self) -> &'static str {
        match self {
            Self::User => "ellipse",
            Self::LoadBalancer => "hexagon",
            Self::Kubernetes => "component",
            Self::Server | Self::Generic => "box",
            Self::Database => "cylinder",
            Self::Storage => "folder",
        }
    }

    /// Fill color used when no icon is available
    #[must_use]
    pub const fn fill_color(self) -> &'static str {
        match self {
            Self::User => "#FFE0B2",
            Self::LoadBalancer => "#C8E6C9",
            Self::Kubernetes => "#BBDEFB",
            Self::Server => "#E0E0E0",
            Self::Database => "#D1C4E9",
            Self::Storage => "#FFF9C4",
            Self::Generic => "#FFFFFF",
        }
    }
}

impl FromStr for NodeKind {
    type Err = DiagramError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace(['-', ' '], "_").as_str() {
            "user" | "client" | "person" => Ok(Self::User),
            "load_balancer" | "loadbalancer" | "load_balancing" | "lb" | "ingress" => {
                Ok(Self::LoadBalancer)
            }
            "kubernetes" | "k8s" | "kubernetes_engine" | "gke" | "service" => Ok(Self::Kubernetes),
            "server" | "compute" => Ok(Self::Server),
            "database" | "db" => Ok(Self::Database),
            "storage" | "object_store" | "bucket" => Ok(Self::Storage),
            "generic" | "node" => Ok(Self::Generic),
            _ => Err(DiagramError::UnknownKind(s.to_string())),
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// A labeled, categorized entity in the diagram
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    /// Handle of this node
    pub id: NodeId,
    /// Text shown under or inside the node
    pub label: String,
    /// Visual category
    pub kind: NodeKind,
    /// Innermost cluster the node was declared in
    pub cluster: Option<super::ClusterId>,
}

impl Node {
    /// Number of text lines in the label
    #[must_use]
    pub fn label_lines(&self) -> usize {
        self.label.lines().count().max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_parses_aliases() {
        assert_eq!("User".parse::<NodeKind>().unwrap(), NodeKind::User);
        assert_eq!(
            "load-balancer".parse::<NodeKind>().unwrap(),
            NodeKind::LoadBalancer
        );
        assert_eq!("k8s".parse::<NodeKind>().unwrap(), NodeKind::Kubernetes);
        assert_eq!(
            "object store".parse::<NodeKind>().unwrap(),
            NodeKind::Storage
        );
    }

    #[test]
    fn kind_rejects_unknown() {
        let err = "mainframe".parse::<NodeKind>().unwrap_err();
        assert!(matches!(err, DiagramError::UnknownKind(k) if k == "mainframe"));
    }

    #[test]
    fn slug_round_trips() {
        for kind in NodeKind::ALL {
            assert_eq!(kind.slug().parse::<NodeKind>().unwrap(), kind);
        }
    }

    #[test]
    fn multi_line_labels_are_counted() {
        let node = Node {
            id: NodeId { owner: 0, index: 3 },
            label: "Object\nstore".to_string(),
            kind: NodeKind::Storage,
            cluster: None,
        };
        assert_eq!(node.label_lines(), 2);
        assert_eq!(node.id.dot_id(), "n3");
    }
}
