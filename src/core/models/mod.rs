//! Data models for diagrams

pub mod cluster;
pub mod diagram;
pub mod edge;
pub mod node;

pub use cluster::{Cluster, ClusterId};
pub use diagram::{Diagram, Direction};
pub use edge::{ArrowDirection, Edge, EdgeStyle, LineStyle};
pub use node::{Node, NodeId, NodeKind};
