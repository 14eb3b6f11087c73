//! Explicit builder for diagrams
//!
//! Nodes are added one at a time and receive a [`NodeId`]. Cluster membership
//! is decided by which clusters are open when a node is added: the innermost
//! open cluster owns it. Edges are recorded with [`DiagramBuilder::add_edge`]
//! (which returns its target so calls can be chained),
//! [`DiagramBuilder::add_edges`] for fan-out and [`DiagramBuilder::chain`]
//! for paths. Nothing is rendered until the built [`Diagram`] is handed to a
//! [`DiagramWriter`](crate::core::render::DiagramWriter).
//!
//! ```
//! use arch_diagram::core::builder::DiagramBuilder;
//! use arch_diagram::core::models::NodeKind;
//!
//! let mut b = DiagramBuilder::new("example");
//! let user = b.add_node("End user", NodeKind::User);
//! let (web, db) = b
//!     .with_cluster("Backend", |b| {
//!         Ok((
//!             b.add_node("Web", NodeKind::Server),
//!             b.add_node("Database", NodeKind::Database),
//!         ))
//!     })
//!     .unwrap();
//! b.chain(&[user, web, db]).unwrap();
//! let diagram = b.build().unwrap();
//! assert_eq!(diagram.edge_count(), 2);
//! ```

use super::error::{DiagramError, Result};
use super::models::{
    Cluster, ClusterId, Diagram, Direction, Edge, EdgeStyle, Node, NodeId, NodeKind,
};
use super::render::OutputFormat;
use super::style::StyleAttrs;
use logger::debug;
use std::sync::atomic::{AtomicU64, Ordering};

/// Source of builder identities stamped into every [`NodeId`]
static NEXT_OWNER: AtomicU64 = AtomicU64::new(1);

/// Accumulates nodes, clusters and edges, then freezes them into a [`Diagram`]
#[derive(Debug)]
pub struct DiagramBuilder {
    owner: u64,
    title: String,
    filename: Option<String>,
    formats: Vec<OutputFormat>,
    show: bool,
    direction: Direction,
    graph_attr: StyleAttrs,
    node_attr: StyleAttrs,
    edge_attr: StyleAttrs,
    nodes: Vec<Node>,
    clusters: Vec<Cluster>,
    edges: Vec<Edge>,
    open: Vec<ClusterId>,
}

impl DiagramBuilder {
    /// Start a diagram titled `title`
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            owner: NEXT_OWNER.fetch_add(1, Ordering::Relaxed),
            title: title.into(),
            filename: None,
            formats: Vec::new(),
            show: false,
            direction: Direction::default(),
            graph_attr: StyleAttrs::new(),
            node_attr: StyleAttrs::new(),
            edge_attr: StyleAttrs::new(),
            nodes: Vec::new(),
            clusters: Vec::new(),
            edges: Vec::new(),
            open: Vec::new(),
        }
    }

    /// Output file stem; defaults to the title in `snake_case`
    #[must_use]
    pub fn filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    /// Add an output format; defaults to PNG when none is given
    #[must_use]
    pub fn format(mut self, format: OutputFormat) -> Self {
        if !self.formats.contains(&format) {
            self.formats.push(format);
        }
        self
    }

    /// Open the rendered file in the system viewer (`false` for headless use)
    #[must_use]
    pub const fn show(mut self, show: bool) -> Self {
        self.show = show;
        self
    }

    /// Layout direction
    #[must_use]
    pub const fn direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Graph-level attribute overrides
    #[must_use]
    pub fn graph_attr(mut self, attrs: StyleAttrs) -> Self {
        self.graph_attr = attrs;
        self
    }

    /// Node-level attribute overrides
    #[must_use]
    pub fn node_attr(mut self, attrs: StyleAttrs) -> Self {
        self.node_attr = attrs;
        self
    }

    /// Edge-level attribute overrides
    #[must_use]
    pub fn edge_attr(mut self, attrs: StyleAttrs) -> Self {
        self.edge_attr = attrs;
        self
    }

    /// Declare a node inside the innermost open cluster (or at top level)
    pub fn add_node(&mut self, label: impl Into<String>, kind: NodeKind) -> NodeId {
        let id = NodeId {
            owner: self.owner,
            index: self.nodes.len(),
        };
        let cluster = self.open.last().copied();
        if let Some(cid) = cluster {
            self.clusters[cid.0].members.push(id);
        }
        let label = label.into();
        debug!("node {} '{label}' ({kind})", id.dot_id());
        self.nodes.push(Node {
            id,
            label,
            kind,
            cluster,
        });
        id
    }

    /// Open a cluster; nodes added until the matching [`end_cluster`](Self::end_cluster) belong to it
    pub fn begin_cluster(&mut self, label: impl Into<String>) -> ClusterId {
        let id = ClusterId(self.clusters.len());
        let parent = self.open.last().copied();
        self.clusters.push(Cluster {
            id,
            label: label.into(),
            parent,
            depth: self.open.len() + 1,
            members: Vec::new(),
        });
        self.open.push(id);
        id
    }

    /// Close the innermost open cluster
    ///
    /// # Errors
    /// Returns [`DiagramError::NoOpenCluster`] when no cluster is open.
    pub fn end_cluster(&mut self) -> Result<ClusterId> {
        self.open.pop().ok_or(DiagramError::NoOpenCluster)
    }

    /// Run `f` inside a new cluster, closing it afterwards even if `f` fails
    ///
    /// # Errors
    /// Returns the error of `f`, or [`DiagramError::NoOpenCluster`] if `f`
    /// closed more clusters than it opened.
    pub fn with_cluster<T>(
        &mut self,
        label: impl Into<String>,
        f: impl FnOnce(&mut Self) -> Result<T>,
    ) -> Result<T> {
        let depth = self.open.len();
        self.begin_cluster(label);
        let result = f(self);
        if self.open.len() <= depth {
            return result.and(Err(DiagramError::NoOpenCluster));
        }
        self.open.truncate(depth);
        result
    }

    fn check(&self, id: NodeId) -> Result<()> {
        if id.owner == self.owner && id.index < self.nodes.len() {
            Ok(())
        } else {
            Err(DiagramError::InvalidNodeId(id.index))
        }
    }

    /// Record `from -> to` and return `to`, so `b.add_edge(b.add_edge(a, b)?, c)`
    /// reads like a chain
    ///
    /// # Errors
    /// Returns [`DiagramError::InvalidNodeId`] if either handle was not issued by this builder.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId) -> Result<NodeId> {
        self.add_styled_edge(from, to, EdgeStyle::default())
    }

    /// Record `from -> to` with presentation overrides and return `to`
    ///
    /// # Errors
    /// Returns [`DiagramError::InvalidNodeId`] if either handle was not issued by this builder.
    pub fn add_styled_edge(&mut self, from: NodeId, to: NodeId, style: EdgeStyle) -> Result<NodeId> {
        self.check(from)?;
        self.check(to)?;
        self.edges.push(Edge { from, to, style });
        Ok(to)
    }

    /// Fan-out: record `from -> t` for every `t` in `targets`
    ///
    /// Either all edges are recorded or none are.
    ///
    /// # Errors
    /// Returns [`DiagramError::InvalidNodeId`] if any handle was not issued by this builder.
    pub fn add_edges(&mut self, from: NodeId, targets: &[NodeId]) -> Result<()> {
        self.add_styled_edges(from, targets, &EdgeStyle::default())
    }

    /// Fan-out with the same presentation on every edge
    ///
    /// # Errors
    /// Returns [`DiagramError::InvalidNodeId`] if any handle was not issued by this builder.
    pub fn add_styled_edges(
        &mut self,
        from: NodeId,
        targets: &[NodeId],
        style: &EdgeStyle,
    ) -> Result<()> {
        self.check(from)?;
        for &to in targets {
            self.check(to)?;
        }
        self.edges.extend(targets.iter().map(|&to| Edge {
            from,
            to,
            style: style.clone(),
        }));
        Ok(())
    }

    /// Fan-in: record `s -> to` for every `s` in `sources`
    ///
    /// # Errors
    /// Returns [`DiagramError::InvalidNodeId`] if any handle was not issued by this builder.
    pub fn add_edges_into(&mut self, sources: &[NodeId], to: NodeId) -> Result<()> {
        self.check(to)?;
        for &from in sources {
            self.check(from)?;
        }
        self.edges.extend(sources.iter().map(|&from| Edge {
            from,
            to,
            style: EdgeStyle::default(),
        }));
        Ok(())
    }

    /// Path: record `a -> b`, `b -> c`, ... for consecutive handles
    ///
    /// # Errors
    /// Returns [`DiagramError::InvalidNodeId`] if any handle was not issued by this builder.
    pub fn chain(&mut self, path: &[NodeId]) -> Result<()> {
        self.styled_chain(path, &EdgeStyle::default())
    }

    /// Path with the same presentation on every edge
    ///
    /// # Errors
    /// Returns [`DiagramError::InvalidNodeId`] if any handle was not issued by this builder.
    pub fn styled_chain(&mut self, path: &[NodeId], style: &EdgeStyle) -> Result<()> {
        for &id in path {
            self.check(id)?;
        }
        self.edges.extend(path.windows(2).map(|pair| Edge {
            from: pair[0],
            to: pair[1],
            style: style.clone(),
        }));
        Ok(())
    }

    /// Freeze the declarations into a [`Diagram`]
    ///
    /// # Errors
    /// Returns [`DiagramError::UnclosedCluster`] if a cluster is still open.
    pub fn build(self) -> Result<Diagram> {
        if let Some(open) = self.open.last() {
            return Err(DiagramError::UnclosedCluster(
                self.clusters[open.0].label.clone(),
            ));
        }

        let filename = self
            .filename
            .unwrap_or_else(|| default_filename(&self.title));
        let formats = if self.formats.is_empty() {
            vec![OutputFormat::Png]
        } else {
            self.formats
        };

        Ok(Diagram {
            title: self.title,
            filename,
            formats,
            show: self.show,
            direction: self.direction,
            graph_attr: self.graph_attr,
            node_attr: self.node_attr,
            edge_attr: self.edge_attr,
            nodes: self.nodes,
            clusters: self.clusters,
            edges: self.edges,
        })
    }
}

/// `"datalinker architecture"` -> `"datalinker_architecture"`
fn default_filename(title: &str) -> String {
    let stem: String = title
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect();
    if stem.is_empty() {
        "diagram".to_string()
    } else {
        stem
    }
}
