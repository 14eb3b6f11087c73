//! Diagram description files
//!
//! A description is a TOML document listing clusters, nodes and edges by
//! string id. Loading it replays the declarations through a
//! [`DiagramBuilder`]: top-level nodes first, then each cluster with its
//! nodes and nested clusters, all in document order. Every id used by an
//! edge or node must be declared. Edges are recorded in document order.

use super::builder::DiagramBuilder;
use super::error::{DiagramError, Result};
use super::models::{ArrowDirection, Diagram, EdgeStyle, LineStyle, NodeId, NodeKind};
use super::render::OutputFormat;
use super::style::StyleAttrs;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fs;
use std::path::Path;

/// Top-level description document
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DiagramDescription {
    /// Diagram title
    pub name: String,
    /// Output file stem
    #[serde(default)]
    pub filename: Option<String>,
    /// Output formats (`png`, `jpg`, `svg`, `pdf`, `dot`)
    #[serde(default)]
    pub formats: Vec<String>,
    /// Layout direction (`TB`, `BT`, `LR`, `RL`)
    #[serde(default)]
    pub direction: Option<String>,
    /// Open the result after rendering
    #[serde(default)]
    pub show: bool,
    /// Graph-level attributes
    #[serde(default)]
    pub graph_attr: BTreeMap<String, toml::Value>,
    /// Node-level attributes
    #[serde(default)]
    pub node_attr: BTreeMap<String, toml::Value>,
    /// Edge-level attributes
    #[serde(default)]
    pub edge_attr: BTreeMap<String, toml::Value>,
    /// Cluster declarations
    #[serde(default)]
    pub clusters: Vec<ClusterDescription>,
    /// Node declarations
    #[serde(default)]
    pub nodes: Vec<NodeDescription>,
    /// Edge and path declarations, in drawing order
    #[serde(default)]
    pub edges: Vec<EdgeDescription>,
}

/// `[[clusters]]` entry
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClusterDescription {
    /// Id referenced by nodes and child clusters
    pub id: String,
    /// Caption; defaults to the id
    #[serde(default)]
    pub label: Option<String>,
    /// Enclosing cluster id
    #[serde(default)]
    pub parent: Option<String>,
}

/// `[[nodes]]` entry
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NodeDescription {
    /// Id referenced by edges
    pub id: String,
    /// Display label; defaults to the id
    #[serde(default)]
    pub label: Option<String>,
    /// Category name; defaults to `generic`
    #[serde(default)]
    pub kind: Option<String>,
    /// Cluster id the node belongs to
    #[serde(default)]
    pub cluster: Option<String>,
}

/// One target or a list of targets
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Targets {
    /// `to = "b"`
    One(String),
    /// `to = ["b", "c"]`
    Many(Vec<String>),
}

impl Targets {
    fn as_slice(&self) -> &[String] {
        match self {
            Self::One(t) => std::slice::from_ref(t),
            Self::Many(ts) => ts,
        }
    }
}

/// `[[edges]]` entry
///
/// Either `from` with `to` (one target or a list, drawn as a fan-out) or
/// `path` (drawn as consecutive edges). Entries are recorded in document
/// order.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EdgeDescription {
    /// Source node id
    #[serde(default)]
    pub from: Option<String>,
    /// Target node id(s)
    #[serde(default)]
    pub to: Option<Targets>,
    /// Node ids along a path
    #[serde(default)]
    pub path: Vec<String>,
    /// Text along the edge
    #[serde(default)]
    pub label: Option<String>,
    /// Line color
    #[serde(default)]
    pub color: Option<String>,
    /// `solid`, `dashed`, `dotted` or `bold`
    #[serde(default)]
    pub style: Option<String>,
    /// `forward`, `back`, `both` or `none`
    #[serde(default)]
    pub direction: Option<String>,
}

impl EdgeDescription {
    fn edge_style(&self) -> Result<EdgeStyle> {
        Ok(EdgeStyle {
            label: self.label.clone(),
            color: self.color.clone(),
            line: self
                .style
                .as_deref()
                .map(str::parse::<LineStyle>)
                .transpose()?,
            arrows: self
                .direction
                .as_deref()
                .map(str::parse::<ArrowDirection>)
                .transpose()?
                .unwrap_or_default(),
        })
    }
}

/// Attribute values may be written as TOML strings, numbers or booleans
fn attrs_from(values: &BTreeMap<String, toml::Value>) -> StyleAttrs {
    values
        .iter()
        .map(|(k, v)| {
            let text = match v {
                toml::Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            (k.clone(), text)
        })
        .collect()
}

impl DiagramDescription {
    /// Parse a description from TOML text
    ///
    /// # Errors
    /// Returns [`DiagramError::Description`] on invalid TOML or schema mismatch.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Read and parse a description file
    ///
    /// # Errors
    /// Returns [`DiagramError::Io`] if the file cannot be read, or
    /// [`DiagramError::Description`] if it cannot be parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| DiagramError::io(path, e))?;
        Self::from_toml(&content)
    }

    /// Replay the declarations and build the diagram
    ///
    /// # Errors
    /// Returns the first declaration error: duplicate ids, unknown node or
    /// cluster ids, cluster parent cycles, malformed edge entries, unknown
    /// kinds, formats, directions or edge attribute values.
    pub fn to_diagram(&self) -> Result<Diagram> {
        let mut builder = DiagramBuilder::new(self.name.clone())
            .graph_attr(attrs_from(&self.graph_attr))
            .node_attr(attrs_from(&self.node_attr))
            .edge_attr(attrs_from(&self.edge_attr))
            .show(self.show);
        if let Some(filename) = &self.filename {
            builder = builder.filename(filename.clone());
        }
        if let Some(direction) = &self.direction {
            builder = builder.direction(direction.parse()?);
        }
        for format in OutputFormat::parse_list(&self.formats)? {
            builder = builder.format(format);
        }

        self.check_ids()?;
        let mut ids = HashMap::new();
        let mut visited = HashSet::new();
        self.declare_scope(&mut builder, None, &mut ids, &mut visited)?;

        if let Some(orphan) = self.clusters.iter().find(|c| !visited.contains(c.id.as_str())) {
            // Only clusters whose parent chain loops back on itself are unreachable.
            return Err(DiagramError::ClusterCycle(orphan.id.clone()));
        }

        for (index, edge) in self.edges.iter().enumerate() {
            let style = edge.edge_style()?;
            match (&edge.from, &edge.to) {
                (Some(from), Some(to)) if edge.path.is_empty() => {
                    let from = lookup(&ids, from)?;
                    let targets = lookup_all(&ids, to.as_slice())?;
                    builder.add_styled_edges(from, &targets, &style)?;
                }
                (None, None) if edge.path.len() >= 2 => {
                    let path = lookup_all(&ids, &edge.path)?;
                    builder.styled_chain(&path, &style)?;
                }
                _ => return Err(DiagramError::InvalidEdge(index + 1)),
            }
        }

        builder.build()
    }

    /// Reject duplicate ids and references to undeclared clusters
    fn check_ids(&self) -> Result<()> {
        let mut clusters = HashSet::new();
        for cluster in &self.clusters {
            if !clusters.insert(cluster.id.as_str()) {
                return Err(DiagramError::DuplicateId(cluster.id.clone()));
            }
        }
        for cluster in &self.clusters {
            if let Some(parent) = cluster.parent.as_deref() {
                if !clusters.contains(parent) {
                    return Err(DiagramError::UnknownCluster(parent.to_string()));
                }
            }
        }

        let mut nodes = HashSet::new();
        for node in &self.nodes {
            if !nodes.insert(node.id.as_str()) {
                return Err(DiagramError::DuplicateId(node.id.clone()));
            }
            if let Some(cluster) = node.cluster.as_deref() {
                if !clusters.contains(cluster) {
                    return Err(DiagramError::UnknownCluster(cluster.to_string()));
                }
            }
        }
        Ok(())
    }

    /// Declare the nodes of `scope`, then each child cluster recursively
    fn declare_scope<'a>(
        &'a self,
        builder: &mut DiagramBuilder,
        scope: Option<&'a str>,
        ids: &mut HashMap<&'a str, NodeId>,
        visited: &mut HashSet<&'a str>,
    ) -> Result<()> {
        for node in self.nodes.iter().filter(|n| n.cluster.as_deref() == scope) {
            let kind = node
                .kind
                .as_deref()
                .map_or(Ok(NodeKind::Generic), str::parse::<NodeKind>)?;
            let label = node.label.clone().unwrap_or_else(|| node.id.clone());
            ids.insert(node.id.as_str(), builder.add_node(label, kind));
        }

        for cluster in self.clusters.iter().filter(|c| c.parent.as_deref() == scope) {
            visited.insert(cluster.id.as_str());
            let label = cluster.label.clone().unwrap_or_else(|| cluster.id.clone());
            builder.with_cluster(label, |b| {
                self.declare_scope(b, Some(cluster.id.as_str()), ids, visited)
            })?;
        }
        Ok(())
    }
}

fn lookup(ids: &HashMap<&str, NodeId>, id: &str) -> Result<NodeId> {
    ids.get(id)
        .copied()
        .ok_or_else(|| DiagramError::UnknownNode(id.to_string()))
}

fn lookup_all(ids: &HashMap<&str, NodeId>, names: &[String]) -> Result<Vec<NodeId>> {
    names.iter().map(|n| lookup(ids, n)).collect()
}
