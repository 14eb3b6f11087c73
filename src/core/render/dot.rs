//! DOT source generator
//!
//! Serializes a [`Diagram`] into Graphviz DOT. The output only depends on the
//! diagram (and on which icon files exist), so generating twice yields
//! byte-identical text.

use crate::core::error::Result;
use crate::core::models::{ArrowDirection, Cluster, Diagram, Edge, Node};
use crate::core::style::{self, StyleAttrs};
use askama::Template;
use std::fmt::Write;
use std::path::{Path, PathBuf};

/// Document skeleton; the body lines are produced in Rust
#[derive(Template)]
#[template(path = "diagram.dot", escape = "none")]
struct DotTemplate<'a> {
    title: &'a str,
    graph_attrs: &'a str,
    node_attrs: &'a str,
    edge_attrs: &'a str,
    body: &'a [String],
}

/// Generator for DOT source
#[derive(Debug, Clone, Default)]
pub struct DotGenerator {
    icons_dir: Option<PathBuf>,
}

impl DotGenerator {
    /// Generator that draws every node with its category shape
    #[must_use]
    pub const fn new() -> Self {
        Self { icons_dir: None }
    }

    /// Generator that uses `<dir>/<kind>.png` as node image where such a file exists
    #[must_use]
    pub fn with_icons_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            icons_dir: Some(dir.into()),
        }
    }

    /// Serialize `diagram` to DOT
    ///
    /// # Errors
    /// Returns [`DiagramError::Template`](crate::core::error::DiagramError::Template)
    /// if the document template fails to render.
    pub fn generate(&self, diagram: &Diagram) -> Result<String> {
        let graph_attrs = diagram
            .graph_attr
            .merged_over(&style::graph_defaults(&diagram.title, diagram.direction));
        let node_attrs = diagram.node_attr.merged_over(&style::node_defaults());
        let edge_attrs = diagram.edge_attr.merged_over(&style::edge_defaults());

        let mut body = Vec::new();
        for node in diagram.top_level_nodes() {
            body.push(self.node_line(node));
        }
        for cluster in diagram.child_clusters(None) {
            self.cluster_lines(diagram, cluster, 0, &mut body);
        }
        for edge in &diagram.edges {
            body.push(edge_line(edge));
        }

        let template = DotTemplate {
            title: &quote(&diagram.title),
            graph_attrs: &attr_list(&graph_attrs),
            node_attrs: &attr_list(&node_attrs),
            edge_attrs: &attr_list(&edge_attrs),
            body: &body,
        };
        let mut output = template.render()?;
        let trimmed = output.trim_end().len();
        output.truncate(trimmed);
        output.push('\n');
        Ok(output)
    }

    fn icon_for(&self, node: &Node) -> Option<PathBuf> {
        let dir = self.icons_dir.as_deref()?;
        let path = dir.join(format!("{}.png", node.kind.slug()));
        path.is_file().then_some(path)
    }

    /// Attributes specific to one node
    fn node_attrs(&self, node: &Node) -> StyleAttrs {
        // Extra lines need room under a fixed-size node.
        #[allow(clippy::cast_precision_loss)]
        let padding = 0.4 * (node.label_lines() - 1) as f64;
        let mut attrs = StyleAttrs::new().with("label", node.label.as_str());

        if let Some(icon) = self.icon_for(node) {
            attrs.set("shape", "none");
            attrs.set("image", icon.display().to_string());
            attrs.set("height", format!("{:.1}", 1.9 + padding));
        } else {
            attrs.set("shape", node.kind.shape());
            attrs.set("style", "rounded,filled");
            attrs.set("fillcolor", node.kind.fill_color());
            attrs.set("labelloc", "c");
            if padding > 0.0 {
                attrs.set("height", format!("{:.1}", 1.4 + padding));
            }
        }
        attrs
    }

    fn node_line(&self, node: &Node) -> String {
        format!(
            "{} [{}]",
            node.id.dot_id(),
            attr_list(&self.node_attrs(node))
        )
    }

    fn cluster_lines(&self, diagram: &Diagram, cluster: &Cluster, level: usize, out: &mut Vec<String>) {
        let indent = "\t".repeat(level);
        out.push(format!("{indent}subgraph {} {{", cluster.id.dot_id()));
        out.push(format!(
            "{indent}\tgraph [{}]",
            attr_list(&style::cluster_attrs(&cluster.label, cluster.depth))
        ));
        for node in cluster.members.iter().filter_map(|id| diagram.node(*id)) {
            out.push(format!("{indent}\t{}", self.node_line(node)));
        }
        for child in diagram.child_clusters(Some(cluster.id)) {
            self.cluster_lines(diagram, child, level + 1, out);
        }
        out.push(format!("{indent}}}"));
    }
}

fn edge_line(edge: &Edge) -> String {
    let mut line = format!("{} -> {}", edge.from.dot_id(), edge.to.dot_id());
    if edge.style.is_plain() {
        return line;
    }

    let mut attrs = StyleAttrs::new();
    if edge.style.arrows != ArrowDirection::Forward {
        attrs.set("dir", edge.style.arrows.as_dot());
    }
    if let Some(label) = &edge.style.label {
        attrs.set("label", label.as_str());
    }
    if let Some(color) = &edge.style.color {
        attrs.set("color", color.as_str());
    }
    if let Some(line_style) = edge.style.line {
        attrs.set("style", line_style.as_dot());
    }
    let _ = write!(line, " [{}]", attr_list(&attrs));
    line
}

/// `key="value", ...` in key order
fn attr_list(attrs: &StyleAttrs) -> String {
    attrs
        .iter()
        .map(|(k, v)| format!("{}={}", attr_key(k), quote(v)))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Attribute names are emitted bare when they are plain identifiers
fn attr_key(key: &str) -> String {
    let plain = !key.is_empty()
        && !key.starts_with(|c: char| c.is_ascii_digit())
        && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    if plain {
        key.to_string()
    } else {
        quote(key)
    }
}

/// Double-quoted DOT string
fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => {}
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Convenience for callers that only need the DOT text of a diagram
///
/// # Errors
/// See [`DotGenerator::generate`].
pub fn to_dot(diagram: &Diagram, icons_dir: Option<&Path>) -> Result<String> {
    icons_dir
        .map_or_else(DotGenerator::new, DotGenerator::with_icons_dir)
        .generate(diagram)
}
