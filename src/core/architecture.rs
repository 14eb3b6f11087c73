//! Built-in datalinker architecture diagram
//!
//! Users reach datalinker through the Science Platform ingress and
//! authentication layer. TAP queries go to qserv and its database, while
//! datalinker points users at the object store, which they then read
//! directly.

use super::builder::DiagramBuilder;
use super::error::Result;
use super::models::{Diagram, NodeKind};
use super::render::OutputFormat;
use super::style::StyleAttrs;

/// Title of the built-in diagram
pub const TITLE: &str = "datalinker architecture";

/// Output file stem of the built-in diagram
pub const FILENAME: &str = "architecture";

fn graph_attr() -> StyleAttrs {
    StyleAttrs::new()
        .with("label", "")
        .with("labelloc", "bbc")
        .with("nodesep", "0.2")
        .with("pad", "0.2")
        .with("ranksep", "0.75")
        .with("splines", "spline")
}

fn node_attr() -> StyleAttrs {
    StyleAttrs::new().with("fontsize", "12.0")
}

/// Build the datalinker architecture diagram
///
/// Eight nodes, two clusters and eight edges; rendered to
/// `architecture.png` without opening a viewer.
///
/// # Errors
/// Only fails if the builder rejects a declaration, which the fixed content
/// never triggers.
pub fn datalinker() -> Result<Diagram> {
    let mut b = DiagramBuilder::new(TITLE)
        .filename(FILENAME)
        .format(OutputFormat::Png)
        .show(false)
        .graph_attr(graph_attr())
        .node_attr(node_attr());

    let user = b.add_node("End user", NodeKind::User);

    let (ingress, auth, tap, datalinker) = b.with_cluster("Science Platform", |b| {
        Ok((
            b.add_node("Ingress", NodeKind::LoadBalancer),
            b.add_node("Authentication", NodeKind::Kubernetes),
            b.add_node("TAP", NodeKind::Kubernetes),
            b.add_node("datalinker", NodeKind::Kubernetes),
        ))
    })?;

    let (qserv, database, storage) = b.with_cluster("Data Storage", |b| {
        Ok((
            b.add_node("qserv", NodeKind::Server),
            b.add_node("Database", NodeKind::Server),
            b.add_node("Object store", NodeKind::Server),
        ))
    })?;

    b.chain(&[user, ingress, auth])?;
    b.add_edges(auth, &[tap, datalinker])?;
    b.chain(&[tap, qserv, database])?;
    b.add_edge(datalinker, storage)?;
    b.add_edge(user, storage)?;

    b.build()
}
