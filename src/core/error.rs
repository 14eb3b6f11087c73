//! Error taxonomy for diagram construction and rendering

use std::path::PathBuf;

/// Result alias used throughout the library
pub type Result<T> = std::result::Result<T, DiagramError>;

/// Everything that can go wrong while building or rendering a diagram.
///
/// None of these are retried: the tool is a one-shot generator and every
/// variant is fatal for the current invocation.
#[derive(Debug, thiserror::Error)]
pub enum DiagramError {
    /// The rendering engine could not be started
    #[error("Rendering engine '{engine}' is not available: {source}")]
    BackendUnavailable {
        /// Engine command that was tried
        engine: String,
        /// Underlying spawn error
        #[source]
        source: std::io::Error,
    },

    /// The rendering engine ran but reported a failure
    #[error("Rendering engine '{engine}' failed to produce {format}: {stderr}")]
    BackendFailed {
        /// Engine command that was run
        engine: String,
        /// Requested output format
        format: String,
        /// Captured stderr of the engine
        stderr: String,
    },

    /// Reading or writing a file failed
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        /// File involved in the failed operation
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The output directory does not exist
    #[error("Output directory does not exist: {}", .0.display())]
    OutputDirMissing(PathBuf),

    /// An edge or cluster member refers to a node name that was never declared
    #[error("Unknown node: '{0}'")]
    UnknownNode(String),

    /// A node handle does not belong to the diagram being built
    #[error("Node handle #{0} does not refer to a declared node")]
    InvalidNodeId(usize),

    /// A node or cluster refers to a cluster that was never declared
    #[error("Unknown cluster: '{0}'")]
    UnknownCluster(String),

    /// A cluster's parent chain loops back on itself
    #[error("Cluster '{0}' is its own ancestor")]
    ClusterCycle(String),

    /// `build` was called while a cluster scope was still open
    #[error("Cluster '{0}' was opened but never closed")]
    UnclosedCluster(String),

    /// `end_cluster` was called with no cluster open
    #[error("No cluster is open")]
    NoOpenCluster,

    /// An `[[edges]]` entry has neither `from`/`to` nor a `path` of two or more nodes, or has both
    #[error("Edge entry #{0} needs either `from` and `to`, or a `path` of at least two nodes")]
    InvalidEdge(usize),

    /// Two nodes or clusters in a description share an id
    #[error("Duplicate id: '{0}'")]
    DuplicateId(String),

    /// Unrecognized node category
    #[error("Unknown node kind: '{0}'")]
    UnknownKind(String),

    /// Unrecognized output format
    #[error("Unknown output format: '{0}'")]
    UnknownFormat(String),

    /// Unrecognized layout direction
    #[error("Unknown direction: '{0}'")]
    UnknownDirection(String),

    /// Unrecognized edge line style or arrow direction
    #[error("Unknown edge attribute value: '{0}'")]
    UnknownEdgeAttr(String),

    /// A diagram description file is not valid TOML or does not match the schema
    #[error("Invalid diagram description: {0}")]
    Description(#[from] toml::de::Error),

    /// The DOT template failed to render
    #[error("Failed to render DOT source: {0}")]
    Template(#[from] askama::Error),
}

impl DiagramError {
    /// Wrap an I/O error together with the path it happened on
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
