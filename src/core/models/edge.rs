//! Directed connections between nodes

use super::NodeId;
use crate::core::error::DiagramError;
use std::str::FromStr;

/// Line style of an edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    /// Plain line
    Solid,
    /// Dashed line
    Dashed,
    /// Dotted line
    Dotted,
    /// Thick line
    Bold,
}

impl LineStyle {
    /// Graphviz `style` value
    #[must_use]
    pub const fn as_dot(self) -> &'static str {
        match self {
            Self::Solid => "solid",
            Self::Dashed => "dashed",
            Self::Dotted => "dotted",
            Self::Bold => "bold",
        }
    }
}

impl FromStr for LineStyle {
    type Err = DiagramError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "solid" => Ok(Self::Solid),
            "dashed" => Ok(Self::Dashed),
            "dotted" => Ok(Self::Dotted),
            "bold" => Ok(Self::Bold),
            _ => Err(DiagramError::UnknownEdgeAttr(s.to_string())),
        }
    }
}

/// Where arrowheads are drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArrowDirection {
    /// Arrow at the target (`a >> b`)
    #[default]
    Forward,
    /// Arrow at the source (`a << b`)
    Back,
    /// Arrows at both ends
    Both,
    /// No arrows (`a - b`)
    None,
}

impl ArrowDirection {
    /// Graphviz `dir` value
    #[must_use]
    pub const fn as_dot(self) -> &'static str {
        match self {
            Self::Forward => "forward",
            Self::Back => "back",
            Self::Both => "both",
            Self::None => "none",
        }
    }
}

impl FromStr for ArrowDirection {
    type Err = DiagramError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "forward" | ">>" => Ok(Self::Forward),
            "back" | "<<" => Ok(Self::Back),
            "both" => Ok(Self::Both),
            "none" | "-" => Ok(Self::None),
            _ => Err(DiagramError::UnknownEdgeAttr(s.to_string())),
        }
    }
}

/// Optional presentation of a single edge
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EdgeStyle {
    /// Text drawn along the edge
    pub label: Option<String>,
    /// Line color
    pub color: Option<String>,
    /// Line style
    pub line: Option<LineStyle>,
    /// Arrowheads
    pub arrows: ArrowDirection,
}

impl EdgeStyle {
    /// Style with just a label
    #[must_use]
    pub fn labeled(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            ..Self::default()
        }
    }

    /// True when nothing deviates from the diagram-wide edge defaults
    #[must_use]
    pub fn is_plain(&self) -> bool {
        self == &Self::default()
    }
}

/// A directed connection `from -> to`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    /// Source node
    pub from: NodeId,
    /// Target node
    pub to: NodeId,
    /// Presentation overrides
    pub style: EdgeStyle,
}
