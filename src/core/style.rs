//! Rendering attributes and their defaults
//!
//! Attributes only affect presentation. Defaults follow the look of the
//! Python `diagrams` package so that generated images stay familiar; any
//! user-supplied value replaces the default of the same name.

use super::models::Direction;
use std::collections::BTreeMap;

/// Ordered mapping of Graphviz attribute name to value
///
/// Keys are kept sorted so that serialization is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleAttrs {
    entries: BTreeMap<String, String>,
}

impl StyleAttrs {
    /// Empty attribute set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insertion
    #[must_use]
    pub fn with(mut self, key: &str, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Insert or replace one attribute
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        self.entries.insert(key.to_string(), value.into());
    }

    /// Value of one attribute
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Iterate in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// `self` laid over `defaults`: every key of `self` wins
    #[must_use]
    pub fn merged_over(&self, defaults: &Self) -> Self {
        let mut merged = defaults.clone();
        for (key, value) in &self.entries {
            merged.entries.insert(key.clone(), value.clone());
        }
        merged
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for StyleAttrs {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

const FONT_NAME: &str = "Sans-Serif";
const FONT_COLOR: &str = "#2D3436";

/// Cluster background colors, cycled by nesting depth
pub const CLUSTER_BG_COLORS: [&str; 4] = ["#E5F5FD", "#EBF3E7", "#ECE8F6", "#FDF7E3"];

/// Graph-level defaults for a diagram titled `title`
#[must_use]
pub fn graph_defaults(title: &str, direction: Direction) -> StyleAttrs {
    StyleAttrs::new()
        .with("fontcolor", FONT_COLOR)
        .with("fontname", FONT_NAME)
        .with("fontsize", "15")
        .with("label", title)
        .with("nodesep", "0.60")
        .with("pad", "2.0")
        .with("rankdir", direction.as_dot())
        .with("ranksep", "0.75")
        .with("splines", "ortho")
}

/// Node-level defaults
#[must_use]
pub fn node_defaults() -> StyleAttrs {
    StyleAttrs::new()
        .with("fixedsize", "true")
        .with("fontcolor", FONT_COLOR)
        .with("fontname", FONT_NAME)
        .with("fontsize", "13")
        .with("height", "1.4")
        .with("imagescale", "true")
        .with("labelloc", "b")
        .with("shape", "box")
        .with("style", "rounded")
        .with("width", "1.4")
}

/// Edge-level defaults
#[must_use]
pub fn edge_defaults() -> StyleAttrs {
    StyleAttrs::new().with("color", "#7B8894")
}

/// Attributes of a cluster box at nesting `depth` (1 = top level)
#[must_use]
pub fn cluster_attrs(label: &str, depth: usize) -> StyleAttrs {
    let bg = CLUSTER_BG_COLORS[depth.saturating_sub(1) % CLUSTER_BG_COLORS.len()];
    StyleAttrs::new()
        .with("bgcolor", bg)
        .with("fontname", FONT_NAME)
        .with("fontsize", "12")
        .with("label", label)
        .with("labeljust", "l")
        .with("pencolor", "#AEB6BE")
        .with("shape", "box")
        .with("style", "rounded")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_values_override_defaults() {
        let user = StyleAttrs::new()
            .with("label", "")
            .with("splines", "spline");
        let merged = user.merged_over(&graph_defaults("datalinker architecture", Direction::LeftRight));

        assert_eq!(merged.get("label"), Some(""));
        assert_eq!(merged.get("splines"), Some("spline"));
        assert_eq!(merged.get("rankdir"), Some("LR"));
        assert_eq!(merged.get("pad"), Some("2.0"));
    }

    #[test]
    fn iteration_is_sorted_by_key() {
        let attrs: StyleAttrs = [("ranksep", "0.75"), ("label", ""), ("nodesep", "0.2")]
            .into_iter()
            .collect();
        let keys: Vec<&str> = attrs.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["label", "nodesep", "ranksep"]);
    }

    #[test]
    fn cluster_colors_cycle_with_depth() {
        assert_eq!(cluster_attrs("a", 1).get("bgcolor"), Some("#E5F5FD"));
        assert_eq!(cluster_attrs("b", 2).get("bgcolor"), Some("#EBF3E7"));
        assert_eq!(cluster_attrs("c", 5).get("bgcolor"), Some("#E5F5FD"));
    }
}
