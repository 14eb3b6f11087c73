//! Shared library for `archdiagram`
//! Builds architecture diagrams and renders them through Graphviz

pub mod core;

pub use core::config;
pub use core::error::{DiagramError, Result};
pub use core::get_version;
