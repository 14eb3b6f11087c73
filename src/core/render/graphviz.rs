//! Graphviz rendering backend
//!
//! Pipes DOT source into a Graphviz layout engine (`dot` by default) and
//! captures the image it writes to stdout. Nothing touches the output path
//! until the engine has succeeded.

use super::{OutputFormat, Renderer};
use crate::core::error::{DiagramError, Result};
use logger::debug;
use std::io::{ErrorKind, Write};
use std::process::{Command, Stdio};

/// Engine used when none is configured
pub const DEFAULT_ENGINE: &str = "dot";

/// Renderer that shells out to a Graphviz engine
#[derive(Debug, Clone)]
pub struct GraphvizRenderer {
    engine: String,
}

impl GraphvizRenderer {
    /// Renderer using the `dot` engine from `PATH`
    #[must_use]
    pub fn new() -> Self {
        Self {
            engine: DEFAULT_ENGINE.to_owned(),
        }
    }

    /// Renderer using a specific engine command or path (e.g. `neato`, `/opt/graphviz/bin/dot`)
    #[must_use]
    pub fn with_engine(engine: &str) -> Self {
        if engine.trim().is_empty() {
            return Self::new();
        }
        Self {
            engine: engine.to_owned(),
        }
    }

    /// Engine command this renderer runs
    #[must_use]
    pub fn engine(&self) -> &str {
        &self.engine
    }

    /// Report the engine version, verifying that it can be started
    ///
    /// # Errors
    /// Returns [`DiagramError::BackendUnavailable`] if the engine cannot be
    /// spawned and [`DiagramError::BackendFailed`] if it exits with an error.
    pub fn detect(&self) -> Result<String> {
        let output = Command::new(&self.engine)
            .arg("-V")
            .stdin(Stdio::null())
            .output()
            .map_err(|source| self.unavailable(source))?;

        // Graphviz prints its version banner on stderr.
        let banner = String::from_utf8_lossy(&output.stderr).trim().to_string();
        if !output.status.success() {
            return Err(DiagramError::BackendFailed {
                engine: self.engine.clone(),
                format: "version check".to_owned(),
                stderr: banner,
            });
        }
        Ok(banner)
    }

    /// Whether the engine can be started
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.detect().is_ok()
    }

    fn unavailable(&self, source: std::io::Error) -> DiagramError {
        DiagramError::BackendUnavailable {
            engine: self.engine.clone(),
            source,
        }
    }
}

impl Default for GraphvizRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for GraphvizRenderer {
    fn name(&self) -> &str {
        &self.engine
    }

    fn render(&self, dot: &str, format: OutputFormat) -> Result<Vec<u8>> {
        if !format.needs_engine() {
            return Ok(dot.as_bytes().to_vec());
        }

        debug!("running {} -T{}", self.engine, format.extension());
        let mut child = Command::new(&self.engine)
            .arg(format!("-T{}", format.extension()))
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| self.unavailable(source))?;

        if let Some(mut stdin) = child.stdin.take() {
            if let Err(e) = stdin.write_all(dot.as_bytes()) {
                // The engine exited early; its stderr explains why.
                if e.kind() != ErrorKind::BrokenPipe {
                    return Err(self.unavailable(e));
                }
            }
        }

        let output = child
            .wait_with_output()
            .map_err(|source| self.unavailable(source))?;

        if !output.status.success() {
            return Err(DiagramError::BackendFailed {
                engine: self.engine.clone(),
                format: format.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(output.stdout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MISSING: &str = "archdiagram-test-no-such-engine";

    #[test]
    fn test_blank_engine_falls_back_to_dot() {
        assert_eq!(GraphvizRenderer::with_engine("  ").engine(), "dot");
        assert_eq!(GraphvizRenderer::with_engine("neato").engine(), "neato");
    }

    #[test]
    fn test_missing_engine_is_unavailable() {
        let renderer = GraphvizRenderer::with_engine(MISSING);
        assert!(!renderer.is_available());
        let err = renderer
            .render("digraph {}", OutputFormat::Png)
            .unwrap_err();
        assert!(matches!(err, DiagramError::BackendUnavailable { ref engine, .. } if engine == MISSING));
    }

    #[test]
    fn test_dot_format_skips_engine() {
        let renderer = GraphvizRenderer::with_engine(MISSING);
        let bytes = renderer.render("digraph {}\n", OutputFormat::Dot).unwrap();
        assert_eq!(bytes, b"digraph {}\n");
    }
}
