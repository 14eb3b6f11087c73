//! Rendering diagrams to files
//!
//! A [`DiagramWriter`] turns a [`Diagram`] into DOT with a [`DotGenerator`],
//! hands the DOT to a [`Renderer`] once per requested format and writes
//! `<out_dir>/<filename>.<ext>` for each. The output directory is always an
//! explicit argument; the process working directory is never changed.

pub mod dot;
pub mod format;
pub mod graphviz;

pub use dot::DotGenerator;
pub use format::OutputFormat;
pub use graphviz::GraphvizRenderer;

use crate::core::error::{DiagramError, Result};
use crate::core::models::Diagram;
use crate::core::preview;
use logger::{info, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// Trait for rendering backends
pub trait Renderer {
    /// Human-readable backend name for messages
    fn name(&self) -> &str;

    /// Convert DOT source into the bytes of a file in `format`
    ///
    /// # Errors
    /// Returns an error if the backend is unavailable or fails.
    fn render(&self, dot: &str, format: OutputFormat) -> Result<Vec<u8>>;
}

/// Writes the files of a diagram using a DOT generator and a renderer
pub struct DiagramWriter<'r> {
    generator: DotGenerator,
    renderer: &'r dyn Renderer,
}

impl<'r> DiagramWriter<'r> {
    /// Writer using `renderer` and shape-only nodes
    #[must_use]
    pub fn new(renderer: &'r dyn Renderer) -> Self {
        Self {
            generator: DotGenerator::new(),
            renderer,
        }
    }

    /// Replace the DOT generator (e.g. one with an icon directory)
    #[must_use]
    pub fn with_generator(mut self, generator: DotGenerator) -> Self {
        self.generator = generator;
        self
    }

    /// Path of the file for `format` inside `out_dir`
    #[must_use]
    pub fn output_path(diagram: &Diagram, out_dir: &Path, format: OutputFormat) -> PathBuf {
        out_dir.join(format!("{}.{}", diagram.filename, format.extension()))
    }

    /// Render every requested format of `diagram` into `out_dir`
    ///
    /// Each file is written only after its bytes were produced, so a backend
    /// failure never leaves a partial file behind. When the diagram asks for
    /// a preview, the written files are opened; a viewer that fails to start
    /// is reported but not fatal.
    ///
    /// # Errors
    /// Returns [`DiagramError::OutputDirMissing`] if `out_dir` is not an
    /// existing directory, any backend error, or [`DiagramError::Io`] if a
    /// file cannot be written.
    pub fn write(&self, diagram: &Diagram, out_dir: &Path) -> Result<Vec<PathBuf>> {
        if !out_dir.is_dir() {
            return Err(DiagramError::OutputDirMissing(out_dir.to_path_buf()));
        }

        let dot = self.generator.generate(diagram)?;
        let mut written = Vec::with_capacity(diagram.formats.len());

        for &format in &diagram.formats {
            let bytes = self.renderer.render(&dot, format)?;
            let path = Self::output_path(diagram, out_dir, format);
            fs::write(&path, &bytes).map_err(|e| DiagramError::io(&path, e))?;
            info!(
                "wrote {} ({} bytes, via {})",
                path.display(),
                bytes.len(),
                self.renderer.name()
            );
            written.push(path);
        }

        if diagram.show {
            for path in &written {
                if let Err(e) = preview::open(path) {
                    warn!("could not open preview: {e}");
                }
            }
        }

        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::builder::DiagramBuilder;
    use crate::core::models::NodeKind;
    use std::cell::RefCell;

    /// Records every call and returns fake image bytes
    struct FakeRenderer {
        calls: RefCell<Vec<OutputFormat>>,
        fail: bool,
    }

    impl FakeRenderer {
        fn new(fail: bool) -> Self {
            Self {
                calls: RefCell::new(Vec::new()),
                fail,
            }
        }
    }

    impl Renderer for FakeRenderer {
        fn name(&self) -> &str {
            "fake"
        }

        fn render(&self, dot: &str, format: OutputFormat) -> Result<Vec<u8>> {
            self.calls.borrow_mut().push(format);
            if self.fail {
                return Err(DiagramError::BackendFailed {
                    engine: "fake".to_string(),
                    format: format.to_string(),
                    stderr: "syntax error".to_string(),
                });
            }
            Ok(format!("{format}:{}", dot.len()).into_bytes())
        }
    }

    fn diagram() -> Diagram {
        let mut b = DiagramBuilder::new("t")
            .filename("architecture")
            .format(OutputFormat::Png)
            .format(OutputFormat::Svg);
        let a = b.add_node("a", NodeKind::Server);
        let c = b.add_node("c", NodeKind::Server);
        b.add_edge(a, c).unwrap();
        b.build().unwrap()
    }

    #[test]
    fn test_one_file_per_format() {
        let dir = tempfile::TempDir::new().unwrap();
        let renderer = FakeRenderer::new(false);
        let written = DiagramWriter::new(&renderer)
            .write(&diagram(), dir.path())
            .unwrap();

        assert_eq!(
            written,
            vec![
                dir.path().join("architecture.png"),
                dir.path().join("architecture.svg")
            ]
        );
        assert_eq!(
            *renderer.calls.borrow(),
            vec![OutputFormat::Png, OutputFormat::Svg]
        );
        let png = fs::read_to_string(dir.path().join("architecture.png")).unwrap();
        assert!(png.starts_with("png:"));
    }

    #[test]
    fn test_backend_failure_leaves_no_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let renderer = FakeRenderer::new(true);
        let err = DiagramWriter::new(&renderer)
            .write(&diagram(), dir.path())
            .unwrap_err();

        assert!(matches!(err, DiagramError::BackendFailed { .. }));
        assert!(!dir.path().join("architecture.png").exists());
    }

    #[test]
    fn test_missing_output_dir_is_fatal() {
        let dir = tempfile::TempDir::new().unwrap();
        let missing = dir.path().join("nope");
        let renderer = FakeRenderer::new(false);
        let err = DiagramWriter::new(&renderer)
            .write(&diagram(), &missing)
            .unwrap_err();

        assert!(matches!(err, DiagramError::OutputDirMissing(p) if p == missing));
        assert!(renderer.calls.borrow().is_empty());
    }
}
