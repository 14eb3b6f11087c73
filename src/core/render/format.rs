//! Output formats

use crate::core::error::DiagramError;
use std::fmt;
use std::str::FromStr;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    /// Raster PNG image
    Png,
    /// Raster JPEG image
    Jpg,
    /// Vector SVG image
    Svg,
    /// PDF document
    Pdf,
    /// Graphviz source, written without invoking the engine
    Dot,
}

impl OutputFormat {
    /// File extension for this format
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpg => "jpg",
            Self::Svg => "svg",
            Self::Pdf => "pdf",
            Self::Dot => "dot",
        }
    }

    /// Whether producing this format needs the rendering engine
    #[must_use]
    pub const fn needs_engine(&self) -> bool {
        !matches!(self, Self::Dot)
    }

    /// Parse a list such as `["png", "svg"]`
    ///
    /// # Errors
    /// Returns [`DiagramError::UnknownFormat`] for the first unrecognized entry.
    pub fn parse_list<S: AsRef<str>>(items: &[S]) -> Result<Vec<Self>, DiagramError> {
        let mut formats = Vec::with_capacity(items.len());
        for item in items {
            let format = item.as_ref().parse()?;
            if !formats.contains(&format) {
                formats.push(format);
            }
        }
        Ok(formats)
    }
}

impl FromStr for OutputFormat {
    type Err = DiagramError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().trim_start_matches('.').to_lowercase().as_str() {
            "png" => Ok(Self::Png),
            "jpg" | "jpeg" => Ok(Self::Jpg),
            "svg" => Ok(Self::Svg),
            "pdf" => Ok(Self::Pdf),
            "dot" | "gv" => Ok(Self::Dot),
            _ => Err(DiagramError::UnknownFormat(s.to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}
