//! Opening rendered files in the platform's default viewer

use crate::core::error::{DiagramError, Result};
use std::path::Path;
use std::process::{Command, Stdio};

/// Viewer command for the current platform
fn viewer_command(path: &Path) -> Command {
    #[cfg(target_os = "macos")]
    {
        let mut cmd = Command::new("open");
        cmd.arg(path);
        cmd
    }
    #[cfg(target_os = "windows")]
    {
        let mut cmd = Command::new("cmd");
        cmd.args(["/C", "start", ""]).arg(path);
        cmd
    }
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        let mut cmd = Command::new("xdg-open");
        cmd.arg(path);
        cmd
    }
}

/// Open `path` in the default viewer without waiting for the viewer to exit
///
/// # Errors
/// Returns [`DiagramError::Io`] if the viewer command cannot be started.
pub fn open(path: &Path) -> Result<()> {
    viewer_command(path)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map(|_| ())
        .map_err(|e| DiagramError::io(path, e))
}
