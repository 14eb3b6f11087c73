//! CLI argument definitions for `archdiagram`

use clap::{builder::BoolishValueParser, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use arch_diagram::config::ConfigOverrides;
use logger::Level;

/// CLI log level argument
///
/// Represents log levels that can be passed via CLI arguments. Converts to lowercase
/// strings for config storage and to `logger::Level` for runtime use.
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevelArg {
    /// Error-level logging
    Error,
    /// Warning-level logging
    Warn,
    /// Info-level logging
    Info,
    /// Debug-level logging
    Debug,
}

impl From<LogLevelArg> for Level {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Error => Self::Error,
            LogLevelArg::Warn => Self::Warn,
            LogLevelArg::Info => Self::Info,
            LogLevelArg::Debug => Self::Debug,
        }
    }
}

impl std::fmt::Display for LogLevelArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let as_str = match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
        };
        write!(f, "{as_str}")
    }
}

#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Display configuration values.
    ///
    /// If a KEY is provided, displays only that configuration value.
    /// If no KEY is provided, displays all configuration values.
    Get {
        /// Optional configuration key to display (e.g., `engine`, `format`, `out_dir`)
        #[arg(value_name = "KEY")]
        key: Option<String>,
    },
    /// Set a configuration value.
    Set {
        /// Configuration key to set
        #[arg(value_name = "KEY")]
        key: String,
        /// Value to set
        #[arg(value_name = "VALUE")]
        value: String,
    },
    /// Unset a configuration value.
    Unset {
        /// Configuration key to unset
        #[arg(value_name = "KEY")]
        key: String,
    },
    /// Reset configuration to defaults (requires confirmation).
    Reset,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    ///
    /// If no subcommand is provided, displays all configuration values.
    Config {
        #[command(subcommand)]
        subcommand: Option<ConfigSubcommand>,
    },
    /// Render a diagram to image files.
    ///
    /// Renders the diagram described by FILE, or the built-in datalinker
    /// architecture when FILE is omitted.
    Render {
        /// Diagram description (TOML)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,

        /// Output directory (optional; defaults to config `out_dir`)
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// Output formats: png, jpg, svg, pdf, dot (replaces the diagram's own list)
        #[arg(short, long, value_name = "FORMAT", num_args = 1..)]
        format: Vec<String>,

        /// Open the rendered files in the system viewer
        #[arg(long)]
        show: bool,
    },
    /// Print the DOT source of a diagram.
    Dot {
        /// Diagram description (TOML); built-in architecture when omitted
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,

        /// Write to this file instead of stdout
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
    /// Validate a diagram and report what would be rendered.
    Check {
        /// Diagram description (TOML); built-in architecture when omitted
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,
    },
}

#[derive(Parser, Debug)]
#[command(
    name = "archdiagram",
    about = "Architecture diagram generator",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    /// Set the runtime log level (error|warn|info|debug). Falls back to config if omitted.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Enable verbose output (runtime only)
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Enable debug-level logging and runtime debug flag (shorthand)
    #[arg(long = "debug")]
    pub debug_flag: bool,

    /// Write runtime logs to a file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    // --- Config overrides ---
    /// Override config logging level
    #[arg(long = "config-level", value_enum)]
    pub config_level: Option<LogLevelArg>,

    /// Override config log file path
    #[arg(long = "config-log-file", value_name = "PATH")]
    pub config_log_file: Option<PathBuf>,

    /// Override config verbose flag (true/false)
    #[arg(long = "config-verbose", value_parser = BoolishValueParser::new())]
    pub config_verbose: Option<bool>,

    /// Graphviz engine command or path (e.g. `dot`, `neato`)
    #[arg(long, value_name = "CMD")]
    pub engine: Option<String>,

    /// Override config default output format
    #[arg(long = "config-format", value_name = "FORMAT")]
    pub config_format: Option<String>,

    /// Override config output directory
    #[arg(long = "config-out-dir", value_name = "DIR")]
    pub config_out_dir: Option<PathBuf>,

    /// Override config output directory (short form)
    #[arg(long = "out-dir", value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Directory holding `<kind>.png` node icons
    #[arg(long = "icons-dir", value_name = "DIR")]
    pub icons_dir: Option<PathBuf>,

    /// Subcommand to execute.
    /// A subcommand is required to run the CLI.
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Convert CLI flags into config overrides
    ///
    /// Short-form flags (e.g., `--out-dir`) take precedence over long-form
    /// flags (e.g., `--config-out-dir`) when both are provided.
    pub fn to_config_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            level: self.config_level.map(|lvl| lvl.to_string().to_lowercase()),
            file: self
                .config_log_file
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
            verbose: self.config_verbose,
            engine: self.engine.clone(),
            format: self.config_format.clone(),
            out_dir: self
                .out_dir
                .as_ref()
                .or(self.config_out_dir.as_ref())
                .map(|p| p.to_string_lossy().to_string()),
            icons_dir: self
                .icons_dir
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bare(command: Command) -> Cli {
        Cli {
            log_level: None,
            verbose: false,
            debug_flag: false,
            log_file: None,
            config_level: None,
            config_log_file: None,
            config_verbose: None,
            engine: None,
            config_format: None,
            config_out_dir: None,
            out_dir: None,
            icons_dir: None,
            command,
        }
    }

    #[test]
    fn test_log_level_display() {
        assert_eq!(LogLevelArg::Error.to_string(), "error");
        assert_eq!(LogLevelArg::Warn.to_string(), "warn");
        assert_eq!(LogLevelArg::Info.to_string(), "info");
        assert_eq!(LogLevelArg::Debug.to_string(), "debug");
    }

    #[test]
    fn test_log_level_to_logger_level() {
        assert_eq!(Level::from(LogLevelArg::Error), Level::Error);
        assert_eq!(Level::from(LogLevelArg::Warn), Level::Warn);
        assert_eq!(Level::from(LogLevelArg::Info), Level::Info);
        assert_eq!(Level::from(LogLevelArg::Debug), Level::Debug);
    }

    #[test]
    fn test_to_config_overrides_empty() {
        let overrides = bare(Command::Config { subcommand: None }).to_config_overrides();
        assert!(overrides.level.is_none());
        assert!(overrides.file.is_none());
        assert!(overrides.verbose.is_none());
        assert!(overrides.engine.is_none());
        assert!(overrides.format.is_none());
        assert!(overrides.out_dir.is_none());
        assert!(overrides.icons_dir.is_none());
    }

    #[test]
    fn test_to_config_overrides_with_values() {
        let mut cli = bare(Command::Check { file: None });
        cli.config_level = Some(LogLevelArg::Debug);
        cli.config_log_file = Some(PathBuf::from("/tmp/test.log"));
        cli.config_verbose = Some(true);
        cli.engine = Some("neato".to_string());
        cli.config_format = Some("svg".to_string());
        cli.out_dir = Some(PathBuf::from("/output"));
        cli.icons_dir = Some(PathBuf::from("/icons"));

        let overrides = cli.to_config_overrides();
        assert_eq!(overrides.level, Some("debug".to_string()));
        assert_eq!(overrides.file, Some("/tmp/test.log".to_string()));
        assert_eq!(overrides.verbose, Some(true));
        assert_eq!(overrides.engine, Some("neato".to_string()));
        assert_eq!(overrides.format, Some("svg".to_string()));
        assert_eq!(overrides.out_dir, Some("/output".to_string()));
        assert_eq!(overrides.icons_dir, Some("/icons".to_string()));
    }

    #[test]
    fn test_short_form_precedence_over_long_form() {
        let mut cli = bare(Command::Config { subcommand: None });
        cli.config_out_dir = Some(PathBuf::from("/long/out"));
        cli.out_dir = Some(PathBuf::from("/short/out"));
        assert_eq!(
            cli.to_config_overrides().out_dir,
            Some("/short/out".to_string())
        );
    }

    #[test]
    fn test_long_form_when_short_form_absent() {
        let mut cli = bare(Command::Config { subcommand: None });
        cli.config_out_dir = Some(PathBuf::from("/long/out"));
        assert_eq!(
            cli.to_config_overrides().out_dir,
            Some("/long/out".to_string())
        );
    }

    #[test]
    fn test_parse_render_command() {
        let cli = Cli::try_parse_from([
            "archdiagram",
            "--engine",
            "neato",
            "render",
            "diagrams/datalinker.toml",
            "-o",
            "out",
            "-f",
            "svg",
            "dot",
            "--show",
        ])
        .unwrap();

        assert_eq!(cli.engine.as_deref(), Some("neato"));
        match cli.command {
            Command::Render {
                file,
                output,
                format,
                show,
            } => {
                assert_eq!(file, Some(PathBuf::from("diagrams/datalinker.toml")));
                assert_eq!(output, Some(PathBuf::from("out")));
                assert_eq!(format, vec!["svg".to_string(), "dot".to_string()]);
                assert!(show);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_render_without_file() {
        let cli = Cli::try_parse_from(["archdiagram", "render"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Render { file: None, output: None, ref format, show: false } if format.is_empty()
        ));
    }
}
