//! Configuration module for `archdiagram`

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;

/// Default CLI configuration loaded based on build profile.
/// Uses release defaults in release mode, debug defaults in debug mode.
#[cfg(not(debug_assertions))]
const CONFIG_DEFAULTS: &str = include_str!("../assets/DefaultCLIConfigRelease.toml");

#[cfg(debug_assertions)]
const CONFIG_DEFAULTS: &str = include_str!("../assets/DefaultCLIConfigDebug.toml");

#[cfg(not(debug_assertions))]
const CONFIG_FILE_NAME: &str = "config.toml";

#[cfg(debug_assertions)]
const CONFIG_FILE_NAME: &str = "dconfig.toml";

/// Variable expanded to the config directory inside path values
const DIR_VARIABLE: &str = "$ARCH_DIAGRAM";

/// Logging configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug)
    #[serde(default)]
    pub level: String,
    /// Log file path
    #[serde(default)]
    pub file: String,
    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,
}

/// Rendering configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Graphviz engine command or path
    #[serde(default)]
    pub engine: String,
    /// Output format used when a diagram does not name one
    #[serde(default)]
    pub format: String,
    /// Open rendered files in the system viewer
    #[serde(default)]
    pub show: bool,
}

/// Paths configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory rendered diagrams are written to
    #[serde(default)]
    pub out_dir: String,
    /// Directory holding `<kind>.png` node icons (empty: draw shapes)
    #[serde(default)]
    pub icons_dir: String,
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Logging settings
    pub logging: LoggingConfig,
    /// Render settings
    #[serde(default)]
    pub render: RenderConfig,
    /// Path settings
    #[serde(default)]
    pub paths: PathsConfig,
}

/// Optional CLI overrides for configuration values
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Override logging level
    pub level: Option<String>,
    /// Override log file path
    pub file: Option<String>,
    /// Override verbose flag
    pub verbose: Option<bool>,
    /// Override rendering engine
    pub engine: Option<String>,
    /// Override default output format
    pub format: Option<String>,
    /// Override output directory
    pub out_dir: Option<String>,
    /// Override icon directory
    pub icons_dir: Option<String>,
}

/// Copy `default` into `value` when `value` is empty; reports whether it changed
fn fill_empty(value: &mut String, default: &str) -> bool {
    if value.is_empty() && !default.is_empty() {
        default.clone_into(value);
        true
    } else {
        false
    }
}

impl Config {
    /// Get the `$ARCH_DIAGRAM` directory path
    ///
    /// Returns:
    /// - Linux: `~/.config/archdiagram`
    /// - macOS: `~/Library/Application Support/archdiagram`
    /// - Windows: `%APPDATA%\archdiagram`
    #[must_use]
    pub fn get_archdiagram_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("archdiagram")
    }

    /// Merge missing fields from defaults into this config
    ///
    /// Fields added in a newer release are empty in an older config file;
    /// they pick up the compiled-in default. Fields the user set are kept.
    ///
    /// # Returns
    ///
    /// `true` if any fields were added/changed, `false` otherwise
    pub fn merge_defaults(&mut self, defaults: &Self) -> bool {
        let mut changed = false;
        changed |= fill_empty(&mut self.logging.level, &defaults.logging.level);
        changed |= fill_empty(&mut self.logging.file, &defaults.logging.file);
        changed |= fill_empty(&mut self.render.engine, &defaults.render.engine);
        changed |= fill_empty(&mut self.render.format, &defaults.render.format);
        changed |= fill_empty(&mut self.paths.out_dir, &defaults.paths.out_dir);
        changed |= fill_empty(&mut self.paths.icons_dir, &defaults.paths.icons_dir);
        changed
    }

    /// Apply CLI-provided overrides onto the loaded configuration
    ///
    /// Overrides only affect this run; the config file is not modified.
    /// Only non-`None` values replace config values.
    ///
    /// # Examples
    ///
    /// ```
    /// use arch_diagram::config::{Config, ConfigOverrides};
    ///
    /// let mut config = Config::from_defaults();
    /// config.apply_overrides(&ConfigOverrides {
    ///     engine: Some("neato".to_string()),
    ///     ..Default::default()
    /// });
    /// assert_eq!(config.render.engine, "neato");
    /// ```
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(level) = &overrides.level {
            self.logging.level.clone_from(level);
        }
        if let Some(file) = &overrides.file {
            self.logging.file.clone_from(file);
        }
        if let Some(verbose) = overrides.verbose {
            self.logging.verbose = verbose;
        }

        if let Some(engine) = &overrides.engine {
            self.render.engine.clone_from(engine);
        }
        if let Some(format) = &overrides.format {
            self.render.format.clone_from(format);
        }

        if let Some(out_dir) = &overrides.out_dir {
            self.paths.out_dir = Self::expand_variables(out_dir);
        }
        if let Some(icons_dir) = &overrides.icons_dir {
            self.paths.icons_dir = Self::expand_variables(icons_dir);
        }
    }

    /// Get the user config file path
    ///
    /// `config.toml` for release builds, `dconfig.toml` for debug builds,
    /// inside [`get_archdiagram_dir`](Self::get_archdiagram_dir).
    #[must_use]
    pub fn get_config_file_path() -> PathBuf {
        Self::get_archdiagram_dir().join(CONFIG_FILE_NAME)
    }

    /// Expand `$ARCH_DIAGRAM` to the config directory
    #[must_use]
    fn expand_variables(value: &str) -> String {
        if value.contains(DIR_VARIABLE) {
            let dir = Self::get_archdiagram_dir();
            value.replace(DIR_VARIABLE, dir.to_str().unwrap_or("."))
        } else {
            value.to_string()
        }
    }

    /// Initialize config from a TOML string
    ///
    /// Missing fields use their serde defaults (empty strings or false).
    /// `$ARCH_DIAGRAM` is expanded in path values.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML cannot be parsed or doesn't match the expected schema
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(toml_str)?;

        config.logging.file = Self::expand_variables(&config.logging.file);
        config.render.engine = Self::expand_variables(&config.render.engine);
        config.paths.out_dir = Self::expand_variables(&config.paths.out_dir);
        config.paths.icons_dir = Self::expand_variables(&config.paths.icons_dir);

        Ok(config)
    }

    /// Load configuration from embedded defaults
    ///
    /// The defaults differ between debug and release builds:
    /// - Debug: `DefaultCLIConfigDebug.toml`
    /// - Release: `DefaultCLIConfigRelease.toml`
    ///
    /// # Panics
    /// Panics if the embedded default configuration is invalid TOML. The
    /// defaults are compiled in and covered by tests.
    #[must_use]
    pub fn from_defaults() -> Self {
        Self::from_toml(CONFIG_DEFAULTS).expect("Failed to parse compiled-in default configuration")
    }

    /// Load configuration from file, or create from defaults if not found
    ///
    /// - If the config file exists: load it, merge missing fields from
    ///   defaults and save it back when something was added.
    /// - On first run: create the config directory and write the defaults.
    ///
    /// Falls back to defaults if the file cannot be read or parsed.
    #[must_use]
    pub fn load() -> Self {
        let config_file = Self::get_config_file_path();
        let defaults = Self::from_defaults();

        if config_file.exists() {
            if let Ok(content) = fs::read_to_string(&config_file) {
                if let Ok(mut config) = Self::from_toml(&content) {
                    if config.merge_defaults(&defaults) {
                        let _ = config.save();
                    }
                    return config;
                }
            }
        } else {
            if let Some(parent) = config_file.parent() {
                let _ = fs::create_dir_all(parent);
            }
            let _ = defaults.save();
            return defaults;
        }

        defaults
    }

    /// Save configuration to file
    ///
    /// Serializes the configuration to TOML and writes it to the
    /// platform-specific config file, creating the directory if needed:
    /// ```toml
    /// [logging]
    /// level = "warn"
    /// file = ""
    /// verbose = false
    ///
    /// [render]
    /// engine = "dot"
    /// format = "png"
    /// show = false
    ///
    /// [paths]
    /// out_dir = "."
    /// icons_dir = ""
    /// ```
    ///
    /// # Errors
    /// Returns an error if the directory cannot be created or the file
    /// cannot be written.
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let config_file = Self::get_config_file_path();
        if let Some(parent) = config_file.parent() {
            fs::create_dir_all(parent)?;
        }
        let toml_str = toml::to_string_pretty(self)?;
        fs::write(&config_file, toml_str)?;
        Ok(())
    }

    /// Get a configuration value by key
    ///
    /// Supported keys: `level`, `file`, `verbose`, `engine`, `format`,
    /// `show`, `out_dir` (`out-dir`), `icons_dir` (`icons-dir`).
    ///
    /// # Returns
    /// `None` if the key is not recognized.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "level" => Some(self.logging.level.clone()),
            "file" => Some(self.logging.file.clone()),
            "verbose" => Some(self.logging.verbose.to_string()),
            "engine" => Some(self.render.engine.clone()),
            "format" => Some(self.render.format.clone()),
            "show" => Some(self.render.show.to_string()),
            "out_dir" | "out-dir" => Some(self.paths.out_dir.clone()),
            "icons_dir" | "icons-dir" => Some(self.paths.icons_dir.clone()),
            _ => None,
        }
    }

    /// Set a configuration value by key
    ///
    /// Boolean keys (`verbose`, `show`) accept `true`/`false`; `format` must
    /// name a supported output format. Call [`save()`](Config::save) to
    /// persist the change.
    ///
    /// # Errors
    /// Returns an error if the key is unknown or the value cannot be parsed.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        match key {
            "level" => self.logging.level = value.to_string(),
            "file" => self.logging.file = value.to_string(),
            "verbose" => self.logging.verbose = parse_bool(key, value)?,
            "engine" => self.render.engine = value.to_string(),
            "format" => {
                value
                    .parse::<crate::core::render::OutputFormat>()
                    .map_err(|e| e.to_string())?;
                self.render.format = value.to_string();
            }
            "show" => self.render.show = parse_bool(key, value)?,
            "out_dir" | "out-dir" => self.paths.out_dir = value.to_string(),
            "icons_dir" | "icons-dir" => self.paths.icons_dir = value.to_string(),
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Unset a configuration value by key (reset to default)
    ///
    /// Call [`save()`](Config::save) to persist the change.
    ///
    /// # Errors
    /// Returns an error if the key is not recognized.
    pub fn unset(&mut self, key: &str, defaults: &Self) -> Result<(), String> {
        match key {
            "level" => self.logging.level.clone_from(&defaults.logging.level),
            "file" => self.logging.file.clone_from(&defaults.logging.file),
            "verbose" => self.logging.verbose = defaults.logging.verbose,
            "engine" => self.render.engine.clone_from(&defaults.render.engine),
            "format" => self.render.format.clone_from(&defaults.render.format),
            "show" => self.render.show = defaults.render.show,
            "out_dir" | "out-dir" => self.paths.out_dir.clone_from(&defaults.paths.out_dir),
            "icons_dir" | "icons-dir" => {
                self.paths.icons_dir.clone_from(&defaults.paths.icons_dir);
            }
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Reset all configuration to defaults
    ///
    /// Deletes the configuration file so the next [`load()`](Config::load)
    /// recreates it. Succeeds without doing anything if there is no file.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be deleted.
    pub fn reset() -> Result<(), std::io::Error> {
        let config_file = Self::get_config_file_path();
        if config_file.exists() {
            fs::remove_file(config_file)?;
        }
        Ok(())
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, String> {
    value
        .parse::<bool>()
        .map_err(|_| format!("Invalid boolean value for '{key}': '{value}'"))
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[logging]")?;
        writeln!(f, "  level = \"{}\"", self.logging.level)?;
        writeln!(f, "  file = \"{}\"", self.logging.file)?;
        writeln!(f, "  verbose = {}", self.logging.verbose)?;

        writeln!(f, "\n[render]")?;
        writeln!(f, "  engine = \"{}\"", self.render.engine)?;
        writeln!(f, "  format = \"{}\"", self.render.format)?;
        writeln!(f, "  show = {}", self.render.show)?;

        writeln!(f, "\n[paths]")?;
        writeln!(f, "  out_dir = \"{}\"", self.paths.out_dir)?;
        writeln!(f, "  icons_dir = \"{}\"", self.paths.icons_dir)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_parse() {
        let config = Config::from_defaults();
        assert_eq!(config.render.engine, "dot");
        assert_eq!(config.render.format, "png");
        assert_eq!(config.paths.out_dir, ".");
        assert!(!config.render.show);
    }

    #[test]
    fn test_fill_empty() {
        let mut value = String::new();
        assert!(fill_empty(&mut value, "dot"));
        assert_eq!(value, "dot");
        assert!(!fill_empty(&mut value, "neato"));
        assert_eq!(value, "dot");
    }

    #[test]
    fn test_set_rejects_unknown_format() {
        let mut config = Config::from_defaults();
        assert!(config.set("format", "gif").is_err());
        assert_eq!(config.render.format, "png");
        config.set("format", "svg").unwrap();
        assert_eq!(config.render.format, "svg");
    }
}
