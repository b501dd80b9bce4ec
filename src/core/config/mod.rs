//! core::config
//!
//! Configuration schema and loading.
//!
//! # Precedence
//!
//! Values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. The first config file found (see below)
//! 3. CLI flags (not handled here)
//!
//! # Config Locations
//!
//! Searched in order:
//! 1. An explicit path (the `--config` flag); it must exist
//! 2. `$STITCHWORK_CONFIG` if set
//! 3. `$XDG_CONFIG_HOME/stitchwork/config.toml`
//! 4. `~/.stitchwork/config.toml` (canonical location)
//!
//! # Example
//!
//! ```no_run
//! use stitchwork::core::config::Config;
//!
//! let result = Config::load(None).unwrap();
//! let config = result.config;
//!
//! println!("Canvas: {}x{}", config.canvas_width(), config.canvas_height());
//! println!("Hover radius: {}", config.hover_radius());
//! ```

pub mod schema;

pub use schema::{CanvasConfig, ConfigFile, EditorConfig, ExportConfig};

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::types::Point;

/// Environment variable naming a config file.
pub const CONFIG_ENV: &str = "STITCHWORK_CONFIG";

const DEFAULT_CANVAS_WIDTH: f64 = 800.0;
const DEFAULT_CANVAS_HEIGHT: f64 = 600.0;
const DEFAULT_HOVER_RADIUS: f64 = 20.0;
const DEFAULT_NUDGE_STEP: f64 = 1.0;
const DEFAULT_NUDGE_STEP_LARGE: f64 = 10.0;
const DEFAULT_EXPORT_PREFIX: &str = "exported pattern";

/// Every key understood by [`Config::get`], in listing order.
pub const KEYS: &[&str] = &[
    "canvas.width",
    "canvas.height",
    "editor.hover_radius",
    "editor.nudge_step",
    "editor.nudge_step_large",
    "export.prefix",
];

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),

    #[error("unknown config key '{0}'")]
    UnknownKey(String),

    #[error("home directory not found")]
    NoHomeDir,
}

/// Warnings generated during config loading.
#[derive(Debug, Clone)]
pub struct ConfigWarning {
    pub message: String,
    pub path: PathBuf,
}

/// Result of loading configuration.
#[derive(Debug)]
pub struct ConfigLoadResult {
    pub config: Config,
    pub warnings: Vec<ConfigWarning>,
}

/// Loaded configuration with defaults applied by the accessors.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub file: ConfigFile,
    /// Path the file was loaded from, if any
    path: Option<PathBuf>,
}

impl Config {
    /// Load configuration.
    ///
    /// `explicit` is a path given on the command line; when set, no other
    /// location is searched and the file must exist.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be read, parsed,
    /// or validated. Missing config files are not an error (defaults are
    /// used), except for an explicit path.
    pub fn load(explicit: Option<&Path>) -> Result<ConfigLoadResult, ConfigError> {
        if let Some(path) = explicit {
            let file = Self::read_config(path)?;
            return Ok(ConfigLoadResult {
                config: Config {
                    file,
                    path: Some(path.to_path_buf()),
                },
                warnings: Vec::new(),
            });
        }

        let mut warnings = Vec::new();
        let env_path = std::env::var(CONFIG_ENV).ok();
        if let Some(path) = &env_path {
            let path = PathBuf::from(path);
            if !path.exists() {
                warnings.push(ConfigWarning {
                    message: format!("{CONFIG_ENV} points to a missing file, ignoring it"),
                    path,
                });
            }
        }

        let candidates = search_paths(
            env_path,
            std::env::var("XDG_CONFIG_HOME").ok(),
            dirs::home_dir(),
        );
        for path in candidates {
            if path.exists() {
                let file = Self::read_config(&path)?;
                return Ok(ConfigLoadResult {
                    config: Config {
                        file,
                        path: Some(path),
                    },
                    warnings,
                });
            }
        }

        Ok(ConfigLoadResult {
            config: Config::default(),
            warnings,
        })
    }

    /// Read, parse and validate one config file.
    fn read_config(path: &Path) -> Result<ConfigFile, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let file: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        file.validate()?;
        Ok(file)
    }

    /// Get the canonical config path, `~/.stitchwork/config.toml`.
    pub fn canonical_path() -> Result<PathBuf, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
        Ok(home.join(".stitchwork/config.toml"))
    }

    /// Get the path to the loaded config file.
    pub fn loaded_from(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    // =========================================================================
    // Accessor methods with defaults
    // =========================================================================

    pub fn canvas_width(&self) -> f64 {
        self.file
            .canvas
            .as_ref()
            .and_then(|c| c.width)
            .unwrap_or(DEFAULT_CANVAS_WIDTH)
    }

    pub fn canvas_height(&self) -> f64 {
        self.file
            .canvas
            .as_ref()
            .and_then(|c| c.height)
            .unwrap_or(DEFAULT_CANVAS_HEIGHT)
    }

    /// Where a new pattern's sentinel goes by default.
    pub fn canvas_center(&self) -> Point {
        Point::new(self.canvas_width() / 2.0, self.canvas_height() / 2.0)
    }

    /// Defaults to 20 pixels.
    pub fn hover_radius(&self) -> f64 {
        self.file
            .editor
            .as_ref()
            .and_then(|e| e.hover_radius)
            .unwrap_or(DEFAULT_HOVER_RADIUS)
    }

    pub fn nudge_step(&self) -> f64 {
        self.file
            .editor
            .as_ref()
            .and_then(|e| e.nudge_step)
            .unwrap_or(DEFAULT_NUDGE_STEP)
    }

    pub fn nudge_step_large(&self) -> f64 {
        self.file
            .editor
            .as_ref()
            .and_then(|e| e.nudge_step_large)
            .unwrap_or(DEFAULT_NUDGE_STEP_LARGE)
    }

    /// Defaults to "exported pattern".
    pub fn export_prefix(&self) -> &str {
        self.file
            .export
            .as_ref()
            .and_then(|e| e.prefix.as_deref())
            .unwrap_or(DEFAULT_EXPORT_PREFIX)
    }

    /// Effective value of a dotted key.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnknownKey` for anything not in [`KEYS`].
    pub fn get(&self, key: &str) -> Result<String, ConfigError> {
        let value = match key {
            "canvas.width" => self.canvas_width().to_string(),
            "canvas.height" => self.canvas_height().to_string(),
            "editor.hover_radius" => self.hover_radius().to_string(),
            "editor.nudge_step" => self.nudge_step().to_string(),
            "editor.nudge_step_large" => self.nudge_step_large().to_string(),
            "export.prefix" => self.export_prefix().to_string(),
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        };
        Ok(value)
    }

    /// Every key with its effective value.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        KEYS.iter()
            .filter_map(|key| self.get(key).ok().map(|value| (*key, value)))
            .collect()
    }
}

/// Candidate config files in search order.
fn search_paths(
    env_path: Option<String>,
    xdg_config_home: Option<String>,
    home: Option<PathBuf>,
) -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Some(path) = env_path {
        paths.push(PathBuf::from(path));
    }
    if let Some(xdg) = xdg_config_home {
        paths.push(PathBuf::from(xdg).join("stitchwork/config.toml"));
    }
    if let Some(home) = home {
        paths.push(home.join(".stitchwork/config.toml"));
    }
    paths
}
