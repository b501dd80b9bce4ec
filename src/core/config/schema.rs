//! core::config::schema
//!
//! Configuration schema types.
//!
//! # Example
//!
//! ```toml
//! [canvas]
//! width = 800
//! height = 600
//!
//! [editor]
//! hover_radius = 20
//! nudge_step = 1
//! nudge_step_large = 10
//!
//! [export]
//! prefix = "exported pattern"
//! ```
//!
//! # Validation
//!
//! Every field is optional; missing values take their defaults in
//! [`Config`](super::Config). Present values are validated after parsing:
//! sizes and distances must be positive and finite, and the export prefix
//! must be usable as part of a file name.

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Contents of one config file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub canvas: Option<CanvasConfig>,
    pub editor: Option<EditorConfig>,
    pub export: Option<ExportConfig>,
}

impl ConfigFile {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the first invalid key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(canvas) = &self.canvas {
            positive("canvas.width", canvas.width)?;
            positive("canvas.height", canvas.height)?;
        }
        if let Some(editor) = &self.editor {
            positive("editor.hover_radius", editor.hover_radius)?;
            positive("editor.nudge_step", editor.nudge_step)?;
            positive("editor.nudge_step_large", editor.nudge_step_large)?;
        }
        if let Some(export) = &self.export {
            export.validate()?;
        }
        Ok(())
    }
}

fn positive(key: &str, value: Option<f64>) -> Result<(), ConfigError> {
    match value {
        Some(v) if !(v.is_finite() && v > 0.0) => Err(ConfigError::InvalidValue(format!(
            "{key} must be a positive number, got {v}"
        ))),
        _ => Ok(()),
    }
}

/// Drawing surface size in pixels.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct CanvasConfig {
    pub width: Option<f64>,
    pub height: Option<f64>,
}

/// Pointer and keyboard tuning.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct EditorConfig {
    /// Pick distance for hovering a stitch, in pixels
    pub hover_radius: Option<f64>,

    /// Arrow-key nudge distance
    pub nudge_step: Option<f64>,

    /// Arrow-key nudge distance with Shift held
    pub nudge_step_large: Option<f64>,
}

/// Export file naming.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ExportConfig {
    /// Text before the timestamp in export file names
    pub prefix: Option<String>,
}

impl ExportConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(prefix) = &self.prefix {
            if prefix.trim().is_empty() {
                return Err(ConfigError::InvalidValue(
                    "export.prefix cannot be empty".to_string(),
                ));
            }
            if prefix.contains(['/', '\\']) {
                return Err(ConfigError::InvalidValue(format!(
                    "export.prefix '{prefix}' cannot contain path separators"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert!(ConfigFile::default().validate().is_ok());
    }

    #[test]
    fn parses_integers_as_floats() {
        let config: ConfigFile = toml::from_str(
            r#"
            [canvas]
            width = 1024
            height = 768.5
            "#,
        )
        .unwrap();
        let canvas = config.canvas.unwrap();
        assert_eq!(canvas.width, Some(1024.0));
        assert_eq!(canvas.height, Some(768.5));
    }

    #[test]
    fn non_positive_values_rejected() {
        let config = ConfigFile {
            editor: Some(EditorConfig {
                hover_radius: Some(0.0),
                ..Default::default()
            }),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("editor.hover_radius"));

        let config = ConfigFile {
            canvas: Some(CanvasConfig {
                width: Some(-5.0),
                height: None,
            }),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn prefix_rules() {
        let ok = ExportConfig {
            prefix: Some("my scarf".to_string()),
        };
        assert!(ok.validate().is_ok());

        let empty = ExportConfig {
            prefix: Some("  ".to_string()),
        };
        assert!(empty.validate().is_err());

        let sep = ExportConfig {
            prefix: Some("a/b".to_string()),
        };
        assert!(sep.validate().is_err());
    }

    #[test]
    fn roundtrip() {
        let config = ConfigFile {
            canvas: Some(CanvasConfig {
                width: Some(640.0),
                height: Some(480.0),
            }),
            editor: Some(EditorConfig {
                hover_radius: Some(15.0),
                nudge_step: Some(2.0),
                nudge_step_large: Some(20.0),
            }),
            export: Some(ExportConfig {
                prefix: Some("hat".to_string()),
            }),
        };

        let toml = toml::to_string_pretty(&config).unwrap();
        let parsed: ConfigFile = toml::from_str(&toml).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn reject_unknown_fields() {
        let toml = r#"
            [editor]
            hover_radius = 10
            snap = true
        "#;
        let result: Result<ConfigFile, _> = toml::from_str(toml);
        assert!(result.is_err());

        let result: Result<ConfigFile, _> = toml::from_str("theme = \"dark\"");
        assert!(result.is_err());
    }
}
