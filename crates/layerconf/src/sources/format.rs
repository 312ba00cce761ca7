//! File format detection and parsing.
//!
//! Every format parses into a [`serde_json::Value`] tree which the flattener
//! then reduces to canonical keys, so TOML tables, YAML mappings, and JSON
//! objects all land in the same key space.
//!
//! | Format | Feature | Extensions |
//! |--------|---------|------------|
//! | JSON | (always) | `.json` |
//! | TOML | `toml` | `.toml` |
//! | YAML | `yaml` | `.yaml`, `.yml` |

use std::path::Path;

use serde_json::Value;

use crate::error::{Error, Result};

/// Supported configuration file formats.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FileFormat {
    /// JSON format (`.json` extension). Always available.
    Json,

    /// TOML format (`.toml` extension). Requires the `toml` feature.
    #[cfg(feature = "toml")]
    Toml,

    /// YAML format (`.yaml` or `.yml` extension). Requires the `yaml` feature.
    #[cfg(feature = "yaml")]
    Yaml,
}

impl FileFormat {
    /// Detects the format from the file extension.
    ///
    /// Returns `None` for unrecognized extensions and for formats whose
    /// feature flag is disabled.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;

        match ext.to_lowercase().as_str() {
            "json" => Some(FileFormat::Json),

            #[cfg(feature = "toml")]
            "toml" => Some(FileFormat::Toml),

            #[cfg(feature = "yaml")]
            "yaml" | "yml" => Some(FileFormat::Yaml),

            _ => None,
        }
    }

    /// The format name for error messages.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            FileFormat::Json => "JSON",

            #[cfg(feature = "toml")]
            FileFormat::Toml => "TOML",

            #[cfg(feature = "yaml")]
            FileFormat::Yaml => "YAML",
        }
    }

    /// Parses `content` in this format into a JSON value tree.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SourceLoad`] when the document is malformed.
    pub fn parse(&self, content: &str) -> Result<Value> {
        match self {
            FileFormat::Json => serde_json::from_str(content).map_err(|e| {
                Error::source_load_with_cause("JSON", "malformed document", e)
            }),

            #[cfg(feature = "toml")]
            FileFormat::Toml => {
                let value: toml::Value = toml::from_str(content).map_err(|e| {
                    Error::source_load_with_cause("TOML", "malformed document", e)
                })?;

                Ok(toml_to_json(value))
            }

            #[cfg(feature = "yaml")]
            FileFormat::Yaml => serde_saphyr::from_str(content).map_err(|e| {
                Error::source_load_with_cause("YAML", "malformed document", e)
            }),
        }
    }
}

/// Convert a TOML Value to a JSON Value.
#[cfg(feature = "toml")]
fn toml_to_json(value: toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::String(s),

        toml::Value::Integer(i) => Value::Number(i.into()),

        toml::Value::Float(f) => serde_json::Number::from_f64(f)
            .map_or(Value::Null, Value::Number),

        toml::Value::Boolean(b) => Value::Bool(b),

        // Datetimes carry no native JSON representation; keep the text form.
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),

        toml::Value::Array(items) => {
            Value::Array(items.into_iter().map(toml_to_json).collect())
        }

        toml::Value::Table(table) => Value::Object(
            table
                .into_iter()
                .map(|(k, v)| (k, toml_to_json(v)))
                .collect(),
        ),
    }
}
