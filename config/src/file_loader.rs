//! # Configuration File Loading
//!
//! Loads the site configuration from TOML, YAML, or JSON files.
//!
//! Supports automatic format detection based on file extension. Missing keys
//! take their built-in defaults.

use std::collections::BTreeSet;
use std::io;
use std::path::Path;

use errors::ConfigError;
use serde_json::Value;
use tracing::debug;

use crate::site::SiteConfig;

fn read(path: &Path) -> Result<String, ConfigError> {
    debug!("Reading site config from {}", path.display());
    std::fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => ConfigError::FileNotFound {
            path: path.display().to_string()
        },
        _ => ConfigError::Io(e)
    })
}

/// Load the site configuration from a TOML file.
///
/// # M-CANONICAL-DOCS
///
/// ## Usage
/// ```rust,no_run
/// use site_config::load_from_toml;
/// use std::path::Path;
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let site = load_from_toml(Path::new("site.toml"))?;
///     println!("Title: {}", site.title);
///     Ok(())
/// }
/// ```
///
/// ## Error Handling
/// Returns `ConfigError` for:
/// - File not found
/// - Invalid TOML syntax or wrongly typed values
pub fn load_from_toml(path: &Path) -> Result<SiteConfig, ConfigError> {
    let contents = read(path)?;
    toml::from_str(&contents).map_err(|e| ConfigError::TomlParse {
        reason: e.to_string()
    })
}

/// Load the site configuration from a YAML file.
pub fn load_from_yaml(path: &Path) -> Result<SiteConfig, ConfigError> {
    let contents = read(path)?;
    serde_yaml::from_str(&contents).map_err(|e| ConfigError::YamlParse {
        reason: e.to_string()
    })
}

/// Load the site configuration from a JSON file.
pub fn load_from_json(path: &Path) -> Result<SiteConfig, ConfigError> {
    let contents = read(path)?;
    serde_json::from_str(&contents).map_err(|e| ConfigError::JsonParse {
        reason: e.to_string()
    })
}

/// Load the site configuration with format auto-detection.
///
/// ## Supported Formats
/// - `.toml`: TOML format
/// - `.yaml` / `.yml`: YAML format
/// - `.json`: JSON format
pub fn load_from_file(path: &Path) -> Result<SiteConfig, ConfigError> {
    match detect_format(path)? {
        ConfigFormat::Toml => load_from_toml(path),
        ConfigFormat::Yaml => load_from_yaml(path),
        ConfigFormat::Json => load_from_json(path)
    }
}

/// Keys a config file sets explicitly.
///
/// Top-level keys use their camelCase names; keys of a nested table are
/// reported as `parent.key` (e.g. `editPost.url`).
pub fn file_fields(path: &Path) -> Result<BTreeSet<String>, ConfigError> {
    let format = detect_format(path)?;
    let contents = read(path)?;

    let document: Value = match format {
        ConfigFormat::Toml => toml::from_str(&contents).map_err(|e| ConfigError::TomlParse {
            reason: e.to_string()
        })?,
        ConfigFormat::Yaml => serde_yaml::from_str(&contents).map_err(|e| ConfigError::YamlParse {
            reason: e.to_string()
        })?,
        ConfigFormat::Json => serde_json::from_str(&contents).map_err(|e| ConfigError::JsonParse {
            reason: e.to_string()
        })?
    };

    Ok(collect_fields(&document))
}

fn collect_fields(document: &Value) -> BTreeSet<String> {
    let mut fields = BTreeSet::new();
    if let Value::Object(map) = document {
        for (key, value) in map {
            match value {
                Value::Object(nested) => {
                    fields.extend(nested.keys().map(|inner| format!("{key}.{inner}")));
                }
                _ => {
                    fields.insert(key.clone());
                }
            }
        }
    }
    fields
}

fn detect_format(path: &Path) -> Result<ConfigFormat, ConfigError> {
    let extension = path
        .extension()
        .and_then(|s| s.to_str())
        .ok_or(ConfigError::NoExtension)?;

    match extension.to_lowercase().as_str() {
        "toml" => Ok(ConfigFormat::Toml),
        "yaml" | "yml" => Ok(ConfigFormat::Yaml),
        "json" => Ok(ConfigFormat::Json),
        other => Err(ConfigError::UnsupportedFormat {
            extension: other.to_string()
        })
    }
}

/// Serialization format of a site config document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ConfigFormat {
    Toml,
    Yaml,
    Json
}

/// Serialize `config` in the given format.
pub fn to_string(config: &SiteConfig, format: ConfigFormat) -> Result<String, ConfigError> {
    let serialized = match format {
        ConfigFormat::Toml => toml::to_string_pretty(config).map_err(|e| e.to_string()),
        ConfigFormat::Yaml => serde_yaml::to_string(config).map_err(|e| e.to_string()),
        ConfigFormat::Json => serde_json::to_string_pretty(config).map_err(|e| e.to_string())
    };

    serialized.map_err(|reason| ConfigError::Serialize {
        format: format.to_string(),
        reason
    })
}
