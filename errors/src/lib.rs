//! # Site Errors
//!
//! Error types shared by the site configuration library and the `sitectl`
//! binary.
//!
//! - Uses `thiserror` for structured error definitions
//! - Named fields for every variant carrying context

use thiserror::Error;

/// Errors raised while loading, validating, or installing the site
/// configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file not found: {path}")]
    FileNotFound { path: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {reason}")]
    TomlParse { reason: String },

    #[error("Failed to parse YAML: {reason}")]
    YamlParse { reason: String },

    #[error("Failed to parse JSON: {reason}")]
    JsonParse { reason: String },

    #[error("Failed to serialize config as {format}: {reason}")]
    Serialize { format: String, reason: String },

    #[error("Config file has no extension")]
    NoExtension,

    #[error("Unsupported config file format: {extension}")]
    UnsupportedFormat { extension: String },

    #[error("Invalid value for {key}: '{value}'")]
    InvalidEnv { key: String, value: String },

    #[error("Invalid IANA timezone: {timezone}")]
    InvalidTimezone { timezone: String },

    #[error("Local time {datetime} does not exist in {timezone}")]
    NonexistentLocalTime { datetime: String, timezone: String },

    #[error("Validation failed: {message}")]
    Validation { message: String },

    #[error("Site configuration is already initialized")]
    AlreadyInitialized
}

/// Errors raised while running project tasks (npm scripts, file openers).
#[derive(Debug, Error)]
pub enum TaskError {
    #[error("Failed to launch '{command}': {reason}")]
    Spawn { command: String, reason: String },

    #[error("Command '{command}' failed with {}", exit_description(.code))]
    CommandFailed { command: String, code: Option<i32> },

    #[error("No {marker} found in {path}")]
    ProjectNotFound { path: String, marker: String },

    #[error("Interrupted")]
    Interrupted
}

fn exit_description(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {code}"),
        None => "no exit code (terminated by signal)".to_string()
    }
}
