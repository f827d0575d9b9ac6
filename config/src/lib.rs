//! # Site Configuration
//!
//! Typed configuration for the company blog: site metadata, pagination,
//! locale, timezone, and feature toggles read by the site generator.
//!
//! This crate provides:
//! - The [`SiteConfig`] model with its built-in defaults
//! - Configuration file loading (TOML/YAML/JSON)
//! - Environment variable overrides (`SITE_*`)
//! - Configuration precedence (CLI > env > file > defaults)
//! - Configuration validation
//! - A write-once, process-wide instance
//! - Export to the `src/config.ts` module the site generator imports

pub mod file_loader;
pub mod global;
pub mod loader;
pub mod precedence;
pub mod render;
pub mod site;
pub mod validation;

pub use errors::ConfigError;
pub use file_loader::{
    ConfigFormat, file_fields, load_from_file, load_from_json, load_from_toml, load_from_yaml,
    to_string,
};
pub use global::{install, is_initialized, site};
pub use loader::{env_fields, load_from_env};
pub use precedence::{ConfigLayer, layer, merge_configs, merge_layers, resolve};
pub use render::{to_typescript, write_typescript};
pub use site::{EditPostConfig, SiteConfig, TextDirection};
pub use validation::{ensure_valid, validate};
pub use validator::Validate;
