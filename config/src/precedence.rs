//! # Configuration Precedence
//!
//! Merges the site configuration from multiple sources with precedence rules.
//!
//! # Precedence Order
//! 1. CLI-provided values (highest priority)
//! 2. Environment variables
//! 3. Configuration file
//! 4. Default values (lowest priority)

use std::collections::BTreeSet;
use std::fmt::Debug;
use std::path::Path;

use errors::ConfigError;
use tracing::info;

use crate::file_loader::{file_fields, load_from_file};
use crate::loader::{env_fields, load_from_env};
use crate::site::{EditPostConfig, SiteConfig};
use crate::validation::ensure_valid;

/// Merge configuration sources with precedence.
///
/// # M-CANONICAL-DOCS
///
/// ## Purpose
/// Merges configuration following precedence rules:
/// CLI > environment variables > config file > defaults.
///
/// ## Usage
/// ```rust,no_run
/// use site_config::{SiteConfig, merge_configs, load_from_file, load_from_env};
/// use std::path::Path;
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let defaults = SiteConfig::default();
///     let from_file = load_from_file(Path::new("site.toml"))?;
///     let from_env = load_from_env()?;
///
///     let _site = merge_configs(defaults, from_file, "file", from_env, "env", None, "cli");
///     Ok(())
/// }
/// ```
///
/// ## Merge Rule
/// These layers carry no record of which keys were set, so a field replaces
/// the accumulated value only when it differs from the default. Use
/// [`merge_layers`] when the sources know their explicit keys. Every applied
/// change is logged with its source name.
pub fn merge_configs(
    defaults: SiteConfig,
    file_config: SiteConfig,
    file_source_name: &str,
    env_config: SiteConfig,
    env_source_name: &str,
    cli_config: Option<SiteConfig>,
    cli_source_name: &str,
) -> SiteConfig {
    let mut config = defaults.clone();
    let presence = Presence::DiffersFromDefault;

    config = merge_with_logging(config, &defaults, &file_config, file_source_name, &presence);
    config = merge_with_logging(config, &defaults, &env_config, env_source_name, &presence);

    if let Some(cli) = cli_config {
        config = merge_with_logging(config, &defaults, &cli, cli_source_name, &presence);
    }

    config
}

/// One configuration source and the keys it set explicitly.
///
/// Keys use the camelCase names, with `editPost.<key>` for the nested
/// table.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigLayer {
    pub source: String,
    pub config: SiteConfig,
    pub fields: BTreeSet<String>
}

impl ConfigLayer {
    pub fn new(source: impl Into<String>, config: SiteConfig, fields: BTreeSet<String>) -> Self {
        Self {
            source: source.into(),
            config,
            fields
        }
    }

    /// The layer defined by a config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        Ok(Self::new(
            path.display().to_string(),
            load_from_file(path)?,
            file_fields(path)?
        ))
    }

    /// The layer defined by the `SITE_*` environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self::new("env", load_from_env()?, env_fields()))
    }
}

/// Apply `layers` over `defaults`, lowest precedence first.
///
/// A field is taken from a layer whenever that layer set it, including when
/// the value equals the built-in default.
pub fn merge_layers(defaults: SiteConfig, layers: &[ConfigLayer]) -> SiteConfig {
    let mut config = defaults.clone();
    for layer in layers {
        let presence = Presence::Fields(&layer.fields);
        config = merge_with_logging(config, &defaults, &layer.config, &layer.source, &presence);
    }
    config
}

/// Resolve the effective site configuration.
///
/// Loads the optional config file and the `SITE_*` environment, merges them
/// over the defaults, and validates the result.
pub fn resolve(path: Option<&Path>) -> Result<SiteConfig, ConfigError> {
    let config = layer(path)?;
    ensure_valid(&config)?;
    Ok(config)
}

/// Like [`resolve`] without the final validation, for reporting every
/// problem in a merged configuration.
pub fn layer(path: Option<&Path>) -> Result<SiteConfig, ConfigError> {
    let mut layers = Vec::with_capacity(2);
    if let Some(path) = path {
        layers.push(ConfigLayer::from_file(path)?);
    }
    layers.push(ConfigLayer::from_env()?);

    Ok(merge_layers(SiteConfig::default(), &layers))
}

/// How a layer marks the fields it overrides.
enum Presence<'a> {
    DiffersFromDefault,
    Fields(&'a BTreeSet<String>)
}

impl Presence<'_> {
    fn is_set<T: PartialEq>(&self, field: &str, default: &T, candidate: &T) -> bool {
        match self {
            Presence::DiffersFromDefault => candidate != default,
            Presence::Fields(fields) => fields.contains(field)
        }
    }
}

fn merge_with_logging(
    mut base: SiteConfig,
    defaults: &SiteConfig,
    override_config: &SiteConfig,
    source_name: &str,
    presence: &Presence<'_>,
) -> SiteConfig {
    let mut changes = Vec::new();

    apply(
        "website",
        &mut base.website,
        &defaults.website,
        &override_config.website,
        presence,
        &mut changes,
    );
    apply(
        "author",
        &mut base.author,
        &defaults.author,
        &override_config.author,
        presence,
        &mut changes,
    );
    apply(
        "profile",
        &mut base.profile,
        &defaults.profile,
        &override_config.profile,
        presence,
        &mut changes,
    );
    apply("desc", &mut base.desc, &defaults.desc, &override_config.desc, presence, &mut changes);
    apply(
        "title",
        &mut base.title,
        &defaults.title,
        &override_config.title,
        presence,
        &mut changes,
    );
    apply(
        "ogImage",
        &mut base.og_image,
        &defaults.og_image,
        &override_config.og_image,
        presence,
        &mut changes,
    );
    apply(
        "lightAndDarkMode",
        &mut base.light_and_dark_mode,
        &defaults.light_and_dark_mode,
        &override_config.light_and_dark_mode,
        presence,
        &mut changes,
    );
    apply(
        "postPerIndex",
        &mut base.post_per_index,
        &defaults.post_per_index,
        &override_config.post_per_index,
        presence,
        &mut changes,
    );
    apply(
        "postPerPage",
        &mut base.post_per_page,
        &defaults.post_per_page,
        &override_config.post_per_page,
        presence,
        &mut changes,
    );
    apply(
        "scheduledPostMargin",
        &mut base.scheduled_post_margin,
        &defaults.scheduled_post_margin,
        &override_config.scheduled_post_margin,
        presence,
        &mut changes,
    );
    apply(
        "showArchives",
        &mut base.show_archives,
        &defaults.show_archives,
        &override_config.show_archives,
        presence,
        &mut changes,
    );
    apply(
        "showBackButton",
        &mut base.show_back_button,
        &defaults.show_back_button,
        &override_config.show_back_button,
        presence,
        &mut changes,
    );
    merge_edit_post(
        &mut base.edit_post,
        &defaults.edit_post,
        &override_config.edit_post,
        presence,
        &mut changes,
    );
    apply(
        "dynamicOgImage",
        &mut base.dynamic_og_image,
        &defaults.dynamic_og_image,
        &override_config.dynamic_og_image,
        presence,
        &mut changes,
    );
    apply("dir", &mut base.dir, &defaults.dir, &override_config.dir, presence, &mut changes);
    apply("lang", &mut base.lang, &defaults.lang, &override_config.lang, presence, &mut changes);
    apply(
        "timezone",
        &mut base.timezone,
        &defaults.timezone,
        &override_config.timezone,
        presence,
        &mut changes,
    );

    if !changes.is_empty() {
        info!("Site configuration from {}: {:?}", source_name, changes);
    }

    base
}

fn merge_edit_post(
    base: &mut EditPostConfig,
    defaults: &EditPostConfig,
    override_config: &EditPostConfig,
    presence: &Presence<'_>,
    changes: &mut Vec<String>,
) {
    apply(
        "editPost.enabled",
        &mut base.enabled,
        &defaults.enabled,
        &override_config.enabled,
        presence,
        changes,
    );
    apply(
        "editPost.text",
        &mut base.text,
        &defaults.text,
        &override_config.text,
        presence,
        changes,
    );
    apply("editPost.url", &mut base.url, &defaults.url, &override_config.url, presence, changes);
}

fn apply<T: PartialEq + Clone + Debug>(
    field: &str,
    base: &mut T,
    default: &T,
    candidate: &T,
    presence: &Presence<'_>,
    changes: &mut Vec<String>,
) {
    if presence.is_set(field, default, candidate) && candidate != base {
        changes.push(format!("{field} = {candidate:?}"));
        base.clone_from(candidate);
    }
}
