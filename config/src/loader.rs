//! # Environment Variable Loader
//!
//! Loads the site configuration from `SITE_*` environment variables following
//! 12-factor app principles.

use std::collections::BTreeSet;
use std::env;
use std::str::FromStr;

use errors::ConfigError;
use tracing::debug;

use crate::site::{EditPostConfig, SiteConfig, TextDirection};

/// Load the site configuration from environment variables.
///
/// # M-CANONICAL-DOCS
///
/// ## Purpose
/// Environment variables override the built-in defaults and can in turn be
/// overridden by CLI-provided values (see [`crate::merge_configs`]).
///
/// ## Usage
/// ```rust,no_run
/// use site_config::load_from_env;
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let site = load_from_env()?;
///     println!("Timezone: {}", site.timezone);
///     Ok(())
/// }
/// ```
///
/// ## Environment Variables
/// - `SITE_WEBSITE`, `SITE_PROFILE`: absolute URLs
/// - `SITE_AUTHOR`, `SITE_DESC`, `SITE_TITLE`: display strings
/// - `SITE_OG_IMAGE`: default OG image (empty unsets it)
/// - `SITE_LIGHT_AND_DARK_MODE`, `SITE_SHOW_ARCHIVES`,
///   `SITE_SHOW_BACK_BUTTON`, `SITE_DYNAMIC_OG_IMAGE`: booleans
///   (true/false/1/0/yes/no)
/// - `SITE_POST_PER_INDEX`, `SITE_POST_PER_PAGE`: positive integers
/// - `SITE_SCHEDULED_POST_MARGIN`: milliseconds
/// - `SITE_EDIT_POST_ENABLED`, `SITE_EDIT_POST_TEXT`, `SITE_EDIT_POST_URL`
/// - `SITE_DIR`: ltr/rtl/auto
/// - `SITE_LANG`: html lang code
/// - `SITE_TIMEZONE`: IANA timezone
///
/// ## Error Handling
/// Unset variables keep their default. A set variable that does not parse
/// returns `ConfigError::InvalidEnv` naming the variable.
pub fn load_from_env() -> Result<SiteConfig, ConfigError> {
    let defaults = SiteConfig::default();

    let og_image = match env::var("SITE_OG_IMAGE") {
        Ok(value) if value.is_empty() => None,
        Ok(value) => Some(value),
        Err(_) => defaults.og_image.clone()
    };

    let config = SiteConfig {
        website: env_string("SITE_WEBSITE", &defaults.website),
        author: env_string("SITE_AUTHOR", &defaults.author),
        profile: env_string("SITE_PROFILE", &defaults.profile),
        desc: env_string("SITE_DESC", &defaults.desc),
        title: env_string("SITE_TITLE", &defaults.title),
        og_image,
        light_and_dark_mode: env_bool("SITE_LIGHT_AND_DARK_MODE")?
            .unwrap_or(defaults.light_and_dark_mode),
        post_per_index: parse_env("SITE_POST_PER_INDEX")?.unwrap_or(defaults.post_per_index),
        post_per_page: parse_env("SITE_POST_PER_PAGE")?.unwrap_or(defaults.post_per_page),
        scheduled_post_margin: parse_env("SITE_SCHEDULED_POST_MARGIN")?
            .unwrap_or(defaults.scheduled_post_margin),
        show_archives: env_bool("SITE_SHOW_ARCHIVES")?.unwrap_or(defaults.show_archives),
        show_back_button: env_bool("SITE_SHOW_BACK_BUTTON")?.unwrap_or(defaults.show_back_button),
        edit_post: load_edit_post_from_env(&defaults.edit_post)?,
        dynamic_og_image: env_bool("SITE_DYNAMIC_OG_IMAGE")?.unwrap_or(defaults.dynamic_og_image),
        dir: parse_env::<TextDirection>("SITE_DIR")?.unwrap_or(defaults.dir),
        lang: env_string("SITE_LANG", &defaults.lang),
        timezone: env_string("SITE_TIMEZONE", &defaults.timezone)
    };

    Ok(config)
}

/// Environment variable for each configuration key.
pub const ENV_FIELDS: &[(&str, &str)] = &[
    ("SITE_WEBSITE", "website"),
    ("SITE_AUTHOR", "author"),
    ("SITE_PROFILE", "profile"),
    ("SITE_DESC", "desc"),
    ("SITE_TITLE", "title"),
    ("SITE_OG_IMAGE", "ogImage"),
    ("SITE_LIGHT_AND_DARK_MODE", "lightAndDarkMode"),
    ("SITE_POST_PER_INDEX", "postPerIndex"),
    ("SITE_POST_PER_PAGE", "postPerPage"),
    ("SITE_SCHEDULED_POST_MARGIN", "scheduledPostMargin"),
    ("SITE_SHOW_ARCHIVES", "showArchives"),
    ("SITE_SHOW_BACK_BUTTON", "showBackButton"),
    ("SITE_EDIT_POST_ENABLED", "editPost.enabled"),
    ("SITE_EDIT_POST_TEXT", "editPost.text"),
    ("SITE_EDIT_POST_URL", "editPost.url"),
    ("SITE_DYNAMIC_OG_IMAGE", "dynamicOgImage"),
    ("SITE_DIR", "dir"),
    ("SITE_LANG", "lang"),
    ("SITE_TIMEZONE", "timezone"),
];

/// Configuration keys whose `SITE_*` variable is set, even to an empty value.
pub fn env_fields() -> BTreeSet<String> {
    ENV_FIELDS
        .iter()
        .filter(|(var, _)| env::var_os(var).is_some())
        .map(|(_, field)| (*field).to_string())
        .collect()
}

fn load_edit_post_from_env(defaults: &EditPostConfig) -> Result<EditPostConfig, ConfigError> {
    Ok(EditPostConfig {
        enabled: env_bool("SITE_EDIT_POST_ENABLED")?.unwrap_or(defaults.enabled),
        text: env_string("SITE_EDIT_POST_TEXT", &defaults.text),
        url: env_string("SITE_EDIT_POST_URL", &defaults.url)
    })
}

fn env_string(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T: FromStr>(key: &str) -> Result<Option<T>, ConfigError> {
    match env::var(key) {
        Ok(raw) => {
            debug!("Applying {} from environment", key);
            raw.trim()
                .parse::<T>()
                .map(Some)
                .map_err(|_| ConfigError::InvalidEnv {
                    key: key.to_string(),
                    value: raw
                })
        }
        Err(_) => Ok(None)
    }
}

fn env_bool(key: &str) -> Result<Option<bool>, ConfigError> {
    match env::var(key) {
        Ok(raw) => match raw.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(Some(true)),
            "false" | "0" | "no" | "off" => Ok(Some(false)),
            _ => Err(ConfigError::InvalidEnv {
                key: key.to_string(),
                value: raw
            })
        },
        Err(_) => Ok(None)
    }
}
