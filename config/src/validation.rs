//! # Configuration Validation
//!
//! Provides validation for the site configuration using the `validator`
//! crate.

use std::sync::LazyLock;

use chrono_tz::Tz;
use errors::ConfigError;
use regex::Regex;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::site::{EditPostConfig, SiteConfig};

static LANG_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z]{2,3}(-[A-Za-z0-9]{2,8})*$").expect("lang tag pattern is valid")
});

/// Validate the site configuration.
///
/// # M-CANONICAL-DOCS
///
/// ## Purpose
/// Validates all configuration fields using the `validator` crate.
///
/// ## Usage
/// ```rust,no_run
/// use site_config::{SiteConfig, validate};
///
/// let site = SiteConfig::default();
/// match validate(&site) {
///     Ok(()) => println!("Configuration is valid"),
///     Err(errors) => println!("Validation errors: {:?}", errors),
/// }
/// ```
///
/// ## Validation Rules
/// - `website`, `profile`: absolute URLs
/// - `author`, `desc`, `title`: non-empty
/// - `ogImage`: non-empty when set
/// - `postPerIndex`, `postPerPage`: at least 1
/// - `lang`: empty or a language tag such as "en" or "zh-cn"
/// - `timezone`: a known IANA timezone
/// - `editPost`: when enabled, `url` must be a URL and `text` non-empty
pub fn validate(config: &SiteConfig) -> Result<(), ValidationErrors> {
    config.validate()
}

/// Like [`validate`], flattening failures into a [`ConfigError`].
pub fn ensure_valid(config: &SiteConfig) -> Result<(), ConfigError> {
    validate(config).map_err(|errors| ConfigError::Validation {
        message: errors.to_string()
    })
}

pub(crate) fn validate_lang(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || LANG_TAG.is_match(value) {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_lang")
            .with_message("lang must be empty or a language tag like \"en\" or \"zh-cn\"".into()))
    }
}

pub(crate) fn validate_timezone(value: &str) -> Result<(), ValidationError> {
    match value.parse::<Tz>() {
        Ok(_) => Ok(()),
        Err(_) => Err(ValidationError::new("invalid_timezone")
            .with_message("timezone must be an IANA name like \"Asia/Shanghai\"".into()))
    }
}

pub(crate) fn validate_edit_post(edit_post: &EditPostConfig) -> Result<(), ValidationError> {
    if !edit_post.enabled {
        return Ok(());
    }
    if edit_post.text.trim().is_empty() {
        return Err(ValidationError::new("edit_post_text_missing")
            .with_message("editPost.text is required when editPost is enabled".into()));
    }
    if !validator::ValidateUrl::validate_url(&edit_post.url) {
        return Err(ValidationError::new("edit_post_url_invalid")
            .with_message("editPost.url must be a URL when editPost is enabled".into()));
    }
    Ok(())
}
