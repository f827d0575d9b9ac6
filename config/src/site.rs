//! # Site Configuration Model
//!
//! Defines the configuration value consumed by the site generator: metadata,
//! pagination sizes, locale, timezone, and feature toggles.
//!
//! All structures:
//! - Use `serde` with camelCase keys, the shape the site generator reads
//! - Use `validator` for input validation
//! - Fill missing keys from the built-in defaults

use std::time::Duration;

use chrono::{DateTime, NaiveDateTime, TimeDelta, TimeZone, Utc};
use chrono_tz::Tz;
use errors::ConfigError;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Canonical origin of the deployed site.
pub const DEFAULT_WEBSITE: &str = "https://www.yunchujiao.com/";
/// Company name used as author and title.
pub const DEFAULT_AUTHOR: &str = "云触角（重庆）科技有限公司";
pub const DEFAULT_DESC: &str =
    "云触角科技 - 您身边的IT服务专家，提供IT运维、电脑维修、系统安装、网站建设等服务。";
pub const DEFAULT_OG_IMAGE: &str = "yunchujiao-og.jpg";
/// 15 minutes.
pub const DEFAULT_SCHEDULED_POST_MARGIN_MS: u64 = 15 * 60 * 1000;
pub const DEFAULT_LANG: &str = "zh-cn";
pub const DEFAULT_TIMEZONE: &str = "Asia/Shanghai";

/// Language used when `lang` is left empty.
pub const FALLBACK_HTML_LANG: &str = "en";

/// Site configuration.
///
/// # M-CANONICAL-DOCS
///
/// ## Purpose
/// Single immutable value describing the site. Built once at startup (from
/// defaults, a config file, and `SITE_*` environment variables) and read by
/// every consumer afterwards.
///
/// ## Usage
/// ```rust,no_run
/// use site_config::SiteConfig;
///
/// let site = SiteConfig::default();
/// println!("{} by {}", site.title, site.author);
/// ```
///
/// ## Fields
/// - `website` / `profile`: absolute URLs
/// - `author`, `desc`, `title`: display strings
/// - `og_image`: default Open Graph image file name
/// - `post_per_index`, `post_per_page`: pagination sizes (>= 1)
/// - `scheduled_post_margin`: future-post visibility delay in milliseconds
/// - `light_and_dark_mode`, `show_archives`, `show_back_button`,
///   `dynamic_og_image`: feature toggles
/// - `edit_post`: optional "edit this post" link
/// - `dir`: text direction
/// - `lang`: html lang code, empty means "en"
/// - `timezone`: IANA timezone used to interpret naive timestamps
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct SiteConfig {
    #[validate(url)]
    pub website: String,

    #[validate(length(min = 1))]
    pub author: String,

    #[validate(url)]
    pub profile: String,

    #[validate(length(min = 1))]
    pub desc: String,

    #[validate(length(min = 1))]
    pub title: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1))]
    pub og_image: Option<String>,

    pub light_and_dark_mode: bool,

    #[validate(range(min = 1))]
    pub post_per_index: u32,

    #[validate(range(min = 1))]
    pub post_per_page: u32,

    /// Milliseconds before a post's publish time during which it is
    /// already listed.
    pub scheduled_post_margin: u64,

    pub show_archives: bool,

    /// Show the back button on the post detail page.
    pub show_back_button: bool,

    #[validate(nested)]
    pub edit_post: EditPostConfig,

    pub dynamic_og_image: bool,

    pub dir: TextDirection,

    #[validate(custom(function = "crate::validation::validate_lang"))]
    pub lang: String,

    #[validate(custom(function = "crate::validation::validate_timezone"))]
    pub timezone: String
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            website: DEFAULT_WEBSITE.to_string(),
            author: DEFAULT_AUTHOR.to_string(),
            profile: DEFAULT_WEBSITE.to_string(),
            desc: DEFAULT_DESC.to_string(),
            title: DEFAULT_AUTHOR.to_string(),
            og_image: Some(DEFAULT_OG_IMAGE.to_string()),
            light_and_dark_mode: true,
            post_per_index: 3,
            post_per_page: 6,
            scheduled_post_margin: DEFAULT_SCHEDULED_POST_MARGIN_MS,
            show_archives: true,
            show_back_button: true,
            edit_post: EditPostConfig::default(),
            dynamic_og_image: true,
            dir: TextDirection::default(),
            lang: DEFAULT_LANG.to_string(),
            timezone: DEFAULT_TIMEZONE.to_string()
        }
    }
}

impl SiteConfig {
    /// The scheduled post margin as a [`Duration`].
    pub fn scheduled_margin(&self) -> Duration {
        Duration::from_millis(self.scheduled_post_margin)
    }

    /// Whether a post published at `published_at` may be listed at `now`.
    ///
    /// A post becomes visible `scheduled_post_margin` before its publish
    /// time, so slightly early builds still pick it up.
    pub fn is_publish_time_passed(&self, published_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        let margin = i64::try_from(self.scheduled_post_margin)
            .ok()
            .and_then(TimeDelta::try_milliseconds);

        match margin.and_then(|m| published_at.checked_sub_signed(m)) {
            Some(visible_from) => now > visible_from,
            None => true
        }
    }

    /// The html `lang` attribute, falling back to "en" when unset.
    pub fn html_lang(&self) -> &str {
        if self.lang.trim().is_empty() {
            FALLBACK_HTML_LANG
        } else {
            &self.lang
        }
    }

    /// The configured IANA timezone.
    pub fn tz(&self) -> Result<Tz, ConfigError> {
        self.timezone
            .parse::<Tz>()
            .map_err(|_| ConfigError::InvalidTimezone {
                timezone: self.timezone.clone()
            })
    }

    /// Interprets a timestamp without offset in the site timezone.
    ///
    /// Ambiguous local times (DST fall-back) resolve to the earliest instant.
    pub fn localize(&self, naive: NaiveDateTime) -> Result<DateTime<Tz>, ConfigError> {
        let tz = self.tz()?;
        tz.from_local_datetime(&naive)
            .earliest()
            .ok_or_else(|| ConfigError::NonexistentLocalTime {
                datetime: naive.to_string(),
                timezone: self.timezone.clone()
            })
    }

    /// Number of listing pages needed for `total_posts`. Always at least 1.
    pub fn page_count(&self, total_posts: usize) -> usize {
        let per_page = (self.post_per_page as usize).max(1);
        total_posts.div_ceil(per_page).max(1)
    }

    /// Edit link for a post source path, if edit links are enabled.
    pub fn edit_link(&self, file_path: &str) -> Option<String> {
        self.edit_post.link_for(file_path)
    }
}

/// "Edit this post" link configuration.
///
/// When `enabled`, `url` is used as a prefix for the post's source path.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, PartialEq)]
#[serde(default)]
#[validate(schema(function = "crate::validation::validate_edit_post"))]
pub struct EditPostConfig {
    pub enabled: bool,
    pub text: String,
    pub url: String
}

impl EditPostConfig {
    pub fn link_for(&self, file_path: &str) -> Option<String> {
        if !self.enabled || self.url.is_empty() {
            return None;
        }
        Some(format!("{}{}", self.url, file_path))
    }
}

/// Text direction of the rendered pages.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::VariantNames,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum TextDirection {
    #[default]
    Ltr,
    Rtl,
    Auto
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Timelike};
    use strum::VariantNames;

    #[test]
    fn test_default_matches_builtin_site() {
        let site = SiteConfig::default();
        assert_eq!(site.website, "https://www.yunchujiao.com/");
        assert_eq!(site.profile, site.website);
        assert_eq!(site.author, "云触角（重庆）科技有限公司");
        assert_eq!(site.title, site.author);
        assert_eq!(site.og_image.as_deref(), Some("yunchujiao-og.jpg"));
        assert!(site.light_and_dark_mode);
        assert_eq!(site.post_per_index, 3);
        assert_eq!(site.post_per_page, 6);
        assert_eq!(site.scheduled_post_margin, 900_000);
        assert!(site.show_archives);
        assert!(site.show_back_button);
        assert!(!site.edit_post.enabled);
        assert!(site.dynamic_og_image);
        assert_eq!(site.dir, TextDirection::Ltr);
        assert_eq!(site.lang, "zh-cn");
        assert_eq!(site.timezone, "Asia/Shanghai");
    }

    #[test]
    fn test_serialized_shape_uses_camel_case_keys() {
        let value = serde_json::to_value(SiteConfig::default()).unwrap();
        let mut keys: Vec<&str> = value
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        keys.sort_unstable();

        assert_eq!(
            keys,
            vec![
                "author",
                "desc",
                "dir",
                "dynamicOgImage",
                "editPost",
                "lang",
                "lightAndDarkMode",
                "ogImage",
                "postPerIndex",
                "postPerPage",
                "profile",
                "scheduledPostMargin",
                "showArchives",
                "showBackButton",
                "timezone",
                "title",
                "website",
            ]
        );
        assert_eq!(value["editPost"]["enabled"], false);
        assert_eq!(value["dir"], "ltr");
        assert_eq!(value["scheduledPostMargin"], 900_000);
    }

    #[test]
    fn test_partial_document_fills_defaults() {
        let site: SiteConfig =
            serde_json::from_str(r#"{"title": "Notes", "postPerPage": 10, "dir": "rtl"}"#).unwrap();
        assert_eq!(site.title, "Notes");
        assert_eq!(site.post_per_page, 10);
        assert_eq!(site.dir, TextDirection::Rtl);
        assert_eq!(site.post_per_index, 3);
        assert_eq!(site.timezone, DEFAULT_TIMEZONE);
    }

    #[test]
    fn test_unknown_direction_rejected() {
        let result = serde_json::from_str::<SiteConfig>(r#"{"dir": "sideways"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_negative_margin_rejected() {
        let result = serde_json::from_str::<SiteConfig>(r#"{"scheduledPostMargin": -1}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_text_direction_variants() {
        assert_eq!(TextDirection::VARIANTS, &["ltr", "rtl", "auto"]);
        assert_eq!("RTL".parse::<TextDirection>().unwrap(), TextDirection::Rtl);
        assert_eq!(TextDirection::Auto.to_string(), "auto");
        assert!("up".parse::<TextDirection>().is_err());
    }

    #[test]
    fn test_publish_time_margin() {
        let site = SiteConfig::default();
        let published = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();

        let well_before = published - TimeDelta::minutes(20);
        let inside_margin = published - TimeDelta::minutes(10);
        let after = published + TimeDelta::seconds(1);

        assert!(!site.is_publish_time_passed(published, well_before));
        assert!(site.is_publish_time_passed(published, inside_margin));
        assert!(site.is_publish_time_passed(published, after));
    }

    #[test]
    fn test_publish_time_without_margin() {
        let site = SiteConfig {
            scheduled_post_margin: 0,
            ..SiteConfig::default()
        };
        let published = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        assert!(!site.is_publish_time_passed(published, published));
        assert!(site.is_publish_time_passed(published, published + TimeDelta::milliseconds(1)));
    }

    #[test]
    fn test_scheduled_margin_duration() {
        let site = SiteConfig::default();
        assert_eq!(site.scheduled_margin(), Duration::from_secs(15 * 60));
    }

    #[test]
    fn test_html_lang_fallback() {
        let mut site = SiteConfig::default();
        assert_eq!(site.html_lang(), "zh-cn");
        site.lang = String::new();
        assert_eq!(site.html_lang(), "en");
    }

    #[test]
    fn test_localize_in_site_timezone() {
        let site = SiteConfig::default();
        let naive = NaiveDate::from_ymd_opt(2026, 1, 15)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();
        let local = site.localize(naive).unwrap();
        let utc = local.with_timezone(&Utc);
        assert_eq!(utc.hour(), 1);
        assert_eq!(utc.minute(), 30);
    }

    #[test]
    fn test_localize_nonexistent_time() {
        let site = SiteConfig {
            timezone: "America/New_York".to_string(),
            ..SiteConfig::default()
        };
        // Clocks jump from 02:00 to 03:00 on 2026-03-08.
        let naive = NaiveDate::from_ymd_opt(2026, 3, 8)
            .unwrap()
            .and_hms_opt(2, 30, 0)
            .unwrap();
        assert!(matches!(
            site.localize(naive),
            Err(ConfigError::NonexistentLocalTime { .. })
        ));
    }

    #[test]
    fn test_invalid_timezone() {
        let site = SiteConfig {
            timezone: "Mars/Olympus".to_string(),
            ..SiteConfig::default()
        };
        assert!(matches!(site.tz(), Err(ConfigError::InvalidTimezone { .. })));
    }

    #[test]
    fn test_page_count() {
        let site = SiteConfig::default();
        assert_eq!(site.page_count(0), 1);
        assert_eq!(site.page_count(6), 1);
        assert_eq!(site.page_count(7), 2);
        assert_eq!(site.page_count(18), 3);
    }

    #[test]
    fn test_edit_link() {
        let mut site = SiteConfig::default();
        assert_eq!(site.edit_link("src/data/blog/hello.md"), None);

        site.edit_post = EditPostConfig {
            enabled: true,
            text: "编辑页面".to_string(),
            url: "https://github.com/example/site/edit/main/".to_string()
        };
        assert_eq!(
            site.edit_link("src/data/blog/hello.md").as_deref(),
            Some("https://github.com/example/site/edit/main/src/data/blog/hello.md")
        );
    }
}
